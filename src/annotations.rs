use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RateLimitStatus {
    Ok,
    Overlimit,
}

/// Rate-limit state reported by the upstream on its last response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RateLimitDescription {
    pub status: RateLimitStatus,
    pub limit: Option<u64>,
    pub remaining: Option<u64>,
    pub reset_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Annotation {
    RateLimit(RateLimitDescription),
    V1Identifier { id: String },
}

/// Side-channel metadata attached to listing results and grants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Annotations(Vec<Annotation>);

impl Annotations {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Records a rate-limit description, replacing any earlier one.
    pub fn with_rate_limiting(&mut self, description: RateLimitDescription) {
        self.0.retain(|annotation| !matches!(annotation, Annotation::RateLimit(_)));
        self.0.push(Annotation::RateLimit(description));
    }

    pub fn with_v1_identifier(mut self, id: impl Into<String>) -> Self {
        self.0.push(Annotation::V1Identifier { id: id.into() });
        self
    }

    pub fn rate_limit(&self) -> Option<&RateLimitDescription> {
        self.0.iter().find_map(|annotation| match annotation {
            Annotation::RateLimit(description) => Some(description),
            _ => None,
        })
    }

    pub fn v1_identifier(&self) -> Option<&str> {
        self.0.iter().find_map(|annotation| match annotation {
            Annotation::V1Identifier { id } => Some(id.as_str()),
            _ => None,
        })
    }

    /// Folds `other` into `self`; the newest rate-limit description wins.
    pub fn merge(&mut self, other: Annotations) {
        for annotation in other.0 {
            match annotation {
                Annotation::RateLimit(description) => self.with_rate_limiting(description),
                other => self.0.push(other),
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}
