use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use serde::Serialize;

use crate::constants::TEAMS_QUERY;
use crate::error::{ConnectorError, ConnectorResult};
use crate::models::GraphQLRequest;

const TEAMS_QUERY_SOURCE: &str = include_str!("../../graphql/Teams.query.graphql");

/// The closed set of queries the connector knows how to issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryTemplate {
    TeamSearch,
}

impl QueryTemplate {
    pub fn file_name(&self) -> &'static str {
        match self {
            QueryTemplate::TeamSearch => TEAMS_QUERY,
        }
    }

    pub fn from_name(name: &str) -> ConnectorResult<Self> {
        match name {
            TEAMS_QUERY => Ok(QueryTemplate::TeamSearch),
            other => Err(ConnectorError::TemplateNotFound(other.to_string())),
        }
    }

    fn bundled_source(&self) -> &'static str {
        match self {
            QueryTemplate::TeamSearch => TEAMS_QUERY_SOURCE,
        }
    }
}

/// Where query text comes from: the copies compiled into the binary, or an
/// override directory on disk.
#[derive(Debug, Clone, Default)]
pub struct TemplateStore {
    dir: Option<PathBuf>,
}

impl TemplateStore {
    pub fn bundled() -> Self {
        Self { dir: None }
    }

    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
        }
    }

    pub fn load(&self, template: QueryTemplate) -> ConnectorResult<String> {
        let source = match &self.dir {
            None => template.bundled_source().to_string(),
            Some(dir) => {
                let path = dir.join(template.file_name());
                fs::read_to_string(&path).map_err(|e| match e.kind() {
                    ErrorKind::NotFound => {
                        ConnectorError::TemplateNotFound(path.display().to_string())
                    }
                    _ => ConnectorError::IoError(e),
                })?
            }
        };

        Ok(source.trim().to_string())
    }

    /// Renders the template registered under `name` with `variables`.
    pub fn render<V: Serialize>(&self, name: &str, variables: V) -> ConnectorResult<GraphQLRequest<V>> {
        self.render_template(QueryTemplate::from_name(name)?, variables)
    }

    pub fn render_template<V: Serialize>(
        &self,
        template: QueryTemplate,
        variables: V,
    ) -> ConnectorResult<GraphQLRequest<V>> {
        Ok(GraphQLRequest {
            query: self.load(template)?,
            variables,
        })
    }
}

/// Variables of the team search query. Member paging fields are only
/// present on the inner (per-team) requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSearchVariables {
    pub organization_id: String,
    pub site_id: String,
    pub first_team: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after_team: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_member: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after_member: Option<String>,
}

impl TeamSearchVariables {
    pub fn new(
        organization_id: &str,
        site_id: &str,
        first_team: i64,
        after_team: Option<String>,
    ) -> ConnectorResult<Self> {
        if organization_id.trim().is_empty() {
            return Err(ConnectorError::ConfigError(
                "organization id is required for team search".to_string(),
            ));
        }
        if first_team <= 0 {
            return Err(ConnectorError::ConfigError(format!(
                "team page size must be positive, got {}",
                first_team
            )));
        }

        Ok(Self {
            organization_id: organization_id.to_string(),
            site_id: site_id.to_string(),
            first_team,
            after_team: after_team.filter(|cursor| !cursor.is_empty()),
            first_member: None,
            after_member: None,
        })
    }

    /// Same outer scope, asking for one page of members.
    pub fn with_members(&self, first_member: i64, after_member: Option<String>) -> Self {
        Self {
            first_member: Some(first_member),
            after_member: after_member.filter(|cursor| !cursor.is_empty()),
            ..self.clone()
        }
    }
}
