//! Caller-held page tokens.
//!
//! A token is a JSON "bag": a stack of page states, each naming the
//! resource type being listed and the upstream cursor to resume from. An
//! empty string is the bag with no state left, meaning listing is done.

use serde::{Deserialize, Serialize};

use super::resource::ResourceType;
use crate::error::{ConnectorError, ConnectorResult};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageState {
    pub resource_type_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub resource_id: String,
    #[serde(default)]
    pub token: String,
}

impl PageState {
    pub fn new(resource_type_id: &str) -> Self {
        Self {
            resource_type_id: resource_type_id.to_string(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageBag {
    #[serde(default)]
    states: Vec<PageState>,
    #[serde(default)]
    current_state: Option<PageState>,
}

impl PageBag {
    pub fn unmarshal(input: &str) -> ConnectorResult<Self> {
        if input.is_empty() {
            return Ok(Self::default());
        }

        serde_json::from_str(input).map_err(|e| ConnectorError::TokenDecodeError(e.to_string()))
    }

    pub fn marshal(&self) -> ConnectorResult<String> {
        if self.current_state.is_none() {
            return Ok(String::new());
        }

        Ok(serde_json::to_string(self)?)
    }

    pub fn push(&mut self, state: PageState) {
        if let Some(current) = self.current_state.take() {
            self.states.push(current);
        }
        self.current_state = Some(state);
    }

    pub fn pop(&mut self) -> Option<PageState> {
        let previous = self.current_state.take();
        self.current_state = self.states.pop();
        previous
    }

    /// Advances the current state to `page_token`, or pops it when the
    /// listing it tracks is exhausted.
    pub fn next(&mut self, page_token: &str) -> ConnectorResult<()> {
        if page_token.is_empty() {
            self.pop();
            return Ok(());
        }

        match self.current_state.as_mut() {
            Some(current) => {
                current.token = page_token.to_string();
                Ok(())
            }
            None => Err(ConnectorError::TokenDecodeError(
                "no active page state to advance".to_string(),
            )),
        }
    }

    pub fn current(&self) -> Option<&PageState> {
        self.current_state.as_ref()
    }

    pub fn page_token(&self) -> &str {
        self.current_state
            .as_ref()
            .map(|state| state.token.as_str())
            .unwrap_or_default()
    }

    pub fn resource_type_id(&self) -> Option<&str> {
        self.current_state
            .as_ref()
            .map(|state| state.resource_type_id.as_str())
    }
}

/// Decodes a caller token for `resource_type`, returning the bag and the
/// upstream cursor to resume from (empty on the first call).
pub fn resolve_page_token(token: &str, resource_type: &ResourceType) -> ConnectorResult<(PageBag, String)> {
    let mut bag = PageBag::unmarshal(token)?;
    if bag.current().is_none() {
        bag.push(PageState::new(resource_type.id));
    }

    match bag.resource_type_id() {
        Some(id) if id == resource_type.id => {}
        other => {
            return Err(ConnectorError::TokenDecodeError(format!(
                "token for resource type {:?} used to list {}",
                other, resource_type.id
            )))
        }
    }

    let cursor = bag.page_token().to_string();
    Ok((bag, cursor))
}
