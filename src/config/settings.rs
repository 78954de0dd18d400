use std::env;
use std::path::PathBuf;

use lazy_static::lazy_static;
use regex::Regex;

use super::Config;
use crate::client::TemplateStore;
use crate::constants::{
    DEFAULT_SITE_ID, ENV_API_TOKEN, ENV_GRAPHQL_DIR, ENV_ORGANIZATION, ENV_SITE_ID, ENV_USER_EMAIL,
};
use crate::connector_error;
use crate::error::{ConnectorError, ConnectorResult};

lazy_static! {
    static ref EMAIL: Regex = Regex::new(r"^[^@\s]+@[^@\s]+$").expect("valid email pattern");
}

/// Values given explicitly on the command line; they win over everything else.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub user_email: Option<String>,
    pub api_token: Option<String>,
    pub organization: Option<String>,
    pub site_id: Option<String>,
    pub graphql_dir: Option<PathBuf>,
}

/// Fully resolved connector configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub user_email: String,
    pub api_token: String,
    pub organization: String,
    pub site_id: String,
    pub graphql_dir: Option<PathBuf>,
}

impl Settings {
    pub fn resolve(overrides: SettingsOverrides, config: &Config) -> ConnectorResult<Self> {
        Self::resolve_with(overrides, config, |key| env::var(key).ok())
    }

    /// Resolves each field as flag, then environment, then config file.
    pub fn resolve_with<F>(overrides: SettingsOverrides, config: &Config, env: F) -> ConnectorResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |flag: Option<String>, key: &str, stored: &Option<String>| {
            flag.filter(|v| !v.trim().is_empty())
                .or_else(|| env(key).filter(|v| !v.trim().is_empty()))
                .or_else(|| stored.clone().filter(|v| !v.trim().is_empty()))
        };

        let user_email = pick(overrides.user_email, ENV_USER_EMAIL, &config.user_email)
            .ok_or_else(|| missing("user-email", ENV_USER_EMAIL))?;
        let api_token = pick(overrides.api_token, ENV_API_TOKEN, &config.api_token)
            .ok_or_else(|| missing("api-token", ENV_API_TOKEN))?;
        let organization = pick(overrides.organization, ENV_ORGANIZATION, &config.organization)
            .ok_or_else(|| missing("organization", ENV_ORGANIZATION))?;
        let site_id = pick(overrides.site_id, ENV_SITE_ID, &config.site_id)
            .unwrap_or_else(|| DEFAULT_SITE_ID.to_string());
        let graphql_dir = overrides
            .graphql_dir
            .or_else(|| env(ENV_GRAPHQL_DIR).filter(|v| !v.is_empty()).map(PathBuf::from))
            .or_else(|| config.graphql_dir.clone());

        if !EMAIL.is_match(&user_email) {
            return Err(ConnectorError::ConfigError(format!(
                "user-email '{}' is not an e-mail address",
                user_email
            )));
        }

        Ok(Self {
            user_email,
            api_token,
            organization,
            site_id,
            graphql_dir,
        })
    }

    pub fn templates(&self) -> TemplateStore {
        match &self.graphql_dir {
            Some(dir) => TemplateStore::from_dir(dir),
            None => TemplateStore::bundled(),
        }
    }
}

fn missing(field: &str, env_key: &str) -> ConnectorError {
    connector_error!(
        ConfigError,
        "{} is required. Pass --{}, set {} or run 'atlassian-connector auth'.",
        field,
        field,
        env_key
    )
}
