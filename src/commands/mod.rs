pub mod auth;
pub mod sync;
pub mod validate;

use std::path::PathBuf;

use clap::ArgMatches;

use crate::config::{load_config, Settings, SettingsOverrides};
use crate::error::ConnectorResult;

/// Reads the global credential flags off any (sub)command's matches.
pub fn overrides_from(matches: &ArgMatches) -> SettingsOverrides {
    let value = |name: &str| matches.get_one::<String>(name).cloned();

    SettingsOverrides {
        user_email: value("user-email"),
        api_token: value("api-token"),
        organization: value("organization"),
        site_id: value("site-id"),
        graphql_dir: matches.get_one::<PathBuf>("graphql-dir").cloned(),
    }
}

pub fn resolve_settings(matches: &ArgMatches) -> ConnectorResult<Settings> {
    let config = load_config()?;
    Settings::resolve(overrides_from(matches), &config)
}
