pub const ATLASSIAN_GRAPHQL_URL: &str = "https://team.atlassian.com/gateway/api/graphql";
pub const CONFIG_FILE: &str = ".atlassian-connector-config.json";

/// Upper bound and default for both team and member page sizes.
pub const ITEMS_PER_PAGE: i64 = 100;

/// Site scope sent when no site is configured.
pub const DEFAULT_SITE_ID: &str = "None";

pub const TEAMS_QUERY: &str = "Teams.query.graphql";

// Environment overrides for configuration values
pub const ENV_USER_EMAIL: &str = "ATLASSIAN_USER_EMAIL";
pub const ENV_API_TOKEN: &str = "ATLASSIAN_API_TOKEN";
pub const ENV_ORGANIZATION: &str = "ATLASSIAN_ORGANIZATION";
pub const ENV_SITE_ID: &str = "ATLASSIAN_SITE_ID";
pub const ENV_GRAPHQL_DIR: &str = "GRAPHQL_DIR";

pub const CONNECTOR_DISPLAY_NAME: &str = "Atlassian Connector";
pub const CONNECTOR_DESCRIPTION: &str = "Connector to sync teams and members from Atlassian";
