// Module declarations
pub mod annotations;
pub mod client;
pub mod commands;
pub mod config;
pub mod connector;
pub mod constants;
pub mod error;
pub mod logging;
pub mod models;
pub mod sync;

#[cfg(test)]
mod tests;

// Re-export commonly used items
pub use annotations::Annotations;
pub use client::AtlassianClient;
pub use config::{load_config, save_config, Config, Settings, SettingsOverrides};
pub use connector::{Connector, ResourceSyncer};
pub use error::{ConnectorError, ConnectorResult};
pub use models::*;
