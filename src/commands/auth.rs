use clap::ArgMatches;
use colored::*;
use tokio_util::sync::CancellationToken;

use super::overrides_from;
use crate::config::{load_config, save_config, Settings};
use crate::connector::Connector;
use crate::error::ConnectorResult;

pub async fn handle_auth(matches: &ArgMatches, cancel: &CancellationToken) -> ConnectorResult<()> {
    if matches.get_flag("show") {
        let config = load_config()?;
        println!("User email:   {}", config.user_email.as_deref().unwrap_or("<not set>"));
        println!(
            "API token:    {}",
            config.api_token.as_deref().map(mask).unwrap_or_else(|| "<not set>".to_string())
        );
        println!("Organization: {}", config.organization.as_deref().unwrap_or("<not set>"));
        println!("Site:         {}", config.site_id.as_deref().unwrap_or("<default>"));
        return Ok(());
    }

    let overrides = overrides_from(matches);
    if overrides.user_email.is_none() && overrides.api_token.is_none() && overrides.organization.is_none() {
        println!("Usage: atlassian-connector auth --user-email <EMAIL> --api-token <TOKEN> --organization <ID>");
        println!("       atlassian-connector auth --show");
        return Ok(());
    }

    let mut config = load_config()?;
    if let Some(email) = &overrides.user_email {
        config.user_email = Some(email.clone());
    }
    if let Some(token) = &overrides.api_token {
        config.api_token = Some(token.clone());
    }
    if let Some(organization) = &overrides.organization {
        config.organization = Some(organization.clone());
    }
    if let Some(site_id) = &overrides.site_id {
        config.site_id = Some(site_id.clone());
    }
    save_config(&config)?;
    println!("Credentials saved successfully!");

    // Test the credentials
    let settings = Settings::resolve(overrides, &config)?;
    let connector = Connector::from_settings(&settings)?;
    match connector.validate(cancel).await {
        Ok(_) => println!("{} Connected to organization {}", "✅".green(), settings.organization),
        Err(e) => println!("{} Failed to authenticate: {}", "❌".red(), e),
    }

    Ok(())
}

/// Shows only the ends of a secret.
pub fn mask(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}
