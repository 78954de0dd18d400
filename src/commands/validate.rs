use clap::ArgMatches;
use colored::*;
use tokio_util::sync::CancellationToken;

use super::resolve_settings;
use crate::connector::Connector;
use crate::error::ConnectorResult;

pub async fn handle_validate(matches: &ArgMatches, cancel: &CancellationToken) -> ConnectorResult<()> {
    let settings = resolve_settings(matches)?;
    let connector = Connector::from_settings(&settings)?;
    let metadata = connector.metadata();

    let annotations = connector.validate(cancel).await?;

    println!("{} {}", "✅".green(), metadata.display_name.bold());
    println!("   {}", metadata.description.dimmed());
    println!("   Organization: {}", settings.organization);
    println!("   Site:         {}", settings.site_id);
    if let Some(rate_limit) = annotations.rate_limit() {
        if let (Some(remaining), Some(limit)) = (rate_limit.remaining, rate_limit.limit) {
            println!("   Rate limit:   {}/{} remaining", remaining, limit);
        }
    }

    Ok(())
}
