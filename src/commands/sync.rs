use clap::ArgMatches;
use colored::*;
use tokio_util::sync::CancellationToken;

use super::resolve_settings;
use crate::connector::resource::ResourceTraits;
use crate::connector::{Connector, TEAM_RESOURCE_TYPE, USER_RESOURCE_TYPE};
use crate::constants::ITEMS_PER_PAGE;
use crate::error::ConnectorResult;
use crate::sync::{run_sync, SyncReport};

pub async fn handle_sync(matches: &ArgMatches, cancel: &CancellationToken) -> ConnectorResult<()> {
    let settings = resolve_settings(matches)?;
    let connector = Connector::from_settings(&settings)?;
    let page_size = matches
        .get_one::<i64>("page-size")
        .copied()
        .unwrap_or(ITEMS_PER_PAGE);
    let format = matches
        .get_one::<String>("format")
        .map(|s| s.as_str())
        .unwrap_or("simple");

    let report = run_sync(&connector, page_size, cancel).await?;

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        _ => print_report(&report),
    }

    Ok(())
}

fn print_report(report: &SyncReport) {
    println!(
        "Synced {} teams, {} users, {} entitlements, {} grants",
        report.resources_of(TEAM_RESOURCE_TYPE.id).to_string().bold(),
        report.resources_of(USER_RESOURCE_TYPE.id).to_string().bold(),
        report.entitlements.len().to_string().bold(),
        report.grants.len().to_string().bold(),
    );

    for team in report
        .resources
        .iter()
        .filter(|resource| resource.is_type(&TEAM_RESOURCE_TYPE))
    {
        println!("\n{} {}", team.display_name.cyan().bold(), team.id.resource.dimmed());
        for grant in report
            .grants
            .iter()
            .filter(|grant| grant.entitlement_id.starts_with(&format!("team:{}:", team.id.resource)))
        {
            let login = match &grant.principal.traits {
                ResourceTraits::User { login, .. } => login.as_str(),
                ResourceTraits::Group { .. } => grant.principal.display_name.as_str(),
            };
            let role = grant.entitlement_id.rsplit(':').next().unwrap_or_default();
            println!("  {:<8} {}", role.yellow(), login);
        }
    }
}
