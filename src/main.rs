use std::path::PathBuf;
use std::process;

use clap::{value_parser, Arg, ArgAction, Command};
use colored::*;
use tokio_util::sync::CancellationToken;
use tracing::{error, warn};

use atlassian_connector::commands::auth::handle_auth;
use atlassian_connector::commands::sync::handle_sync;
use atlassian_connector::commands::validate::handle_validate;
use atlassian_connector::logging;

fn build_cli() -> Command {
    Command::new("atlassian-connector")
        .about("Sync Atlassian teams and members into resources, entitlements and grants")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("user-email")
                .long("user-email")
                .value_name("EMAIL")
                .help("User email used to authenticate to Atlassian API")
                .global(true)
        )
        .arg(
            Arg::new("api-token")
                .long("api-token")
                .value_name("TOKEN")
                .help("The API token to get access to Atlassian API")
                .global(true)
        )
        .arg(
            Arg::new("organization")
                .long("organization")
                .value_name("ORG_ID")
                .help("Limit syncing to specific organization by providing organization ID")
                .global(true)
        )
        .arg(
            Arg::new("site-id")
                .long("site-id")
                .value_name("SITE_ID")
                .help("Site scope for the team search (defaults to \"None\")")
                .global(true)
        )
        .arg(
            Arg::new("graphql-dir")
                .long("graphql-dir")
                .value_name("DIR")
                .help("Read query templates from this directory instead of the bundled ones")
                .value_parser(value_parser!(PathBuf))
                .global(true)
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log at debug level")
                .action(ArgAction::SetTrue)
                .global(true)
        )
        .subcommand(
            Command::new("auth")
                .about("Save Atlassian credentials")
                .arg(
                    Arg::new("show")
                        .long("show")
                        .help("Show the saved credentials")
                        .action(ArgAction::SetTrue)
                )
        )
        .subcommand(
            Command::new("validate")
                .about("Check that the configured credentials can search teams")
        )
        .subcommand(
            Command::new("sync")
                .about("Run a full sync pass and print the result")
                .arg(
                    Arg::new("page-size")
                        .long("page-size")
                        .short('l')
                        .value_name("NUMBER")
                        .help("Teams and members per request (1-100)")
                        .value_parser(value_parser!(i64))
                        .default_value("100")
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .value_name("FORMAT")
                        .help("Output format: simple, json")
                        .value_parser(["simple", "json"])
                        .default_value("simple")
                )
        )
}

#[tokio::main]
async fn main() {
    let matches = build_cli().get_matches();

    if let Err(e) = logging::init_logging(matches.get_flag("verbose")) {
        eprintln!("{} {}", "Warning:".yellow(), e);
    }
    logging::install_panic_hook();

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupted, cancelling sync");
            on_interrupt.cancel();
        }
    });

    let result = match matches.subcommand() {
        Some(("auth", sub_matches)) => handle_auth(sub_matches, &cancel).await,
        Some(("validate", sub_matches)) => handle_validate(sub_matches, &cancel).await,
        Some(("sync", sub_matches)) => handle_sync(sub_matches, &cancel).await,
        _ => Ok(()),
    };

    if let Err(e) = result {
        error!(error = %e, "command failed");
        eprintln!("{} {}", "Error:".red().bold(), e);
        if let Ok(Some(path)) = logging::get_log_file_path() {
            eprintln!("{} {}", "Log file:".dimmed(), path.display());
        }
        process::exit(1);
    }
}
