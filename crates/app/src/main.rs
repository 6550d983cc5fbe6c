use std::sync::Arc;

use clap::Parser;
use tracing::debug;

use services::{AppServices, ServicesConfig};
use storage::content_source::JsonDirectorySource;

mod commands;
mod config;
mod database;
mod error;
mod telemetry;

use config::CliArgs;
use error::CliError;

async fn run(args: CliArgs) -> Result<(), CliError> {
    let settings = args.settings;
    telemetry::init(&settings)?;

    // Open + migrate SQLite in the binary glue so core/services stay storage-agnostic.
    let db_url = database::normalize_sqlite_url(&settings.db_url);
    database::prepare_sqlite_file(&db_url)?;

    let source = Arc::new(JsonDirectorySource::new(&settings.content_dir));
    let config = ServicesConfig {
        refresh_policy: settings.environment.refresh_policy(),
        origin: settings.origin.clone(),
        ..ServicesConfig::default()
    };
    let app = AppServices::new_sqlite(&db_url, source, config).await?;
    debug!(%db_url, content_dir = %settings.content_dir.display(), "services ready");

    commands::run(args.command, &app, &mut std::io::stdout()).await
}

#[tokio::main]
async fn main() {
    if let Err(err) = run(CliArgs::parse()).await {
        eprintln!("error: {err}");
        std::process::exit(2);
    }
}
