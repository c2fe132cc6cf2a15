use clap::Parser;
use demographics::{demographic_sync, settings, storage};
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    name = "demographics",
    version,
    about = "Customer demographics schema and seed loader"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Demographics JSON file to sync (overrides seed.demographics_file)
    #[arg(long)]
    sync_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // logging
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    // load settings
    let settings = settings::Settings::load(&cli.config)?;
    tracing::info!(?settings, "Loaded configuration");

    // init storage (connect + migrate)
    let db = storage::init(&settings.database).await?;

    if let Some(path) = cli.sync_file.or(settings.seed.demographics_file) {
        demographic_sync::sync_demographics_from_file(&db, &path).await?;
    }

    let demographics = storage::list_demographics(&db).await.into_diagnostic()?;
    tracing::info!(
        count = demographics.len(),
        delete_policy = ?settings.database.delete_policy,
        "Customer demographics ready"
    );

    Ok(())
}
