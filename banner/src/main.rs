use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use steam_banner_gen::{
    infrastructure::{steam_locator, storage::LibraryCacheStore},
    use_cases::GenerateBannersUseCase,
    Config, LogFormat,
};

#[derive(Parser)]
#[command(name = "steam-banner-gen")]
#[command(
    about = "Regenerate Steam library header banners from cached hero and logo art",
    long_about = None,
    version
)]
struct Cli {
    /// Steam installation directory (default: STEAM_PATH, then the platform default)
    steam_path: Option<PathBuf>,
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    match format {
        LogFormat::Pretty => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env();
    init_tracing(config.log_format);
    config.validate().map_err(anyhow::Error::msg)?;

    let steam_root = steam_locator::resolve(cli.steam_path.as_deref(), config.steam_root.as_deref())
        .context("Failed to locate Steam installation")?;
    info!("Using Steam path: {}", steam_root.display());

    // Initialize infrastructure layer
    let store = LibraryCacheStore::with_quality(&steam_root, config.jpeg_quality);
    store
        .init()
        .context("Failed to create backup and staging directories")?;

    let appinfo_path = store.paths().appinfo();
    if !appinfo_path.is_file() {
        bail!("appinfo.vdf not found at {}", appinfo_path.display());
    }

    info!("Parsing {}", appinfo_path.display());
    let container = appinfo::Container::open(&appinfo_path)
        .with_context(|| format!("Failed to parse {}", appinfo_path.display()))?;
    info!(
        apps = container.len(),
        failed_records = container.failed_ids().len(),
        "appinfo loaded"
    );

    // Run
    let use_case = GenerateBannersUseCase::new(Arc::new(store));
    let report = use_case.execute(&container);

    if !report.is_success() {
        let ids: Vec<u32> = report.failed.iter().map(|(id, _)| *id).collect();
        warn!(?ids, "Some banners could not be generated");
    }
    info!(
        "Done: {} generated, {} skipped, {} failed",
        report.generated,
        report.skipped,
        report.failed.len()
    );

    Ok(())
}
