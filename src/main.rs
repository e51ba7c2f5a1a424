use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use streamly_server::catalog::CatalogStore;
use streamly_server::config::{AppConfig, CliConfig, FileConfig};
use streamly_server::server::{run_server, RequestsLoggingLevel};
use streamly_server::storage::{FileStorage, Storage};
use streamly_server::user::ProfileStore;

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(msg).with_context(|| format!("Error resolving path: {}", s));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to the directory holding the persisted state files.
    #[clap(value_parser = parse_path)]
    pub state_dir: Option<PathBuf>,

    /// Path to a TOML config file. Values in the file override CLI arguments.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// The port to listen on.
    #[clap(short, long, default_value_t = 3001)]
    pub port: u16,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// Path to the frontend directory to be statically served.
    #[clap(long)]
    pub frontend_dir_path: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .unwrap();

    let file_config = match &cli_args.config {
        Some(path) => Some(FileConfig::load(path)?),
        None => None,
    };
    let cli_config = CliConfig {
        state_dir: cli_args.state_dir,
        port: cli_args.port,
        logging_level: cli_args.logging_level,
        frontend_dir_path: cli_args.frontend_dir_path,
    };
    let config = AppConfig::resolve(&cli_config, file_config)?;

    info!("Opening state directory at {:?}...", config.state_dir);
    let storage: Arc<dyn Storage> = Arc::new(FileStorage::open(&config.state_dir)?);

    let catalog_store =
        Arc::new(CatalogStore::open(storage.clone()).context("Failed to open catalog store")?);
    info!(
        "Catalog ready with {} videos",
        catalog_store.list_videos()?.len()
    );

    let profile_store = Arc::new(ProfileStore::new(storage));

    info!("Ready to serve at port {}!", config.port);
    run_server(
        catalog_store,
        profile_store,
        config.logging_level,
        config.port,
        config.frontend_dir_path,
    )
    .await
}
