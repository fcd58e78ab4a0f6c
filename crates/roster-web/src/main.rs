//! Roster server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens an
//! in-process SQLite store, and serves the person directory over HTTP.
//!
//! Every setting can also come from the environment with a `ROSTER_` prefix,
//! e.g. `ROSTER_PORT=8080`.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use clap::Parser;
use roster_store_sqlite::{Seed, SqliteStore};
use roster_web::ServerConfig;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Roster person directory server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("ROSTER"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  let store_path = expand_tilde(&server_cfg.store_path);

  let seed = match (&server_cfg.countries_seed, &server_cfg.persons_seed) {
    (Some(countries), Some(persons)) => {
      let (countries, persons) = (expand_tilde(countries), expand_tilde(persons));
      Seed::from_files(&countries, &persons)
        .with_context(|| format!("failed to load seed data from {countries:?} and {persons:?}"))?
    }
    (None, None) => Seed::default(),
    _ => {
      tracing::warn!("only one of countries_seed and persons_seed is set; not seeding");
      Seed::default()
    }
  };

  let store = SqliteStore::open_with_seed(&store_path, seed)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  let app = roster_web::app(Arc::new(store));
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
