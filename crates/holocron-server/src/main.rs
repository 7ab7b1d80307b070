//! Holocron server binary.
//!
//! Reads `holocron.toml` (or the path given with `--config`), opens the SQLite
//! store, optionally loads a seed file, and serves the JSON API over HTTP.
//!
//! # Seeding
//!
//! ```sh
//! cargo run -p holocron-server -- --seed fixtures/catalog.json
//! ```

mod settings;

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use holocron_api::AppState;
use holocron_store_sqlite::{Seed, SqliteStore};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::settings::ServerConfig;

#[derive(Parser)]
#[command(author, version, about = "Holocron catalog and favorites server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "holocron.toml")]
  config: PathBuf,

  /// JSON file of users, people, and planets to load before serving.
  #[arg(long)]
  seed: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let server_cfg = ServerConfig::load(&cli.config)
    .with_context(|| format!("failed to load configuration from {:?}", cli.config))?;

  let store_path = server_cfg.resolved_store_path();
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  if let Some(seed_path) = &cli.seed {
    let raw = tokio::fs::read_to_string(seed_path)
      .await
      .with_context(|| format!("failed to read seed file {seed_path:?}"))?;
    let seed: Seed = serde_json::from_str(&raw)
      .with_context(|| format!("failed to parse seed file {seed_path:?}"))?;
    store.seed(seed).await.context("failed to seed store")?;
  }

  tracing::info!(policy = ?server_cfg.favorites, "favorites policy");

  let state = AppState::new(Arc::new(store), server_cfg.favorites);
  let mut app = holocron_api::router(state).layer(TraceLayer::new_for_http());
  if server_cfg.cors_permissive {
    app = app.layer(CorsLayer::permissive());
  }

  let address = format!("{}:{}", server_cfg.host, server_cfg.port);
  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
