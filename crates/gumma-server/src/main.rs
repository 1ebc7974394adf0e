//! gumma-server binary.
//!
//! Reads `gumma.toml` (or the path given with `--config`), opens the SQLite
//! store, and serves the GraphQL API over HTTP.
//!
//! # Schema export
//!
//! To print the SDL for client code generation:
//!
//! ```sh
//! cargo run -p gumma-server -- --print-schema
//! ```

mod config;

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use gumma_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;

#[derive(Parser)]
#[command(author, version, about = "gumma groups GraphQL server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "gumma.toml")]
  config: PathBuf,

  /// Print the GraphQL schema as SDL and exit.
  #[arg(long)]
  print_schema: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  let cli = Cli::parse();

  if cli.print_schema {
    print!("{}", gumma_graphql::sdl());
    return Ok(());
  }

  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let server_cfg = ServerConfig::load(&cli.config)
    .with_context(|| format!("failed to load configuration from {:?}", cli.config))?;

  let store = SqliteStore::open(&server_cfg.store_path)
    .await
    .with_context(|| format!("failed to open store at {:?}", server_cfg.store_path))?;

  let schema = gumma_graphql::build_schema(Arc::new(store));
  let app = gumma_graphql::router(schema);
  let address = server_cfg.address();

  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  tracing::info!("Visit http://{address}{}", gumma_graphql::router::GRAPHQL_PATH);
  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
