//! contacts-server binary.
//!
//! Reads `config.toml` (or the path given with `--config`) plus `CONTACTS_*`
//! environment variables, opens the SQLite store, and serves the contacts
//! JSON API over HTTP.
//!
//! # Migrations
//!
//! To run an SQL script against the configured database and exit:
//!
//! ```
//! cargo run -p contacts-server -- --migrate scripts/seed.sql
//! ```
//!
//! Birthdays in such scripts should be RFC 3339 UTC text
//! (`1969-03-02T00:00:00.000000000Z`, as the service writes them). A plain
//! `1969-03-02` or `1969-03-02 00:00:00` is also read back, as midnight UTC
//! or the given UTC time.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use contacts_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Contacts REST service")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Execute the SQL statements in this file against the store and exit.
  #[arg(long, value_name = "FILE")]
  migrate: Option<PathBuf>,
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

  let server_cfg = contacts_server::load_config(&cli.config)
    .context("failed to read configuration")?;

  let store = SqliteStore::open(&server_cfg.database_path)
    .await
    .with_context(|| {
      format!("failed to open store at {:?}", server_cfg.database_path)
    })?;

  // Helper mode: run a script and exit.
  if let Some(script) = cli.migrate {
    let sql = tokio::fs::read_to_string(&script)
      .await
      .with_context(|| format!("failed to read {script:?}"))?;
    store
      .run_script(&sql)
      .await
      .with_context(|| format!("failed to execute {script:?}"))?;
    tracing::info!(?script, "script executed");
    return Ok(());
  }

  let app = contacts_server::app(Arc::new(store), &server_cfg);
  let address = server_cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
