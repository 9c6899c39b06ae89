//! Wiring for the contacts server binary: configuration and the top-level
//! router.

use std::{path::PathBuf, sync::Arc};

use axum::Router;
use contacts_core::store::ContactStore;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `CONTACTS_*` environment variables.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:          String,
  #[serde(default = "default_port")]
  pub port:          u16,
  #[serde(default = "default_database_path")]
  pub database_path: PathBuf,
  /// Log one line per HTTP request.
  #[serde(default = "default_http_logging")]
  pub http_logging:  bool,
}

fn default_host() -> String { "0.0.0.0".to_string() }

fn default_port() -> u16 { 8080 }

fn default_database_path() -> PathBuf { PathBuf::from("contacts.db") }

fn default_http_logging() -> bool { true }

impl Default for ServerConfig {
  fn default() -> Self {
    ServerConfig {
      host:          default_host(),
      port:          default_port(),
      database_path: default_database_path(),
      http_logging:  default_http_logging(),
    }
  }
}

impl ServerConfig {
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// Layer configuration sources: an optional TOML file, then environment
/// variables prefixed with `CONTACTS_`.
pub fn load_config(
  file: impl Into<PathBuf>,
) -> Result<ServerConfig, config::ConfigError> {
  config::Config::builder()
    .add_source(config::File::from(file.into()).required(false))
    .add_source(config::Environment::with_prefix("CONTACTS"))
    .build()?
    .try_deserialize()
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the application router, with request tracing when enabled.
pub fn app<S>(store: Arc<S>, config: &ServerConfig) -> Router
where
  S: ContactStore + 'static,
{
  let router = contacts_api::api_router(store);
  if config.http_logging {
    router.layer(TraceLayer::new_for_http())
  } else {
    tracing::info!("HTTP request logging is off");
    router
  }
}
