//! [`SqliteStore`] — the SQLite implementation of [`ContactStore`].

use std::path::Path;

use contacts_core::{
  contact::Contact,
  query::Statement,
  store::{ContactStore, Execution},
};
use rusqlite::types::Value;

use crate::{
  Result,
  encode::{RawContact, encode_value},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A contacts store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self.run_script(SCHEMA).await
  }

  /// Execute every statement in `sql`, e.g. a migration or seed file.
  pub async fn run_script(&self, sql: &str) -> Result<()> {
    let sql = sql.to_owned();
    self
      .conn
      .call(move |conn| {
        conn.execute_batch(&sql)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

fn split(statement: Statement) -> (String, Vec<Value>) {
  let params = statement.args.into_iter().map(encode_value).collect();
  (statement.sql, params)
}

// ─── ContactStore impl ───────────────────────────────────────────────────────

impl ContactStore for SqliteStore {
  type Error = crate::Error;

  async fn fetch(&self, statement: Statement) -> Result<Vec<Contact>> {
    let (sql, params) = split(statement);
    tracing::debug!(%sql, args = params.len(), "fetching contacts");

    let raws: Vec<RawContact> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(params.iter()), RawContact::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawContact::into_contact).collect()
  }

  async fn execute(&self, statement: Statement) -> Result<Execution> {
    let (sql, params) = split(statement);
    tracing::debug!(%sql, args = params.len(), "executing statement");

    let (changed, last_insert_id) = self
      .conn
      .call(move |conn| {
        let changed = conn.execute(&sql, rusqlite::params_from_iter(params.iter()))?;
        Ok((changed, conn.last_insert_rowid()))
      })
      .await?;

    Ok(Execution { rows_affected: changed as u64, last_insert_id })
  }
}
