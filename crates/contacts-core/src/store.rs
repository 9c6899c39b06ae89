//! The `ContactStore` trait — the only capability the handlers need from a
//! database.
//!
//! The store never builds SQL itself; it runs [`Statement`]s produced by
//! [`crate::query`] and decodes `contacts` rows.

use std::future::Future;

use crate::{contact::Contact, query::Statement};

/// What a data-modifying statement reported back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Execution {
  pub rows_affected:  u64,
  /// Rowid of the most recent successful insert on the connection.
  pub last_insert_id: i64,
}

/// Abstraction over a backend holding the `contacts` table.
///
/// Each call is a single round trip; the backend is the only serialization
/// point between concurrent requests.
pub trait ContactStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Run a query whose result columns are
  /// `id, first_name, last_name, phone, birthday`.
  fn fetch(
    &self,
    statement: Statement,
  ) -> impl Future<Output = Result<Vec<Contact>, Self::Error>> + Send + '_;

  /// Run an `INSERT`, `UPDATE` or `DELETE`.
  fn execute(
    &self,
    statement: Statement,
  ) -> impl Future<Output = Result<Execution, Self::Error>> + Send + '_;
}
