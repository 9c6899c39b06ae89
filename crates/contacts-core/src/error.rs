//! Error types for `contacts-core`.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
  #[error("invalid id parameter")]
  InvalidId(String),

  #[error("invalid limit parameter")]
  InvalidLimit(String),

  #[error("invalid offset parameter")]
  InvalidOffset(String),

  #[error("invalid orderby parameter")]
  InvalidOrderBy(String),

  #[error("invalid ascending parameter")]
  InvalidAscending(String),

  #[error("invalid birthday URL parameter")]
  InvalidBirthday(String),

  #[error("birthday year must be between 0000 and 9999")]
  BirthdayOutOfRange(i32),

  #[error("no values to be updated")]
  EmptyUpdate,

  /// A statement keyed on the unique id touched more than one row.
  #[error("expected at most one affected row, store reported {0}")]
  UnexpectedRowCount(u64),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
