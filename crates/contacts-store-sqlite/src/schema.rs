//! SQL schema for the contacts SQLite store.
//!
//! Executed once at connection startup. Further changes go through
//! [`SqliteStore::run_script`](crate::SqliteStore::run_script).

/// Full schema DDL; idempotent thanks to `CREATE ... IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS contacts (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name  TEXT,
    last_name   TEXT,
    phone       TEXT,
    birthday    TEXT              -- RFC 3339 UTC, fixed-width nanoseconds
);

CREATE INDEX IF NOT EXISTS contacts_first_name_idx ON contacts(first_name);
CREATE INDEX IF NOT EXISTS contacts_last_name_idx  ON contacts(last_name);
CREATE INDEX IF NOT EXISTS contacts_birthday_idx   ON contacts(birthday);

PRAGMA user_version = 1;
";
