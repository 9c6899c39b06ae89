//! Encoding and decoding helpers between domain values and the plain
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 UTC strings with a fixed nanosecond
//! width, so text order equals chronological order and `strftime` can read
//! them. Rows written by hand-made SQL scripts may instead hold a plain
//! `YYYY-MM-DD` date or an SQLite `YYYY-MM-DD HH:MM:SS` datetime; both are
//! read as UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Utc};
use contacts_core::{contact::Contact, query::SqlValue};
use rusqlite::types::Value;

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  let rfc3339 = match DateTime::parse_from_rfc3339(s) {
    Ok(dt) => return Ok(dt.with_timezone(&Utc)),
    Err(e) => e,
  };
  if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f") {
    return Ok(naive.and_utc());
  }
  if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
    return Ok(date.and_time(NaiveTime::MIN).and_utc());
  }
  Err(Error::DateParse(format!("{s:?}: {rfc3339}")))
}

// ─── Bound arguments ─────────────────────────────────────────────────────────

pub fn encode_value(v: SqlValue) -> Value {
  match v {
    SqlValue::Null => Value::Null,
    SqlValue::Integer(i) => Value::Integer(i),
    SqlValue::Text(s) => Value::Text(s),
    SqlValue::Timestamp(dt) => Value::Text(encode_dt(dt)),
  }
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `contacts` row.
pub struct RawContact {
  pub id:         i64,
  pub first_name: Option<String>,
  pub last_name:  Option<String>,
  pub phone:      Option<String>,
  pub birthday:   Option<String>,
}

impl RawContact {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(RawContact {
      id:         row.get(0)?,
      first_name: row.get(1)?,
      last_name:  row.get(2)?,
      phone:      row.get(3)?,
      birthday:   row.get(4)?,
    })
  }

  pub fn into_contact(self) -> Result<Contact> {
    Ok(Contact {
      id:         self.id,
      first_name: self.first_name,
      last_name:  self.last_name,
      phone:      self.phone,
      birthday:   self.birthday.as_deref().map(decode_dt).transpose()?,
    })
  }
}
