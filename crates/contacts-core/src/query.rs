//! Parameterized SQL for the `contacts` table.
//!
//! Every statement the service issues is rendered here. Filter values, new
//! field values and ids are always bound as arguments; the only text spliced
//! into SQL comes from [`Column::as_str`] and [`SortDirection::keyword`], both
//! closed sets.
//!
//! The rendered dialect is SQLite with anonymous `?` placeholders.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};

use crate::{
  Error, Result,
  contact::{ContactPatch, NewContact},
};

const TABLE: &str = "contacts";
const SELECT_COLUMNS: &str = "id, first_name, last_name, phone, birthday";

// ─── Statement ───────────────────────────────────────────────────────────────

/// A value bound to a `?` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlValue {
  Null,
  Integer(i64),
  Text(String),
  Timestamp(DateTime<Utc>),
}

impl From<Option<String>> for SqlValue {
  fn from(v: Option<String>) -> Self { v.map_or(Self::Null, Self::Text) }
}

impl From<Option<DateTime<Utc>>> for SqlValue {
  fn from(v: Option<DateTime<Utc>>) -> Self {
    v.map_or(Self::Null, Self::Timestamp)
  }
}

/// SQL text plus its arguments, in placeholder order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
  pub sql:  String,
  pub args: Vec<SqlValue>,
}

// ─── Whitelisted columns ─────────────────────────────────────────────────────

/// A column of the `contacts` table. The only column names that reach SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Column {
  #[default]
  Id,
  FirstName,
  LastName,
  Phone,
  Birthday,
}

impl Column {
  pub const ALL: [Column; 5] = [
    Column::Id,
    Column::FirstName,
    Column::LastName,
    Column::Phone,
    Column::Birthday,
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      Column::Id => "id",
      Column::FirstName => "first_name",
      Column::LastName => "last_name",
      Column::Phone => "phone",
      Column::Birthday => "birthday",
    }
  }
}

impl fmt::Display for Column {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for Column {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    Column::ALL
      .into_iter()
      .find(|c| c.as_str() == s)
      .ok_or_else(|| Error::InvalidOrderBy(s.to_owned()))
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
  #[default]
  Ascending,
  Descending,
}

impl SortDirection {
  pub fn keyword(self) -> &'static str {
    match self {
      SortDirection::Ascending => "ASC",
      SortDirection::Descending => "DESC",
    }
  }
}

// ─── Search ──────────────────────────────────────────────────────────────────

/// A month/day pair matched against the birthday of every year.
///
/// Neither part is range-checked; out-of-range values simply match nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthdayFilter {
  pub month: i32,
  pub day:   i32,
}

/// Ordering for a search. `column` has already passed the whitelist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sort {
  pub column:    Column,
  pub direction: SortDirection,
}

/// `LIMIT` / `OFFSET` for a search. Both are always rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
  pub limit:  i64,
  pub offset: i64,
}

impl Default for Page {
  fn default() -> Self { Page { limit: i64::MAX, offset: 0 } }
}

/// A validated search over the `contacts` table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchQuery {
  pub first_name_prefix: Option<String>,
  pub last_name_prefix:  Option<String>,
  pub birthday:          Option<BirthdayFilter>,
  pub sort:              Sort,
  pub page:              Page,
}

/// The left-hand side of a condition.
#[derive(Debug, Clone, Copy)]
enum Target {
  Column(Column),
  Month(Column),
  Day(Column),
}

impl Target {
  fn render(self) -> String {
    match self {
      Target::Column(c) => c.as_str().to_owned(),
      Target::Month(c) => format!("CAST(strftime('%m', {c}) AS INTEGER)"),
      Target::Day(c) => format!("CAST(strftime('%d', {c}) AS INTEGER)"),
    }
  }
}

#[derive(Debug, Clone, Copy)]
enum Operator {
  Eq,
  StartsWith,
}

/// One `target operator ?` triple of a `WHERE` clause.
#[derive(Debug, Clone)]
struct Condition {
  target:   Target,
  operator: Operator,
  value:    SqlValue,
}

impl Condition {
  fn starts_with(column: Column, prefix: &str) -> Self {
    Condition {
      target:   Target::Column(column),
      operator: Operator::StartsWith,
      value:    SqlValue::Text(format!("{}%", escape_like(prefix))),
    }
  }

  fn eq(target: Target, value: i64) -> Self {
    Condition { target, operator: Operator::Eq, value: SqlValue::Integer(value) }
  }

  fn render(&self) -> String {
    let target = self.target.render();
    match self.operator {
      Operator::Eq => format!("{target} = ?"),
      Operator::StartsWith => format!("{target} LIKE ? ESCAPE '\\'"),
    }
  }
}

/// Escape LIKE wildcards so the prefix is matched literally.
fn escape_like(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  for ch in s.chars() {
    if matches!(ch, '\\' | '%' | '_') {
      out.push('\\');
    }
    out.push(ch);
  }
  out
}

impl SearchQuery {
  fn conditions(&self) -> Vec<Condition> {
    let mut conds = Vec::new();
    if let Some(prefix) = &self.first_name_prefix {
      conds.push(Condition::starts_with(Column::FirstName, prefix));
    }
    if let Some(prefix) = &self.last_name_prefix {
      conds.push(Condition::starts_with(Column::LastName, prefix));
    }
    if let Some(b) = self.birthday {
      conds.push(Condition::eq(Target::Month(Column::Birthday), b.month.into()));
      conds.push(Condition::eq(Target::Day(Column::Birthday), b.day.into()));
    }
    conds
  }

  pub fn to_statement(&self) -> Statement {
    let conds = self.conditions();

    let mut sql = format!("SELECT {SELECT_COLUMNS} FROM {TABLE}");
    if !conds.is_empty() {
      let clauses: Vec<String> = conds.iter().map(Condition::render).collect();
      sql.push_str(" WHERE ");
      sql.push_str(&clauses.join(" AND "));
    }

    let Sort { column, direction } = self.sort;
    let dir = direction.keyword();
    sql.push_str(&format!(" ORDER BY {column} {dir}"));
    // Equal sort keys fall back to id so paging is deterministic.
    if column != Column::Id {
      sql.push_str(&format!(", id {dir}"));
    }
    sql.push_str(" LIMIT ? OFFSET ?");

    let mut args: Vec<SqlValue> = conds.into_iter().map(|c| c.value).collect();
    args.push(SqlValue::Integer(self.page.limit));
    args.push(SqlValue::Integer(self.page.offset));

    Statement { sql, args }
  }
}

// ─── Single-row statements ───────────────────────────────────────────────────

pub fn select_by_id(id: i64) -> Statement {
  Statement {
    sql:  format!("SELECT {SELECT_COLUMNS} FROM {TABLE} WHERE id = ?"),
    args: vec![SqlValue::Integer(id)],
  }
}

pub fn delete_by_id(id: i64) -> Statement {
  Statement {
    sql:  format!("DELETE FROM {TABLE} WHERE id = ?"),
    args: vec![SqlValue::Integer(id)],
  }
}

/// Insert all four optional fields; missing ones become NULL.
pub fn insert(contact: &NewContact) -> Statement {
  Statement {
    sql:  format!(
      "INSERT INTO {TABLE} (first_name, last_name, phone, birthday) VALUES (?, ?, ?, ?)"
    ),
    args: vec![
      contact.first_name.clone().into(),
      contact.last_name.clone().into(),
      contact.phone.clone().into(),
      contact.birthday.into(),
    ],
  }
}

/// Assign only the fields present in `patch`, in column order, to row `id`.
///
/// Fails with [`Error::EmptyUpdate`] when nothing is present.
pub fn update_by_id(id: i64, patch: &ContactPatch) -> Result<Statement> {
  let assignments: Vec<(Column, SqlValue)> = [
    (Column::FirstName, patch.first_name.clone().map(SqlValue::Text)),
    (Column::LastName, patch.last_name.clone().map(SqlValue::Text)),
    (Column::Phone, patch.phone.clone().map(SqlValue::Text)),
    (Column::Birthday, patch.birthday.map(SqlValue::Timestamp)),
  ]
  .into_iter()
  .filter_map(|(col, value)| value.map(|v| (col, v)))
  .collect();

  if assignments.is_empty() {
    return Err(Error::EmptyUpdate);
  }

  let set_clause = assignments
    .iter()
    .map(|(col, _)| format!("{col} = ?"))
    .collect::<Vec<_>>()
    .join(", ");

  let mut args: Vec<SqlValue> = assignments.into_iter().map(|(_, v)| v).collect();
  args.push(SqlValue::Integer(id));

  Ok(Statement {
    sql: format!("UPDATE {TABLE} SET {set_clause} WHERE id = ?"),
    args,
  })
}
