//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::{TimeZone, Utc};
use contacts_core::{
  contact::{ContactPatch, NewContact},
  query::{self, BirthdayFilter, Column, Page, SearchQuery, Sort, SortDirection},
  store::ContactStore,
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn person(first: &str, last: &str, birthday: (i32, u32, u32)) -> NewContact {
  let (y, m, d) = birthday;
  NewContact {
    first_name: Some(first.into()),
    last_name:  Some(last.into()),
    phone:      Some(format!("+49 {y}{m}{d}")),
    birthday:   Some(Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()),
  }
}

async fn insert(s: &SqliteStore, c: &NewContact) -> i64 {
  let exec = s.execute(query::insert(c)).await.unwrap();
  assert_eq!(exec.rows_affected, 1);
  exec.last_insert_id
}

async fn seed(s: &SqliteStore) {
  insert(s, &person("Erika", "Mustermann", (1969, 3, 2))).await;
  insert(s, &person("Erik", "Meier", (1980, 3, 2))).await;
  insert(s, &person("Hans", "Wurst", (1972, 6, 6))).await;
  insert(s, &person("Jim", "Smith", (1990, 11, 29))).await;
}

// ─── Insert / select ─────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_assigns_increasing_ids() {
  let s = store().await;
  let a = insert(&s, &NewContact::default()).await;
  let b = insert(&s, &NewContact::default()).await;
  assert!(b > a);
}

#[tokio::test]
async fn insert_and_select_roundtrip() {
  let s = store().await;
  let input = person("Erika", "Mustermann", (1969, 3, 2));
  let id = insert(&s, &input).await;

  let rows = s.fetch(query::select_by_id(id)).await.unwrap();
  assert_eq!(rows, vec![input.with_id(id)]);
}

#[tokio::test]
async fn missing_fields_are_stored_as_null() {
  let s = store().await;
  let id = insert(&s, &NewContact {
    phone: Some(String::new()),
    ..Default::default()
  })
  .await;

  let contact = s.fetch(query::select_by_id(id)).await.unwrap().remove(0);
  assert_eq!(contact.first_name, None);
  assert_eq!(contact.phone.as_deref(), Some(""));
  assert_eq!(contact.birthday, None);
}

#[tokio::test]
async fn select_missing_id_returns_nothing() {
  let s = store().await;
  assert!(s.fetch(query::select_by_id(9999)).await.unwrap().is_empty());
}

// ─── Update ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn partial_update_keeps_other_fields() {
  let s = store().await;
  let input = person("Erika", "Mustermann", (1969, 3, 2));
  let id = insert(&s, &input).await;

  let new_birthday = Utc.with_ymd_and_hms(1960, 4, 13, 0, 0, 0).unwrap();
  let patch = ContactPatch { birthday: Some(new_birthday), ..Default::default() };
  let exec = s.execute(query::update_by_id(id, &patch).unwrap()).await.unwrap();
  assert_eq!(exec.rows_affected, 1);

  let after = s.fetch(query::select_by_id(id)).await.unwrap().remove(0);
  assert_eq!(after.birthday, Some(new_birthday));
  assert_eq!(after.first_name, input.first_name);
  assert_eq!(after.last_name, input.last_name);
  assert_eq!(after.phone, input.phone);
}

#[tokio::test]
async fn update_missing_id_affects_no_rows() {
  let s = store().await;
  let patch = ContactPatch { phone: Some("0".into()), ..Default::default() };
  let exec = s.execute(query::update_by_id(42, &patch).unwrap()).await.unwrap();
  assert_eq!(exec.rows_affected, 0);
}

// ─── Delete ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_removes_row() {
  let s = store().await;
  let id = insert(&s, &person("Hans", "Wurst", (1972, 6, 6))).await;

  let exec = s.execute(query::delete_by_id(id)).await.unwrap();
  assert_eq!(exec.rows_affected, 1);
  assert!(s.fetch(query::select_by_id(id)).await.unwrap().is_empty());

  let again = s.execute(query::delete_by_id(id)).await.unwrap();
  assert_eq!(again.rows_affected, 0);
}

// ─── Search ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn search_without_filters_returns_all_by_id() {
  let s = store().await;
  seed(&s).await;

  let rows = s.fetch(SearchQuery::default().to_statement()).await.unwrap();
  let ids: Vec<i64> = rows.iter().map(|c| c.id).collect();
  assert_eq!(ids.len(), 4);
  assert!(ids.windows(2).all(|w| w[0] < w[1]));
}

#[tokio::test]
async fn search_by_first_name_prefix() {
  let s = store().await;
  seed(&s).await;

  let query = SearchQuery {
    first_name_prefix: Some("Erik".into()),
    ..Default::default()
  };
  let rows = s.fetch(query.to_statement()).await.unwrap();
  let names: Vec<_> = rows.iter().filter_map(|c| c.first_name.as_deref()).collect();
  assert_eq!(names, ["Erika", "Erik"]);
}

#[tokio::test]
async fn search_prefix_wildcards_match_literally() {
  let s = store().await;
  seed(&s).await;
  insert(&s, &person("E_k", "Underscore", (2000, 1, 1))).await;

  let query = SearchQuery {
    first_name_prefix: Some("E_".into()),
    ..Default::default()
  };
  let rows = s.fetch(query.to_statement()).await.unwrap();
  assert_eq!(rows.len(), 1);
  assert_eq!(rows[0].last_name.as_deref(), Some("Underscore"));
}

#[tokio::test]
async fn search_combines_name_and_birthday() {
  let s = store().await;
  seed(&s).await;

  let query = SearchQuery {
    first_name_prefix: Some("Eri".into()),
    last_name_prefix:  Some("Me".into()),
    birthday:          Some(BirthdayFilter { month: 3, day: 2 }),
    ..Default::default()
  };
  let rows = s.fetch(query.to_statement()).await.unwrap();
  assert_eq!(rows.len(), 1);
  assert_eq!(rows[0].first_name.as_deref(), Some("Erik"));
}

#[tokio::test]
async fn search_by_birthday_ignores_year() {
  let s = store().await;
  seed(&s).await;

  let query = SearchQuery {
    birthday: Some(BirthdayFilter { month: 3, day: 2 }),
    ..Default::default()
  };
  let rows = s.fetch(query.to_statement()).await.unwrap();
  assert_eq!(rows.len(), 2);

  let none = SearchQuery {
    birthday: Some(BirthdayFilter { month: 13, day: 2 }),
    ..Default::default()
  };
  assert!(s.fetch(none.to_statement()).await.unwrap().is_empty());
}

#[tokio::test]
async fn search_sorted_by_birthday_descending() {
  let s = store().await;
  seed(&s).await;

  let query = SearchQuery {
    sort: Sort { column: Column::Birthday, direction: SortDirection::Descending },
    ..Default::default()
  };
  let rows = s.fetch(query.to_statement()).await.unwrap();
  let birthdays: Vec<_> = rows.iter().map(|c| c.birthday.unwrap()).collect();
  assert_eq!(birthdays.len(), 4);
  assert!(birthdays.windows(2).all(|w| w[0] >= w[1]));
}

#[tokio::test]
async fn search_pages_with_limit_and_offset() {
  let s = store().await;
  seed(&s).await;

  let query = SearchQuery {
    sort: Sort { column: Column::LastName, direction: SortDirection::Ascending },
    page: Page { limit: 2, offset: 1 },
    ..Default::default()
  };
  let rows = s.fetch(query.to_statement()).await.unwrap();
  let names: Vec<_> = rows.iter().filter_map(|c| c.last_name.as_deref()).collect();
  assert_eq!(names, ["Mustermann", "Smith"]);
}

// ─── Scripts ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn run_script_executes_every_statement() {
  let s = store().await;
  s.run_script(
    "INSERT INTO contacts (first_name) VALUES ('A');
     INSERT INTO contacts (first_name) VALUES ('B');",
  )
  .await
  .unwrap();

  let rows = s.fetch(SearchQuery::default().to_statement()).await.unwrap();
  assert_eq!(rows.len(), 2);
}

#[tokio::test]
async fn script_inserted_plain_dates_are_readable_and_searchable() {
  let s = store().await;
  s.run_script(
    "INSERT INTO contacts (first_name, birthday) VALUES ('Erika', '1969-03-02');",
  )
  .await
  .unwrap();

  let query = SearchQuery {
    birthday: Some(BirthdayFilter { month: 3, day: 2 }),
    ..Default::default()
  };
  let rows = s.fetch(query.to_statement()).await.unwrap();
  assert_eq!(rows.len(), 1);
  assert_eq!(
    rows[0].birthday,
    Some(Utc.with_ymd_and_hms(1969, 3, 2, 0, 0, 0).unwrap())
  );
}

#[tokio::test]
async fn reopening_schema_is_idempotent() {
  let s = store().await;
  s.run_script(crate::schema::SCHEMA).await.unwrap();
}
