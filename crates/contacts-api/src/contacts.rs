//! Handlers for `/contacts` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/contacts` | Optional `firstname`, `lastname`, `birthday=MM-DD`, `limit`, `offset`, `orderby`, `ascending`; 404 when nothing matches |
//! | `POST`   | `/contacts` | Body: [`ContactBody`]; returns 201 + stored contact |
//! | `GET`    | `/contacts/{id}` | 404 if missing or the id is malformed |
//! | `PUT`    | `/contacts/{id}` | Body: [`ContactBody`]; only present fields change |
//! | `DELETE` | `/contacts/{id}` | 200 + confirmation message |
//!
//! Every handler validates its input completely before touching the store.

use std::sync::Arc;

use axum::{
  Json,
  extract::{
    Path, Query, State,
    rejection::{JsonRejection, QueryRejection},
  },
  http::StatusCode,
  response::IntoResponse,
};
use contacts_core::{
  contact::{Contact, ContactBody, ContactPatch, NewContact},
  query,
  store::{ContactStore, Execution},
  validate::{RawSearchParams, validate_body, validate_id, validate_search},
};
use serde_json::{Value, json};

use crate::error::ApiError;

fn bad_request(e: contacts_core::Error) -> ApiError { ApiError::BadRequest(e.to_string()) }

fn not_found(e: contacts_core::Error) -> ApiError { ApiError::NotFound(e.to_string()) }

async fn fetch_one<S: ContactStore>(store: &S, id: i64) -> Result<Contact, ApiError> {
  store
    .fetch(query::select_by_id(id))
    .await
    .map_err(ApiError::store)?
    .into_iter()
    .next()
    .ok_or_else(ApiError::contact_not_found)
}

/// Map the row count of a statement keyed on `id` to an outcome.
fn single_row(id: i64, exec: Execution) -> Result<(), ApiError> {
  match exec.rows_affected {
    0 => Err(ApiError::contact_not_found()),
    1 => Ok(()),
    n => {
      tracing::warn!(id, rows = n, "statement keyed on id touched several rows");
      Err(ApiError::Internal(
        contacts_core::Error::UnexpectedRowCount(n).to_string(),
      ))
    }
  }
}

// ─── List / search ───────────────────────────────────────────────────────────

/// `GET /contacts[?firstname=..][&lastname=..][&birthday=MM-DD][&limit=..][&offset=..][&orderby=..][&ascending=..]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  params: Result<Query<RawSearchParams>, QueryRejection>,
) -> Result<Json<Vec<Contact>>, ApiError>
where
  S: ContactStore,
{
  let Query(params) = params?;
  let search = validate_search(&params).map_err(bad_request)?;

  let contacts = store
    .fetch(search.to_statement())
    .await
    .map_err(ApiError::store)?;

  if contacts.is_empty() {
    return Err(ApiError::contact_not_found());
  }
  Ok(Json(contacts))
}

// ─── Create ──────────────────────────────────────────────────────────────────

/// `POST /contacts` — returns 201 + the contact with its assigned `id`.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  body: Result<Json<ContactBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ContactStore,
{
  let Json(body) = body?;
  validate_body(&body).map_err(bad_request)?;
  let new_contact = NewContact::from(body);

  let exec = store
    .execute(query::insert(&new_contact))
    .await
    .map_err(ApiError::store)?;

  tracing::info!(id = exec.last_insert_id, "contact created");
  Ok((StatusCode::CREATED, Json(new_contact.with_id(exec.last_insert_id))))
}

// ─── Get one ─────────────────────────────────────────────────────────────────

/// `GET /contacts/{id}`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(raw_id): Path<String>,
) -> Result<Json<Contact>, ApiError>
where
  S: ContactStore,
{
  let id = validate_id(&raw_id).map_err(not_found)?;
  Ok(Json(fetch_one(&*store, id).await?))
}

// ─── Update ──────────────────────────────────────────────────────────────────

/// `PUT /contacts/{id}` — returns the contact as stored after the update.
///
/// An update with no fields is rejected before the id is looked at.
pub async fn update_one<S>(
  State(store): State<Arc<S>>,
  Path(raw_id): Path<String>,
  body: Result<Json<ContactBody>, JsonRejection>,
) -> Result<Json<Contact>, ApiError>
where
  S: ContactStore,
{
  let Json(body) = body?;
  validate_body(&body).map_err(bad_request)?;
  let patch = ContactPatch::from(body);
  if patch.is_empty() {
    return Err(bad_request(contacts_core::Error::EmptyUpdate));
  }

  let id = validate_id(&raw_id).map_err(not_found)?;
  let statement = query::update_by_id(id, &patch).map_err(bad_request)?;

  let exec = store.execute(statement).await.map_err(ApiError::store)?;
  single_row(id, exec)?;

  tracing::info!(id, "contact updated");
  Ok(Json(fetch_one(&*store, id).await?))
}

// ─── Delete ──────────────────────────────────────────────────────────────────

/// `DELETE /contacts/{id}` — hard delete.
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(raw_id): Path<String>,
) -> Result<Json<Value>, ApiError>
where
  S: ContactStore,
{
  let id = validate_id(&raw_id).map_err(not_found)?;

  let exec = store
    .execute(query::delete_by_id(id))
    .await
    .map_err(ApiError::store)?;
  single_row(id, exec)?;

  tracing::info!(id, "contact deleted");
  Ok(Json(json!({ "message": "contact deleted" })))
}
