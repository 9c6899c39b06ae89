//! The contact record and the request bodies that create or modify it.
//!
//! Every field except `id` is optional. Request bodies distinguish a key that
//! is missing from a key that is explicitly `null` (see [`Field`]), though
//! both mean "not provided" when applying an update.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

// ─── Stored record ───────────────────────────────────────────────────────────

/// A person we know, as stored and returned by the service.
///
/// Absent fields serialize as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
  pub id:         i64,
  #[serde(rename = "firstname", default)]
  pub first_name: Option<String>,
  #[serde(rename = "lastname", default)]
  pub last_name:  Option<String>,
  #[serde(default)]
  pub phone:      Option<String>,
  #[serde(default)]
  pub birthday:   Option<DateTime<Utc>>,
}

// ─── Tri-state field ─────────────────────────────────────────────────────────

/// A JSON body field that may be missing, `null`, or carry a value.
///
/// Use with `#[serde(default)]` so a missing key deserializes as
/// [`Field::Absent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field<T> {
  Absent,
  Null,
  Value(T),
}

impl<T> Default for Field<T> {
  fn default() -> Self { Self::Absent }
}

impl<T> Field<T> {
  pub fn as_value(&self) -> Option<&T> {
    match self {
      Self::Value(v) => Some(v),
      Self::Absent | Self::Null => None,
    }
  }

  pub fn into_option(self) -> Option<T> {
    match self {
      Self::Value(v) => Some(v),
      Self::Absent | Self::Null => None,
    }
  }
}

impl<'de, T> Deserialize<'de> for Field<T>
where
  T: Deserialize<'de>,
{
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where
    D: Deserializer<'de>,
  {
    Ok(match Option::<T>::deserialize(deserializer)? {
      Some(v) => Self::Value(v),
      None => Self::Null,
    })
  }
}

// ─── Request bodies ──────────────────────────────────────────────────────────

/// JSON body accepted by `POST /contacts` and `PUT /contacts/{id}`.
///
/// Unknown keys (including `id`) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ContactBody {
  #[serde(rename = "firstname", default)]
  pub first_name: Field<String>,
  #[serde(rename = "lastname", default)]
  pub last_name:  Field<String>,
  #[serde(default)]
  pub phone:      Field<String>,
  #[serde(default)]
  pub birthday:   Field<DateTime<Utc>>,
}

/// The values to insert for a new contact. Missing fields are stored as NULL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewContact {
  pub first_name: Option<String>,
  pub last_name:  Option<String>,
  pub phone:      Option<String>,
  pub birthday:   Option<DateTime<Utc>>,
}

impl NewContact {
  /// The record the store holds once it has assigned `id`.
  pub fn with_id(self, id: i64) -> Contact {
    Contact {
      id,
      first_name: self.first_name,
      last_name: self.last_name,
      phone: self.phone,
      birthday: self.birthday,
    }
  }
}

impl From<ContactBody> for NewContact {
  fn from(b: ContactBody) -> Self {
    NewContact {
      first_name: b.first_name.into_option(),
      last_name:  b.last_name.into_option(),
      phone:      b.phone.into_option(),
      birthday:   b.birthday.into_option(),
    }
  }
}

/// The subset of fields a `PUT` changes. `None` leaves the stored value as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactPatch {
  pub first_name: Option<String>,
  pub last_name:  Option<String>,
  pub phone:      Option<String>,
  pub birthday:   Option<DateTime<Utc>>,
}

impl ContactPatch {
  pub fn is_empty(&self) -> bool {
    self.first_name.is_none()
      && self.last_name.is_none()
      && self.phone.is_none()
      && self.birthday.is_none()
  }
}

impl From<ContactBody> for ContactPatch {
  fn from(b: ContactBody) -> Self {
    ContactPatch {
      first_name: b.first_name.into_option(),
      last_name:  b.last_name.into_option(),
      phone:      b.phone.into_option(),
      birthday:   b.birthday.into_option(),
    }
  }
}
