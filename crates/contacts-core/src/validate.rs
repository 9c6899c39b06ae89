//! Validation of raw path and query-string parameters and request bodies.
//!
//! Every function here runs before any store access. A value of `None` means
//! the parameter was not sent; an empty string is treated the same way.

use chrono::Datelike as _;
use serde::Deserialize;

use crate::{
  Error, Result,
  contact::ContactBody,
  query::{BirthdayFilter, Column, Page, SearchQuery, Sort, SortDirection},
};

/// Raw query-string parameters of `GET /contacts`, exactly as received.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSearchParams {
  pub firstname: Option<String>,
  pub lastname:  Option<String>,
  pub birthday:  Option<String>,
  pub limit:     Option<String>,
  pub offset:    Option<String>,
  pub orderby:   Option<String>,
  pub ascending: Option<String>,
}

fn present(raw: Option<&str>) -> Option<&str> { raw.filter(|s| !s.is_empty()) }

/// A contact id: a non-negative integer.
pub fn validate_id(raw: &str) -> Result<i64> {
  raw
    .parse::<i64>()
    .ok()
    .filter(|id| *id >= 0)
    .ok_or_else(|| Error::InvalidId(raw.to_owned()))
}

/// `limit` defaults to [`i64::MAX`] and must be positive; `offset` defaults to
/// zero and must not be negative.
pub fn validate_limit_offset(
  limit: Option<&str>,
  offset: Option<&str>,
) -> Result<Page> {
  let limit = match present(limit) {
    None => i64::MAX,
    Some(s) => s
      .parse::<i64>()
      .ok()
      .filter(|n| *n >= 1)
      .ok_or_else(|| Error::InvalidLimit(s.to_owned()))?,
  };
  let offset = match present(offset) {
    None => 0,
    Some(s) => s
      .parse::<i64>()
      .ok()
      .filter(|n| *n >= 0)
      .ok_or_else(|| Error::InvalidOffset(s.to_owned()))?,
  };
  Ok(Page { limit, offset })
}

/// One of the whitelisted column names; defaults to `id`.
pub fn validate_order_by(raw: Option<&str>) -> Result<Column> {
  present(raw).map_or(Ok(Column::Id), |s| s.parse())
}

/// Exactly `"true"` or `"false"` (case-sensitive); defaults to ascending.
pub fn validate_ascending(raw: Option<&str>) -> Result<SortDirection> {
  match present(raw) {
    None | Some("true") => Ok(SortDirection::Ascending),
    Some("false") => Ok(SortDirection::Descending),
    Some(other) => Err(Error::InvalidAscending(other.to_owned())),
  }
}

/// `"<month>-<day>"`, both parts integers. Absent input means no filter.
pub fn validate_birthday_filter(raw: Option<&str>) -> Result<Option<BirthdayFilter>> {
  let Some(s) = present(raw) else {
    return Ok(None);
  };
  let invalid = || Error::InvalidBirthday(s.to_owned());
  let (month, day) = s.split_once('-').ok_or_else(invalid)?;
  Ok(Some(BirthdayFilter {
    month: month.parse().map_err(|_| invalid())?,
    day:   day.parse().map_err(|_| invalid())?,
  }))
}

/// Birthdays are stored as four-digit-year RFC 3339 text, which cannot hold
/// years before 0000 or after 9999.
pub fn validate_body(body: &ContactBody) -> Result<()> {
  match body.birthday.as_value().map(|b| b.year()) {
    Some(year) if !(0..=9999).contains(&year) => Err(Error::BirthdayOutOfRange(year)),
    _ => Ok(()),
  }
}

/// Run every search validator in turn, stopping at the first failure.
pub fn validate_search(params: &RawSearchParams) -> Result<SearchQuery> {
  let birthday = validate_birthday_filter(params.birthday.as_deref())?;
  let page = validate_limit_offset(params.limit.as_deref(), params.offset.as_deref())?;
  let column = validate_order_by(params.orderby.as_deref())?;
  let direction = validate_ascending(params.ascending.as_deref())?;

  Ok(SearchQuery {
    first_name_prefix: present(params.firstname.as_deref()).map(str::to_owned),
    last_name_prefix: present(params.lastname.as_deref()).map(str::to_owned),
    birthday,
    sort: Sort { column, direction },
    page,
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn id() {
    assert_eq!(validate_id("56"), Ok(56));
    assert_eq!(validate_id("0"), Ok(0));
    assert!(validate_id("not-a-number").is_err());
    assert!(validate_id("-1").is_err());
    assert!(validate_id("").is_err());
    assert!(validate_id("1.5").is_err());
    assert!(validate_id("99999999999999999999").is_err());
  }

  #[test]
  fn limit_and_offset_defaults() {
    assert_eq!(
      validate_limit_offset(None, None),
      Ok(Page { limit: i64::MAX, offset: 0 })
    );
    assert_eq!(
      validate_limit_offset(Some(""), Some("")),
      Ok(Page { limit: i64::MAX, offset: 0 })
    );
  }

  #[test]
  fn limit_and_offset_bounds() {
    assert_eq!(
      validate_limit_offset(Some("20"), Some("60")),
      Ok(Page { limit: 20, offset: 60 })
    );
    assert_eq!(
      validate_limit_offset(Some("0"), None),
      Err(Error::InvalidLimit("0".into()))
    );
    assert_eq!(
      validate_limit_offset(Some("ten"), None),
      Err(Error::InvalidLimit("ten".into()))
    );
    assert_eq!(
      validate_limit_offset(None, Some("-1")),
      Err(Error::InvalidOffset("-1".into()))
    );
    assert!(validate_limit_offset(None, Some("0")).is_ok());
  }

  #[test]
  fn order_by() {
    assert_eq!(validate_order_by(None), Ok(Column::Id));
    assert_eq!(validate_order_by(Some("birthday")), Ok(Column::Birthday));
    assert_eq!(validate_order_by(Some("last_name")), Ok(Column::LastName));
    assert_eq!(
      validate_order_by(Some("INVALID")),
      Err(Error::InvalidOrderBy("INVALID".into()))
    );
  }

  #[test]
  fn ascending() {
    assert_eq!(validate_ascending(None), Ok(SortDirection::Ascending));
    assert_eq!(validate_ascending(Some("true")), Ok(SortDirection::Ascending));
    assert_eq!(validate_ascending(Some("false")), Ok(SortDirection::Descending));
    assert!(validate_ascending(Some("TRUE")).is_err());
    assert!(validate_ascending(Some("INVALID")).is_err());
  }

  #[test]
  fn birthday_filter() {
    assert_eq!(validate_birthday_filter(None), Ok(None));
    assert_eq!(
      validate_birthday_filter(Some("11-29")),
      Ok(Some(BirthdayFilter { month: 11, day: 29 }))
    );
    assert_eq!(
      validate_birthday_filter(Some("03-02")),
      Ok(Some(BirthdayFilter { month: 3, day: 2 }))
    );
    // Ranges are not checked.
    assert_eq!(
      validate_birthday_filter(Some("13-40")),
      Ok(Some(BirthdayFilter { month: 13, day: 40 }))
    );
    assert!(validate_birthday_filter(Some("1129")).is_err());
    assert!(validate_birthday_filter(Some("-29")).is_err());
    assert!(validate_birthday_filter(Some("11-x")).is_err());
  }

  #[test]
  fn body_birthday_year_range() {
    let body = |json: &str| serde_json::from_str::<ContactBody>(json).unwrap();

    assert_eq!(validate_body(&body("{}")), Ok(()));
    assert_eq!(validate_body(&body(r#"{"birthday": null}"#)), Ok(()));
    assert_eq!(
      validate_body(&body(r#"{"birthday": "0000-01-01T00:00:00Z"}"#)),
      Ok(())
    );
    assert_eq!(
      validate_body(&body(r#"{"birthday": "9999-12-31T23:59:59Z"}"#)),
      Ok(())
    );
    assert_eq!(
      validate_body(&body(r#"{"birthday": "+10000-01-01T00:00:00Z"}"#)),
      Err(Error::BirthdayOutOfRange(10000))
    );
    assert_eq!(
      validate_body(&body(r#"{"birthday": "-0001-01-01T00:00:00Z"}"#)),
      Err(Error::BirthdayOutOfRange(-1))
    );
  }

  #[test]
  fn search_stops_at_first_failure() {
    let params = RawSearchParams {
      birthday: Some("bad".into()),
      orderby: Some("INVALID".into()),
      ..Default::default()
    };
    assert_eq!(
      validate_search(&params),
      Err(Error::InvalidBirthday("bad".into()))
    );
  }

  #[test]
  fn search_collects_every_parameter() {
    let params = RawSearchParams {
      firstname: Some("Ji".into()),
      lastname:  Some(String::new()),
      birthday:  Some("3-2".into()),
      limit:     Some("5".into()),
      offset:    None,
      orderby:   Some("phone".into()),
      ascending: Some("false".into()),
    };
    let query = validate_search(&params).unwrap();
    assert_eq!(query.first_name_prefix.as_deref(), Some("Ji"));
    assert_eq!(query.last_name_prefix, None);
    assert_eq!(query.birthday, Some(BirthdayFilter { month: 3, day: 2 }));
    assert_eq!(query.page, Page { limit: 5, offset: 0 });
    assert_eq!(
      query.sort,
      Sort { column: Column::Phone, direction: SortDirection::Descending }
    );
  }
}
