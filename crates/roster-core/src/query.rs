//! In-memory search and ordering over person listings.
//!
//! Field names are the ones the listing page sends (`PersonName`, `Email`,
//! ...). Unknown names are not errors: filtering falls back to everything and
//! sorting leaves the input untouched.

use std::{borrow::Cow, cmp::Ordering};

use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::{dto::PersonResponse, entity::Gender};

/// Rendering of a date of birth that searches match against,
/// e.g. `01 January 2000`.
pub const DATE_SEARCH_FORMAT: &str = "%d %B %Y";

// ─── Sort order ──────────────────────────────────────────────────────────────

#[derive(
  Debug, Clone, Copy, Default, PartialEq, Eq, Display, AsRefStr, EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum SortOrder {
  #[default]
  #[strum(to_string = "ASC")]
  Asc,
  #[strum(to_string = "DESC")]
  Desc,
}

impl SortOrder {
  /// Parse leniently; anything unrecognised is ascending.
  pub fn parse_or_default(s: Option<&str>) -> Self {
    s.and_then(|s| s.parse().ok()).unwrap_or_default()
  }

  pub fn toggled(self) -> Self {
    match self {
      Self::Asc => Self::Desc,
      Self::Desc => Self::Asc,
    }
  }
}

// ─── Search ──────────────────────────────────────────────────────────────────

/// Fields a listing can be searched by.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr, EnumString, EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum SearchField {
  PersonName,
  Email,
  DateOfBirth,
  Gender,
  /// Matches against the resolved country name.
  #[strum(to_string = "CountryID", serialize = "Country")]
  Country,
  Address,
}

impl SearchField {
  /// Human-readable label for the search drop-down.
  pub fn label(self) -> &'static str {
    match self {
      Self::PersonName => "Person Name",
      Self::Email => "Email",
      Self::DateOfBirth => "Date of Birth",
      Self::Gender => "Gender",
      Self::Country => "Country",
      Self::Address => "Address",
    }
  }

  fn value_of(self, p: &PersonResponse) -> Option<Cow<'_, str>> {
    match self {
      Self::PersonName => p.person_name.as_deref().map(Cow::Borrowed),
      Self::Email => p.email.as_deref().map(Cow::Borrowed),
      Self::DateOfBirth => p
        .date_of_birth
        .map(|d| Cow::Owned(d.format(DATE_SEARCH_FORMAT).to_string())),
      Self::Gender => p.gender.map(|g| Cow::Borrowed(g.label())),
      Self::Country => p.country.as_deref().map(Cow::Borrowed),
      Self::Address => p.address.as_deref().map(Cow::Borrowed),
    }
  }
}

/// Keep the persons whose `search_by` field contains `search_string`,
/// ignoring case. An empty or absent search string, or an unknown field,
/// keeps everything.
pub fn filter_persons(
  persons: Vec<PersonResponse>,
  search_by: &str,
  search_string: Option<&str>,
) -> Vec<PersonResponse> {
  let Some(needle) = search_string.filter(|s| !s.is_empty()) else {
    return persons;
  };
  let Ok(field) = search_by.parse::<SearchField>() else {
    return persons;
  };

  let needle = needle.to_lowercase();
  persons
    .into_iter()
    .filter(|p| {
      field
        .value_of(p)
        .is_some_and(|v| v.to_lowercase().contains(&needle))
    })
    .collect()
}

// ─── Sort ────────────────────────────────────────────────────────────────────

/// Fields a listing can be ordered by.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr, EnumString, EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum SortField {
  PersonName,
  Email,
  DateOfBirth,
  Age,
  Gender,
  #[strum(to_string = "Country", serialize = "CountryID")]
  Country,
  Address,
  ReceiveNewsLetters,
}

impl SortField {
  /// Column heading on the listing page.
  pub fn label(self) -> &'static str {
    match self {
      Self::PersonName => "Person Name",
      Self::Email => "Email",
      Self::DateOfBirth => "Date of Birth",
      Self::Age => "Age",
      Self::Gender => "Gender",
      Self::Country => "Country",
      Self::Address => "Address",
      Self::ReceiveNewsLetters => "Receive News Letters",
    }
  }

  fn compare(self, a: &PersonResponse, b: &PersonResponse) -> Ordering {
    match self {
      Self::PersonName => cmp_text(&a.person_name, &b.person_name),
      Self::Email => cmp_text(&a.email, &b.email),
      Self::DateOfBirth => a.date_of_birth.cmp(&b.date_of_birth),
      Self::Age => a.age.cmp(&b.age),
      Self::Gender => {
        cmp_labels(a.gender.map(Gender::label), b.gender.map(Gender::label))
      }
      Self::Country => cmp_text(&a.country, &b.country),
      Self::Address => cmp_text(&a.address, &b.address),
      Self::ReceiveNewsLetters => {
        a.receive_news_letters.cmp(&b.receive_news_letters)
      }
    }
  }
}

fn cmp_text(a: &Option<String>, b: &Option<String>) -> Ordering {
  cmp_labels(a.as_deref(), b.as_deref())
}

/// Case-insensitive comparison; absent values order first.
fn cmp_labels(a: Option<&str>, b: Option<&str>) -> Ordering {
  match (a, b) {
    (None, None) => Ordering::Equal,
    (None, Some(_)) => Ordering::Less,
    (Some(_), None) => Ordering::Greater,
    (Some(a), Some(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
  }
}

/// Order `persons` by `sort_by`. Stable; an unknown field returns the input
/// as-is.
pub fn sort_persons(
  mut persons: Vec<PersonResponse>,
  sort_by: &str,
  order: SortOrder,
) -> Vec<PersonResponse> {
  let Ok(field) = sort_by.parse::<SortField>() else {
    return persons;
  };

  persons.sort_by(|a, b| {
    let ord = field.compare(a, b);
    match order {
      SortOrder::Asc => ord,
      SortOrder::Desc => ord.reverse(),
    }
  });
  persons
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;
  use uuid::Uuid;

  use super::*;

  fn person(name: &str, country: Option<&str>, dob: Option<(i32, u32, u32)>) -> PersonResponse {
    PersonResponse {
      person_id:            Uuid::new_v4(),
      person_name:          Some(name.into()),
      email:                Some(format!("{}@example.com", name.to_lowercase())),
      date_of_birth:        dob.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
      gender:               Some(Gender::Other),
      country_id:           None,
      country:              country.map(Into::into),
      address:              Some("Somewhere".into()),
      receive_news_letters: false,
      age:                  None,
    }
  }

  fn names(persons: &[PersonResponse]) -> Vec<&str> {
    persons
      .iter()
      .map(|p| p.person_name.as_deref().unwrap_or_default())
      .collect()
  }

  #[test]
  fn filter_by_name_is_case_insensitive() {
    let all = vec![person("Anna", None, None), person("Bob", None, None)];
    let hits = filter_persons(all, "PersonName", Some("an"));
    assert_eq!(names(&hits), ["Anna"]);
  }

  #[test]
  fn empty_search_or_unknown_field_returns_everything() {
    let all = vec![person("Anna", None, None), person("Bob", None, None)];
    assert_eq!(filter_persons(all.clone(), "PersonName", None).len(), 2);
    assert_eq!(filter_persons(all.clone(), "PersonName", Some("")).len(), 2);
    assert_eq!(filter_persons(all, "ShoeSize", Some("zz")).len(), 2);
  }

  #[test]
  fn filter_by_country_matches_resolved_name() {
    let all = vec![
      person("Anna", Some("Finland"), None),
      person("Bob", Some("Canada"), None),
      person("Cleo", None, None),
    ];
    let hits = filter_persons(all.clone(), "CountryID", Some("fin"));
    assert_eq!(names(&hits), ["Anna"]);
    let hits = filter_persons(all, "Country", Some("CAN"));
    assert_eq!(names(&hits), ["Bob"]);
  }

  #[test]
  fn filter_by_date_uses_long_month_format() {
    let all = vec![
      person("Anna", None, Some((2000, 1, 1))),
      person("Bob", None, Some((1999, 3, 4))),
    ];
    let hits = filter_persons(all, "DateOfBirth", Some("january"));
    assert_eq!(names(&hits), ["Anna"]);
  }

  #[test]
  fn sort_by_name_descending() {
    let all = vec![
      person("bob", None, None),
      person("Anna", None, None),
      person("Carl", None, None),
    ];
    let sorted = sort_persons(all, "PersonName", SortOrder::Desc);
    assert_eq!(names(&sorted), ["Carl", "bob", "Anna"]);
  }

  #[test]
  fn sort_puts_missing_values_first_ascending() {
    let all = vec![
      person("Anna", Some("Peru"), None),
      person("Bob", None, None),
      person("Carl", Some("Chile"), None),
    ];
    let sorted = sort_persons(all, "Country", SortOrder::Asc);
    assert_eq!(names(&sorted), ["Bob", "Carl", "Anna"]);
  }

  #[test]
  fn sort_by_unknown_field_is_a_no_op() {
    let all = vec![person("Carl", None, None), person("Anna", None, None)];
    let sorted = sort_persons(all.clone(), "Shoe", SortOrder::Desc);
    assert_eq!(sorted, all);
  }

  #[test]
  fn sort_order_parsing_is_lenient() {
    assert_eq!(SortOrder::parse_or_default(Some("desc")), SortOrder::Desc);
    assert_eq!(SortOrder::parse_or_default(Some("DESC")), SortOrder::Desc);
    assert_eq!(SortOrder::parse_or_default(Some("sideways")), SortOrder::Asc);
    assert_eq!(SortOrder::parse_or_default(None), SortOrder::Asc);
    assert_eq!(SortOrder::Asc.toggled().to_string(), "DESC");
  }
}
