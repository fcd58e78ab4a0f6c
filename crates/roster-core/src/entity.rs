//! Stored row shapes.
//!
//! These are what the persistence layer reads and writes. They never cross
//! the HTTP boundary directly; see [`crate::dto`] for the request and
//! response shapes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};
use uuid::Uuid;

// ─── Country ─────────────────────────────────────────────────────────────────

/// A row of the `countries` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
  /// Assigned by the service on creation; never changes afterwards.
  pub country_id:   Uuid,
  pub country_name: String,
}

// ─── Person ──────────────────────────────────────────────────────────────────

/// The fixed set of gender options a person may carry.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
  Serialize,
  Deserialize,
  Display,
  AsRefStr,
  EnumString,
  EnumIter,
  IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
pub enum Gender {
  Male,
  Female,
  Other,
}

impl Gender {
  pub fn label(self) -> &'static str { self.into() }
}

/// A row of the `persons` table.
///
/// `country_id` is a weak reference: the person does not own the country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
  pub person_id:            Uuid,
  pub person_name:          Option<String>,
  pub email:                Option<String>,
  pub date_of_birth:        Option<NaiveDate>,
  pub gender:               Option<Gender>,
  pub country_id:           Option<Uuid>,
  pub address:              Option<String>,
  pub receive_news_letters: bool,
}

#[cfg(test)]
mod tests {
  use std::str::FromStr;

  use super::*;

  #[test]
  fn gender_parses_case_insensitively() {
    assert_eq!(Gender::from_str("female").unwrap(), Gender::Female);
    assert_eq!(Gender::from_str("OTHER").unwrap(), Gender::Other);
    assert!(Gender::from_str("unknown").is_err());
  }

  #[test]
  fn gender_label_is_variant_name() {
    assert_eq!(Gender::Male.to_string(), "Male");
    assert_eq!(Gender::Female.as_ref(), "Female");
  }
}
