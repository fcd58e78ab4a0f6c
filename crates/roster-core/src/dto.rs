//! Request and response shapes used across the service boundary.
//!
//! Request types carry their field rules as `validator` attributes; the
//! services run them before touching the store.

use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::entity::{Country, Gender, Person};

/// Oldest plausible birth year accepted for `date_of_birth`.
const EARLIEST_BIRTH_YEAR: i32 = 1900;

// ─── Country ─────────────────────────────────────────────────────────────────

/// Input to [`crate::service::CountriesService::add_country`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CountryAddRequest {
  #[validate(
    required(message = "Country Name can't be blank"),
    length(min = 1, message = "Country Name can't be blank")
  )]
  pub country_name: Option<String>,
}

impl CountryAddRequest {
  pub fn new(country_name: impl Into<String>) -> Self {
    Self { country_name: Some(country_name.into()) }
  }

  /// Build the entity. The id is supplied by the caller.
  pub fn into_country(self, country_id: Uuid) -> Country {
    Country {
      country_id,
      country_name: self.country_name.unwrap_or_default(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryResponse {
  pub country_id:   Uuid,
  pub country_name: String,
}

impl From<Country> for CountryResponse {
  fn from(c: Country) -> Self {
    Self { country_id: c.country_id, country_name: c.country_name }
  }
}

// ─── Person requests ─────────────────────────────────────────────────────────

/// Input to [`crate::service::PersonsService::add_person`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct PersonAddRequest {
  #[validate(
    required(message = "Person Name can't be blank"),
    length(min = 1, message = "Person Name can't be blank")
  )]
  pub person_name:          Option<String>,
  #[validate(
    required(message = "Email can't be blank"),
    email(message = "Email value should be a valid email")
  )]
  pub email:                Option<String>,
  #[validate(custom(function = "validate_date_of_birth"))]
  pub date_of_birth:        Option<NaiveDate>,
  #[validate(required(message = "Please select gender of the person"))]
  pub gender:               Option<Gender>,
  #[validate(required(message = "Please select a country"))]
  pub country_id:           Option<Uuid>,
  #[validate(
    required(message = "Address can't be blank"),
    length(min = 1, message = "Address can't be blank")
  )]
  pub address:              Option<String>,
  #[serde(default)]
  pub receive_news_letters: bool,
}

impl PersonAddRequest {
  pub fn into_person(self, person_id: Uuid) -> Person {
    Person {
      person_id,
      person_name: self.person_name,
      email: self.email,
      date_of_birth: self.date_of_birth,
      gender: self.gender,
      country_id: self.country_id,
      address: self.address,
      receive_news_letters: self.receive_news_letters,
    }
  }
}

/// Input to [`crate::service::PersonsService::update_person`]. Carries the
/// same rules as [`PersonAddRequest`] plus the id of the row to overwrite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct PersonUpdateRequest {
  pub person_id:            Uuid,
  #[validate(
    required(message = "Person Name can't be blank"),
    length(min = 1, message = "Person Name can't be blank")
  )]
  pub person_name:          Option<String>,
  #[validate(
    required(message = "Email can't be blank"),
    email(message = "Email value should be a valid email")
  )]
  pub email:                Option<String>,
  #[validate(custom(function = "validate_date_of_birth"))]
  pub date_of_birth:        Option<NaiveDate>,
  #[validate(required(message = "Please select gender of the person"))]
  pub gender:               Option<Gender>,
  #[validate(required(message = "Please select a country"))]
  pub country_id:           Option<Uuid>,
  #[validate(
    required(message = "Address can't be blank"),
    length(min = 1, message = "Address can't be blank")
  )]
  pub address:              Option<String>,
  #[serde(default)]
  pub receive_news_letters: bool,
}

impl PersonUpdateRequest {
  pub fn into_person(self) -> Person {
    Person {
      person_id: self.person_id,
      person_name: self.person_name,
      email: self.email,
      date_of_birth: self.date_of_birth,
      gender: self.gender,
      country_id: self.country_id,
      address: self.address,
      receive_news_letters: self.receive_news_letters,
    }
  }
}

fn validate_date_of_birth(date: &NaiveDate) -> Result<(), ValidationError> {
  if date.year() < EARLIEST_BIRTH_YEAR {
    let mut err = ValidationError::new("date_of_birth_range");
    err.message = Some("Date of Birth should not be older than 1900".into());
    return Err(err);
  }
  if *date > Utc::now().date_naive() {
    let mut err = ValidationError::new("date_of_birth_future");
    err.message = Some("Date of Birth can't be in the future".into());
    return Err(err);
  }
  Ok(())
}

// ─── Person response ─────────────────────────────────────────────────────────

/// A person as shown to callers, with the country name resolved and the age
/// derived from the date of birth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonResponse {
  pub person_id:            Uuid,
  pub person_name:          Option<String>,
  pub email:                Option<String>,
  pub date_of_birth:        Option<NaiveDate>,
  pub gender:               Option<Gender>,
  pub country_id:           Option<Uuid>,
  /// Name of the referenced country, if it still exists.
  pub country:              Option<String>,
  pub address:              Option<String>,
  pub receive_news_letters: bool,
  /// Whole years between `date_of_birth` and `today`, rounded.
  pub age:                  Option<u32>,
}

impl PersonResponse {
  pub fn from_person(
    person: Person,
    country: Option<String>,
    today: NaiveDate,
  ) -> Self {
    let age = person.date_of_birth.and_then(|dob| age_on(dob, today));
    Self {
      person_id: person.person_id,
      person_name: person.person_name,
      email: person.email,
      date_of_birth: person.date_of_birth,
      gender: person.gender,
      country_id: person.country_id,
      country,
      address: person.address,
      receive_news_letters: person.receive_news_letters,
      age,
    }
  }

  /// Pre-fill an update request from the current state (edit form).
  pub fn to_update_request(&self) -> PersonUpdateRequest {
    PersonUpdateRequest {
      person_id:            self.person_id,
      person_name:          self.person_name.clone(),
      email:                self.email.clone(),
      date_of_birth:        self.date_of_birth,
      gender:               self.gender,
      country_id:           self.country_id,
      address:              self.address.clone(),
      receive_news_letters: self.receive_news_letters,
    }
  }
}

fn age_on(dob: NaiveDate, today: NaiveDate) -> Option<u32> {
  let days = (today - dob).num_days() as f64;
  let years = (days / 365.25).round();
  (years >= 0.0).then_some(years as u32)
}

#[cfg(test)]
mod tests {
  use chrono::Duration;

  use super::*;

  fn valid_add() -> PersonAddRequest {
    PersonAddRequest {
      person_name:          Some("Anna".into()),
      email:                Some("anna@example.com".into()),
      date_of_birth:        NaiveDate::from_ymd_opt(1990, 5, 17),
      gender:               Some(Gender::Female),
      country_id:           Some(Uuid::new_v4()),
      address:              Some("1 Main Street".into()),
      receive_news_letters: true,
    }
  }

  #[test]
  fn valid_add_request_passes() {
    assert!(valid_add().validate().is_ok());
  }

  #[test]
  fn missing_fields_are_all_reported() {
    let errors = PersonAddRequest::default().validate().unwrap_err();
    let fields = errors.field_errors();
    for field in ["person_name", "email", "gender", "country_id", "address"] {
      assert!(fields.contains_key(field), "missing error for {field}");
    }
    assert!(!fields.contains_key("date_of_birth"));
  }

  #[test]
  fn malformed_email_is_rejected() {
    let mut req = valid_add();
    req.email = Some("not-an-email".into());
    let errors = req.validate().unwrap_err();
    assert!(errors.field_errors().contains_key("email"));
  }

  #[test]
  fn implausible_dates_are_rejected() {
    let mut req = valid_add();
    req.date_of_birth = NaiveDate::from_ymd_opt(1850, 1, 1);
    assert!(req.validate().is_err());

    req.date_of_birth = Some(Utc::now().date_naive() + Duration::days(2));
    assert!(req.validate().is_err());
  }

  #[test]
  fn empty_country_name_is_rejected() {
    assert!(CountryAddRequest::new("").validate().is_err());
    assert!(CountryAddRequest::default().validate().is_err());
    assert!(CountryAddRequest::new("Japan").validate().is_ok());
  }

  #[test]
  fn age_rounds_to_whole_years() {
    let dob = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
    let today = NaiveDate::from_ymd_opt(2020, 1, 2).unwrap();
    assert_eq!(age_on(dob, today), Some(20));
    assert_eq!(age_on(today, dob), None);
  }

  #[test]
  fn response_round_trips_into_update_request() {
    let person = valid_add().into_person(Uuid::new_v4());
    let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let resp = PersonResponse::from_person(person.clone(), None, today);
    assert_eq!(resp.to_update_request().into_person(), person);
  }
}
