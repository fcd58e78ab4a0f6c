//! Binding of the person create/edit form.
//!
//! Every field arrives as text. Empty fields bind as absent; text that cannot
//! be parsed into the field's type becomes a binding error reported next to
//! the rule violations.

use chrono::NaiveDate;
use roster_core::{
  FieldError,
  dto::{PersonAddRequest, PersonUpdateRequest},
  entity::Gender,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

/// Wire format for `<input type="date">`.
pub const FORM_DATE_FORMAT: &str = "%Y-%m-%d";

/// Raw form fields, named as the page sends them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PersonForm {
  #[serde(rename = "PersonName", default)]
  pub person_name:          Option<String>,
  #[serde(rename = "Email", default)]
  pub email:                Option<String>,
  #[serde(rename = "DateOfBirth", default)]
  pub date_of_birth:        Option<String>,
  #[serde(rename = "Gender", default)]
  pub gender:               Option<String>,
  #[serde(rename = "CountryID", default)]
  pub country_id:           Option<String>,
  #[serde(rename = "Address", default)]
  pub address:              Option<String>,
  /// Checkbox: present (any value but `false`) means checked.
  #[serde(rename = "ReceiveNewsLetters", default)]
  pub receive_news_letters: Option<String>,
}

/// Typed values bound from a [`PersonForm`], before rule validation.
struct Bound {
  person_name:          Option<String>,
  email:                Option<String>,
  date_of_birth:        Option<NaiveDate>,
  gender:               Option<Gender>,
  country_id:           Option<Uuid>,
  address:              Option<String>,
  receive_news_letters: bool,
}

fn non_empty(v: &Option<String>) -> Option<String> {
  v.as_deref()
    .map(str::trim)
    .filter(|s| !s.is_empty())
    .map(str::to_owned)
}

impl PersonForm {
  fn bind(&self) -> (Bound, Vec<FieldError>) {
    let mut errors = Vec::new();

    let date_of_birth = non_empty(&self.date_of_birth).and_then(|s| {
      NaiveDate::parse_from_str(&s, FORM_DATE_FORMAT)
        .map_err(|_| {
          errors.push(FieldError::new(
            "date_of_birth",
            "Date of Birth should be a valid date",
          ))
        })
        .ok()
    });

    let gender = non_empty(&self.gender).and_then(|s| {
      s.parse::<Gender>()
        .map_err(|_| {
          errors.push(FieldError::new("gender", "Gender value is not recognised"))
        })
        .ok()
    });

    let country_id = non_empty(&self.country_id).and_then(|s| {
      Uuid::parse_str(&s)
        .map_err(|_| {
          errors.push(FieldError::new("country_id", "Country value is not recognised"))
        })
        .ok()
    });

    let receive_news_letters = self
      .receive_news_letters
      .as_deref()
      .is_some_and(|v| !v.eq_ignore_ascii_case("false"));

    let bound = Bound {
      person_name: non_empty(&self.person_name),
      email: non_empty(&self.email),
      date_of_birth,
      gender,
      country_id,
      address: non_empty(&self.address),
      receive_news_letters,
    };
    (bound, errors)
  }

  /// Bind into an add request. The error list holds binding failures only.
  pub fn to_add_request(&self) -> (PersonAddRequest, Vec<FieldError>) {
    let (b, errors) = self.bind();
    let request = PersonAddRequest {
      person_name:          b.person_name,
      email:                b.email,
      date_of_birth:        b.date_of_birth,
      gender:               b.gender,
      country_id:           b.country_id,
      address:              b.address,
      receive_news_letters: b.receive_news_letters,
    };
    (request, errors)
  }

  /// Bind into an update request for `person_id`.
  pub fn to_update_request(
    &self,
    person_id: Uuid,
  ) -> (PersonUpdateRequest, Vec<FieldError>) {
    let (b, errors) = self.bind();
    let request = PersonUpdateRequest {
      person_id,
      person_name: b.person_name,
      email: b.email,
      date_of_birth: b.date_of_birth,
      gender: b.gender,
      country_id: b.country_id,
      address: b.address,
      receive_news_letters: b.receive_news_letters,
    };
    (request, errors)
  }
}

impl From<&PersonUpdateRequest> for PersonForm {
  fn from(r: &PersonUpdateRequest) -> Self {
    Self {
      person_name:          r.person_name.clone(),
      email:                r.email.clone(),
      date_of_birth:        r
        .date_of_birth
        .map(|d| d.format(FORM_DATE_FORMAT).to_string()),
      gender:               r.gender.map(|g| g.label().to_owned()),
      country_id:           r.country_id.map(|id| id.to_string()),
      address:              r.address.clone(),
      receive_news_letters: r.receive_news_letters.then(|| "true".to_owned()),
    }
  }
}

/// All errors for a bound request: binding failures first, then rule
/// violations on fields that did bind.
pub fn collect_errors<R: Validate>(request: &R, binding: Vec<FieldError>) -> Vec<FieldError> {
  let mut errors = binding;
  if let Err(e) = request.validate() {
    if let roster_core::Error::Validation(rules) = roster_core::Error::from(e) {
      let bad: Vec<String> = errors.iter().map(|f| f.field.clone()).collect();
      errors.extend(rules.into_iter().filter(|f| !bad.contains(&f.field)));
    }
  }
  errors
}
