//! Initial rows loaded from two JSON files when the schema is first created.
//!
//! The files use the PascalCase column names of the Countries and Persons tables, e.g.
//!
//! ```json
//! [{ "CountryID": "14629847-905a-4a0e-9abe-80b61655c5cb", "CountryName": "Philippines" }]
//! ```

use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use roster_core::entity::{Country, Gender, Person};
use serde::{Deserialize, Deserializer};
use uuid::Uuid;

use crate::{Error, Result};

/// Rows to insert at schema creation.
#[derive(Debug, Clone, Default)]
pub struct Seed {
  pub countries: Vec<Country>,
  pub persons:   Vec<Person>,
}

impl Seed {
  /// Read both seed files. Either file failing to read or parse is an error.
  pub fn from_files(
    countries_json: impl AsRef<Path>,
    persons_json: impl AsRef<Path>,
  ) -> Result<Self> {
    let countries: Vec<SeedCountry> = read_json(countries_json.as_ref())?;
    let persons: Vec<SeedPerson> = read_json(persons_json.as_ref())?;
    Ok(Self {
      countries: countries.into_iter().map(Country::from).collect(),
      persons:   persons.into_iter().map(Person::from).collect(),
    })
  }

  /// Parse seed rows from in-memory JSON documents.
  pub fn from_json(countries_json: &str, persons_json: &str) -> Result<Self> {
    let countries: Vec<SeedCountry> = serde_json::from_str(countries_json)?;
    let persons: Vec<SeedPerson> = serde_json::from_str(persons_json)?;
    Ok(Self {
      countries: countries.into_iter().map(Country::from).collect(),
      persons:   persons.into_iter().map(Person::from).collect(),
    })
  }

  pub fn is_empty(&self) -> bool {
    self.countries.is_empty() && self.persons.is_empty()
  }
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
  let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
    path: path.to_path_buf(),
    source,
  })?;
  Ok(serde_json::from_str(&text)?)
}

// ─── File shapes ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct SeedCountry {
  #[serde(rename = "CountryID")]
  country_id:   Uuid,
  #[serde(rename = "CountryName")]
  country_name: String,
}

impl From<SeedCountry> for Country {
  fn from(c: SeedCountry) -> Self {
    Country { country_id: c.country_id, country_name: c.country_name }
  }
}

#[derive(Deserialize)]
struct SeedPerson {
  #[serde(rename = "PersonID")]
  person_id:            Uuid,
  #[serde(rename = "PersonName", default)]
  person_name:          Option<String>,
  #[serde(rename = "Email", default)]
  email:                Option<String>,
  #[serde(rename = "DateOfBirth", default, deserialize_with = "date_or_datetime")]
  date_of_birth:        Option<NaiveDate>,
  #[serde(rename = "Gender", default)]
  gender:               Option<Gender>,
  #[serde(rename = "CountryID", default)]
  country_id:           Option<Uuid>,
  #[serde(rename = "Address", default)]
  address:              Option<String>,
  #[serde(rename = "ReceiveNewsLetters", default)]
  receive_news_letters: bool,
}

impl From<SeedPerson> for Person {
  fn from(p: SeedPerson) -> Self {
    Person {
      person_id:            p.person_id,
      person_name:          p.person_name,
      email:                p.email,
      date_of_birth:        p.date_of_birth,
      gender:               p.gender,
      country_id:           p.country_id,
      address:              p.address,
      receive_news_letters: p.receive_news_letters,
    }
  }
}

/// Accept `1993-01-02` as well as `1993-01-02T00:00:00`.
fn date_or_datetime<'de, D>(d: D) -> std::result::Result<Option<NaiveDate>, D::Error>
where
  D: Deserializer<'de>,
{
  let Some(s) = Option::<String>::deserialize(d)? else {
    return Ok(None);
  };
  NaiveDate::parse_from_str(&s, "%Y-%m-%d")
    .or_else(|_| NaiveDateTime::parse_from_str(&s, "%Y-%m-%dT%H:%M:%S").map(|dt| dt.date()))
    .map(Some)
    .map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_pascal_case_rows() {
    let seed = Seed::from_json(
      r#"[{"CountryID":"14629847-905a-4a0e-9abe-80b61655c5cb","CountryName":"Philippines"}]"#,
      r#"[{
        "PersonID":"c03bbe45-9aeb-4d24-99e0-4743016ffce9",
        "PersonName":"Marguerite",
        "Email":"mwebsdale0@people.com.cn",
        "DateOfBirth":"1989-08-28T00:00:00",
        "Gender":"Female",
        "CountryID":"14629847-905a-4a0e-9abe-80b61655c5cb",
        "Address":"4 Parkside Point",
        "ReceiveNewsLetters":false
      }]"#,
    )
    .unwrap();

    assert_eq!(seed.countries[0].country_name, "Philippines");
    let p = &seed.persons[0];
    assert_eq!(p.date_of_birth, NaiveDate::from_ymd_opt(1989, 8, 28));
    assert_eq!(p.gender, Some(Gender::Female));
    assert_eq!(p.country_id, Some(seed.countries[0].country_id));
  }

  #[test]
  fn missing_optional_fields_default() {
    let seed = Seed::from_json(
      "[]",
      r#"[{"PersonID":"c03bbe45-9aeb-4d24-99e0-4743016ffce9","DateOfBirth":"2001-02-03"}]"#,
    )
    .unwrap();
    let p = &seed.persons[0];
    assert!(p.person_name.is_none());
    assert!(!p.receive_news_letters);
    assert_eq!(p.date_of_birth, NaiveDate::from_ymd_opt(2001, 2, 3));
  }

  #[test]
  fn missing_file_is_io_error() {
    let err = Seed::from_files("/nonexistent/countries.json", "/nonexistent/persons.json")
      .unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
  }
}
