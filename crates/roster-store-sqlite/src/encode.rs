//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! UUIDs are stored as hyphenated lowercase strings, dates as `YYYY-MM-DD`,
//! genders by label, and booleans as integers.

use chrono::NaiveDate;
use roster_core::entity::{Country, Gender, Person};
use uuid::Uuid;

use crate::{Error, Result};

/// Column format for `date_of_birth`.
const DATE_FORMAT: &str = "%Y-%m-%d";

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format(DATE_FORMAT).to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, DATE_FORMAT)
    .map_err(|e| Error::Decode(format!("bad date {s:?}: {e}")))
}

// ─── Gender ──────────────────────────────────────────────────────────────────

pub fn encode_gender(g: Gender) -> &'static str { g.label() }

pub fn decode_gender(s: &str) -> Result<Gender> {
  s.parse()
    .map_err(|_| Error::Decode(format!("unknown gender: {s:?}")))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column values for a `countries` row, in DDL order.
pub struct RawCountry {
  pub country_id:   String,
  pub country_name: String,
}

impl RawCountry {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self { country_id: row.get(0)?, country_name: row.get(1)? })
  }

  pub fn from_country(c: &Country) -> Self {
    Self {
      country_id:   encode_uuid(c.country_id),
      country_name: c.country_name.clone(),
    }
  }

  pub fn into_country(self) -> Result<Country> {
    Ok(Country {
      country_id:   decode_uuid(&self.country_id)?,
      country_name: self.country_name,
    })
  }

  pub fn insert(&self, conn: &rusqlite::Connection) -> rusqlite::Result<usize> {
    conn.execute(
      "INSERT INTO countries (country_id, country_name) VALUES (?1, ?2)",
      rusqlite::params![self.country_id, self.country_name],
    )
  }
}

/// Column values for a `persons` row, in DDL order.
pub struct RawPerson {
  pub person_id:            String,
  pub person_name:          Option<String>,
  pub email:                Option<String>,
  pub date_of_birth:        Option<String>,
  pub gender:               Option<String>,
  pub country_id:           Option<String>,
  pub address:              Option<String>,
  pub receive_news_letters: bool,
}

impl RawPerson {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      person_id:            row.get(0)?,
      person_name:          row.get(1)?,
      email:                row.get(2)?,
      date_of_birth:        row.get(3)?,
      gender:               row.get(4)?,
      country_id:           row.get(5)?,
      address:              row.get(6)?,
      receive_news_letters: row.get(7)?,
    })
  }

  pub fn from_person(p: &Person) -> Self {
    Self {
      person_id:            encode_uuid(p.person_id),
      person_name:          p.person_name.clone(),
      email:                p.email.clone(),
      date_of_birth:        p.date_of_birth.map(encode_date),
      gender:               p.gender.map(encode_gender).map(str::to_owned),
      country_id:           p.country_id.map(encode_uuid),
      address:              p.address.clone(),
      receive_news_letters: p.receive_news_letters,
    }
  }

  pub fn into_person(self) -> Result<Person> {
    Ok(Person {
      person_id:            decode_uuid(&self.person_id)?,
      person_name:          self.person_name,
      email:                self.email,
      date_of_birth:        self.date_of_birth.as_deref().map(decode_date).transpose()?,
      gender:               self.gender.as_deref().map(decode_gender).transpose()?,
      country_id:           self.country_id.as_deref().map(decode_uuid).transpose()?,
      address:              self.address,
      receive_news_letters: self.receive_news_letters,
    })
  }

  pub fn insert(&self, conn: &rusqlite::Connection) -> rusqlite::Result<usize> {
    conn.execute(
      "INSERT INTO persons (
         person_id, person_name, email, date_of_birth,
         gender, country_id, address, receive_news_letters
       ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
      rusqlite::params![
        self.person_id,
        self.person_name,
        self.email,
        self.date_of_birth,
        self.gender,
        self.country_id,
        self.address,
        self.receive_news_letters,
      ],
    )
  }
}
