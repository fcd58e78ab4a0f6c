//! [`SqliteStore`], the SQLite implementation of [`RosterStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use roster_core::{
  entity::{Country, Person},
  store::RosterStore,
};

use crate::{
  Result,
  encode::{RawCountry, RawPerson, encode_uuid},
  schema::{PRAGMAS, SCHEMA, SCHEMA_VERSION},
  seed::Seed,
};

const PERSON_COLUMNS: &str = "person_id, person_name, email, date_of_birth, \
                              gender, country_id, address, receive_news_letters";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A person directory backed by a single SQLite file.
///
/// Cloning shares the inner connection.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    Self::open_with_seed(path, Seed::default()).await
  }

  /// Open (or create) a store at `path`. If the schema has to be created,
  /// `seed` is inserted along with it; an existing database is left as is.
  pub async fn open_with_seed(path: impl AsRef<Path>, seed: Seed) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema(seed).await?;
    Ok(store)
  }

  /// Open an in-memory store.
  pub async fn open_in_memory() -> Result<Self> {
    Self::open_in_memory_with_seed(Seed::default()).await
  }

  pub async fn open_in_memory_with_seed(seed: Seed) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema(seed).await?;
    Ok(store)
  }

  async fn init_schema(&self, seed: Seed) -> Result<()> {
    let countries: Vec<RawCountry> =
      seed.countries.iter().map(RawCountry::from_country).collect();
    let persons: Vec<RawPerson> =
      seed.persons.iter().map(RawPerson::from_person).collect();

    let created = self
      .conn
      .call(move |conn| {
        conn.execute_batch(PRAGMAS)?;

        let version: i64 =
          conn.query_row("PRAGMA user_version", [], |r| r.get(0))?;
        if version >= SCHEMA_VERSION {
          return Ok(false);
        }

        let tx = conn.transaction()?;
        tx.execute_batch(SCHEMA)?;
        for c in &countries {
          c.insert(&tx)?;
        }
        for p in &persons {
          p.insert(&tx)?;
        }
        tx.execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION};"))?;
        tx.commit()?;
        Ok(true)
      })
      .await?;

    if created {
      tracing::info!(
        countries = seed.countries.len(),
        persons = seed.persons.len(),
        "created schema"
      );
    }
    Ok(())
  }
}

// ─── RosterStore impl ────────────────────────────────────────────────────────

impl RosterStore for SqliteStore {
  type Error = crate::Error;

  // ── Countries ─────────────────────────────────────────────────────────────

  async fn insert_country(&self, country: Country) -> Result<Country> {
    let raw = RawCountry::from_country(&country);

    self
      .conn
      .call(move |conn| {
        raw.insert(conn)?;
        Ok(())
      })
      .await?;

    Ok(country)
  }

  async fn list_countries(&self) -> Result<Vec<Country>> {
    let raws: Vec<RawCountry> = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare("SELECT country_id, country_name FROM countries")?;
        let rows = stmt
          .query_map([], RawCountry::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawCountry::into_country).collect()
  }

  async fn get_country(&self, id: Uuid) -> Result<Option<Country>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawCountry> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT country_id, country_name FROM countries WHERE country_id = ?1",
              rusqlite::params![id_str],
              RawCountry::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawCountry::into_country).transpose()
  }

  async fn find_country_by_name(&self, name: String) -> Result<Option<Country>> {
    let raw: Option<RawCountry> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT country_id, country_name FROM countries
               WHERE country_name = ?1 LIMIT 1",
              rusqlite::params![name],
              RawCountry::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawCountry::into_country).transpose()
  }

  // ── Persons ───────────────────────────────────────────────────────────────

  async fn insert_person(&self, person: Person) -> Result<Person> {
    let raw = RawPerson::from_person(&person);

    self
      .conn
      .call(move |conn| {
        raw.insert(conn)?;
        Ok(())
      })
      .await?;

    Ok(person)
  }

  async fn list_persons(&self) -> Result<Vec<Person>> {
    let raws: Vec<RawPerson> = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare(&format!("SELECT {PERSON_COLUMNS} FROM persons"))?;
        let rows = stmt
          .query_map([], RawPerson::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPerson::into_person).collect()
  }

  async fn get_person(&self, id: Uuid) -> Result<Option<Person>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawPerson> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {PERSON_COLUMNS} FROM persons WHERE person_id = ?1"),
              rusqlite::params![id_str],
              RawPerson::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawPerson::into_person).transpose()
  }

  async fn update_person(&self, person: Person) -> Result<bool> {
    let raw = RawPerson::from_person(&person);

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE persons SET
             person_name = ?2, email = ?3, date_of_birth = ?4, gender = ?5,
             country_id = ?6, address = ?7, receive_news_letters = ?8
           WHERE person_id = ?1",
          rusqlite::params![
            raw.person_id,
            raw.person_name,
            raw.email,
            raw.date_of_birth,
            raw.gender,
            raw.country_id,
            raw.address,
            raw.receive_news_letters,
          ],
        )?)
      })
      .await?;

    Ok(changed > 0)
  }

  async fn delete_person(&self, id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(id);

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM persons WHERE person_id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    Ok(changed > 0)
  }
}
