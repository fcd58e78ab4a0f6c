//! The `RosterStore` trait: the persistence context the services run
//! against.
//!
//! The trait is implemented by storage backends (e.g. `roster-store-sqlite`).
//! The services and HTTP layers depend on this abstraction, not on any
//! concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::entity::{Country, Person};

/// Abstraction over the two tables of the directory.
///
/// Every method is a single round-trip; no method spans more than one
/// statement in a transaction, so check-then-write sequences in the services
/// are not atomic.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait RosterStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Countries ─────────────────────────────────────────────────────────

  /// Persist a new country row as given.
  fn insert_country(
    &self,
    country: Country,
  ) -> impl Future<Output = Result<Country, Self::Error>> + Send + '_;

  /// Full scan of the countries table, in store order.
  fn list_countries(
    &self,
  ) -> impl Future<Output = Result<Vec<Country>, Self::Error>> + Send + '_;

  /// Retrieve a country by id. Returns `None` if not found.
  fn get_country(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Country>, Self::Error>> + Send + '_;

  /// First country whose name equals `name` exactly (case-sensitive).
  fn find_country_by_name(
    &self,
    name: String,
  ) -> impl Future<Output = Result<Option<Country>, Self::Error>> + Send + '_;

  // ── Persons ───────────────────────────────────────────────────────────

  /// Persist a new person row as given.
  fn insert_person(
    &self,
    person: Person,
  ) -> impl Future<Output = Result<Person, Self::Error>> + Send + '_;

  /// Full scan of the persons table, in store order.
  fn list_persons(
    &self,
  ) -> impl Future<Output = Result<Vec<Person>, Self::Error>> + Send + '_;

  /// Retrieve a person by id. Returns `None` if not found.
  fn get_person(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Person>, Self::Error>> + Send + '_;

  /// Overwrite every column of the row keyed by `person.person_id`.
  /// Returns `false` if no such row exists.
  fn update_person(
    &self,
    person: Person,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Remove the row keyed by `id`. Returns `false` if no such row exists.
  fn delete_person(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
