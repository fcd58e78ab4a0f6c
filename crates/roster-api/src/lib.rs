//! JSON REST API for Roster.
//!
//! Exposes an axum [`Router`] backed by any [`roster_core::store::RosterStore`].
//! TLS and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", roster_api::api_router(store.clone()))
//! ```

pub mod countries;
pub mod error;
pub mod persons;

use std::sync::Arc;

use axum::{Router, routing::get};
use roster_core::{
  service::{CountriesService, PersonsService},
  store::RosterStore,
};

pub use error::ApiError;

/// Services shared by every API handler.
pub struct ApiState<S> {
  pub countries: CountriesService<S>,
  pub persons:   PersonsService<S>,
}

impl<S> Clone for ApiState<S> {
  fn clone(&self) -> Self {
    Self { countries: self.countries.clone(), persons: self.persons.clone() }
  }
}

impl<S: RosterStore> ApiState<S> {
  pub fn new(store: Arc<S>) -> Self {
    let countries = CountriesService::new(store.clone());
    let persons = PersonsService::new(store, countries.clone());
    Self { countries, persons }
  }
}

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: RosterStore + 'static,
{
  Router::new()
    // Countries
    .route(
      "/countries",
      get(countries::list::<S>).post(countries::create::<S>),
    )
    .route("/countries/{id}", get(countries::get_one::<S>))
    // Persons
    .route("/persons", get(persons::list::<S>))
    .route("/persons/{id}", get(persons::get_one::<S>))
    .with_state(ApiState::new(store))
}
