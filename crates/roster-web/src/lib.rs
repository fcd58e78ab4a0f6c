//! Server-rendered person directory for Roster.
//!
//! Exposes an axum [`Router`] with the `/persons` HTML pages backed by any
//! [`RosterStore`], plus [`app`] which also mounts the JSON API under `/api`.

pub mod error;
pub mod form;
pub mod handlers;
pub mod views;

pub use error::Error;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  response::Redirect,
  routing::get,
};
use roster_core::{
  service::{CountriesService, PersonsService},
  store::RosterStore,
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use handlers::{create, delete, edit, index};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml`.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:           String,
  pub port:           u16,
  pub store_path:     PathBuf,
  /// JSON array of countries loaded when the database is first created.
  #[serde(default)]
  pub countries_seed: Option<PathBuf>,
  /// JSON array of persons loaded when the database is first created.
  #[serde(default)]
  pub persons_seed:   Option<PathBuf>,
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
pub struct AppState<S> {
  pub countries: CountriesService<S>,
  pub persons:   PersonsService<S>,
}

impl<S> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self { countries: self.countries.clone(), persons: self.persons.clone() }
  }
}

impl<S: RosterStore> AppState<S> {
  pub fn new(store: Arc<S>) -> Self {
    let countries = CountriesService::new(store.clone());
    let persons = PersonsService::new(store, countries.clone());
    Self { countries, persons }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the HTML router.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: RosterStore + 'static,
{
  Router::new()
    .route("/",                           get(|| async { Redirect::to(views::LISTING_PATH) }))
    .route("/persons",                    get(index::handler::<S>))
    .route("/persons/index",              get(index::handler::<S>))
    .route("/persons/create",             get(create::form::<S>).post(create::submit::<S>))
    .route("/persons/edit/{person_id}",   get(edit::form::<S>).post(edit::submit::<S>))
    .route("/persons/delete/{person_id}", get(delete::confirm::<S>).post(delete::submit::<S>))
    .with_state(state)
}

/// The complete application: HTML pages, the JSON API under `/api`, and
/// request tracing.
pub fn app<S>(store: Arc<S>) -> Router
where
  S: RosterStore + 'static,
{
  router(AppState::new(store.clone()))
    .nest("/api", roster_api::api_router(store))
    .layer(TraceLayer::new_for_http())
}

// ─── Integration tests ────────────────────────────────────────────────────────
