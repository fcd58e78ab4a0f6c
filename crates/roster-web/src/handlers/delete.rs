//! `GET|POST /persons/delete/{person_id}`.
//!
//! GET shows a confirmation page; POST removes the row. Both fall back to the
//! listing when the person does not exist.

use axum::{
  extract::{Path, State},
  response::{IntoResponse, Response},
};
use roster_core::store::RosterStore;

use crate::{
  AppState,
  error::Error,
  handlers::{find_person, to_listing},
  views,
};

pub async fn confirm<S>(
  State(state): State<AppState<S>>,
  Path(person_id): Path<String>,
) -> Result<Response, Error>
where
  S: RosterStore,
{
  match find_person(&state, &person_id).await? {
    Some(person) => Ok(views::delete_confirm(&person).into_response()),
    None => Ok(to_listing()),
  }
}

pub async fn submit<S>(
  State(state): State<AppState<S>>,
  Path(person_id): Path<String>,
) -> Result<Response, Error>
where
  S: RosterStore,
{
  if let Some(person) = find_person(&state, &person_id).await? {
    state.persons.delete_person(Some(person.person_id)).await?;
  }
  Ok(to_listing())
}
