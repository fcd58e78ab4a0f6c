pub mod create;
pub mod delete;
pub mod edit;
pub mod index;

use axum::response::{IntoResponse, Redirect, Response};
use roster_core::{dto::PersonResponse, store::RosterStore};
use uuid::Uuid;

use crate::{AppState, error::Error, views};

pub(super) fn to_listing() -> Response {
  Redirect::to(views::LISTING_PATH).into_response()
}

/// Look up the person named by a raw path segment. An id that does not parse
/// is treated the same as one that matches nobody.
pub(super) async fn find_person<S>(
  state: &AppState<S>,
  raw_id: &str,
) -> Result<Option<PersonResponse>, Error>
where
  S: RosterStore,
{
  let id = Uuid::parse_str(raw_id).ok();
  Ok(state.persons.get_person_by_id(id).await?)
}
