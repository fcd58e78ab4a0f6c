//! Read-only handlers for `/persons` endpoints.
//!
//! Query parameters mirror the HTML listing: `searchBy`, `searchString`,
//! `sortBy`, `sortOrder`.

use axum::{
  Json,
  extract::{Path, Query, State},
};
use roster_core::{dto::PersonResponse, query::SortOrder, store::RosterStore};
use serde::Deserialize;
use uuid::Uuid;

use crate::{ApiState, error::ApiError};

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
  pub search_by:     Option<String>,
  pub search_string: Option<String>,
  pub sort_by:       Option<String>,
  /// `ASC` or `DESC`; anything else sorts ascending.
  pub sort_order:    Option<String>,
}

/// `GET /persons[?searchBy=...&searchString=...&sortBy=...&sortOrder=...]`
pub async fn list<S>(
  State(state): State<ApiState<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<PersonResponse>>, ApiError>
where
  S: RosterStore,
{
  let persons = state
    .persons
    .get_filtered_persons(
      params.search_by.as_deref().unwrap_or_default(),
      params.search_string.as_deref(),
    )
    .await?;

  let sorted = match params.sort_by.as_deref() {
    Some(sort_by) => state.persons.get_sorted_persons(
      persons,
      sort_by,
      SortOrder::parse_or_default(params.sort_order.as_deref()),
    ),
    None => persons,
  };
  Ok(Json(sorted))
}

/// `GET /persons/:id`
pub async fn get_one<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<PersonResponse>, ApiError>
where
  S: RosterStore,
{
  let person = state
    .persons
    .get_person_by_id(Some(id))
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("person {id} not found")))?;
  Ok(Json(person))
}
