//! `GET /persons` and `GET /persons/index`.

use axum::{
  extract::{Query, State},
  response::Html,
};
use roster_core::{query::SortOrder, store::RosterStore};
use serde::Deserialize;

use crate::{AppState, error::Error, views};

const DEFAULT_SEARCH_BY: &str = "PersonName";
const DEFAULT_SORT_BY: &str = "PersonName";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingQuery {
  pub search_by:     Option<String>,
  pub search_string: Option<String>,
  pub sort_by:       Option<String>,
  pub sort_order:    Option<String>,
}

pub async fn handler<S>(
  State(state): State<AppState<S>>,
  Query(query): Query<ListingQuery>,
) -> Result<Html<String>, Error>
where
  S: RosterStore,
{
  let search_by = query.search_by.as_deref().unwrap_or(DEFAULT_SEARCH_BY);
  let search_string = query.search_string.as_deref().unwrap_or_default();
  let sort_by = query.sort_by.as_deref().unwrap_or(DEFAULT_SORT_BY);
  let sort_order = SortOrder::parse_or_default(query.sort_order.as_deref());

  let persons = state
    .persons
    .get_filtered_persons(search_by, Some(search_string))
    .await?;
  let persons = state.persons.get_sorted_persons(persons, sort_by, sort_order);

  Ok(views::index(&persons, &views::Listing {
    search_by,
    search_string,
    sort_by,
    sort_order,
  }))
}
