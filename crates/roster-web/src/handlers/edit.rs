//! `GET|POST /persons/edit/{person_id}`.

use axum::{
  Form,
  extract::{Path, State},
  response::{IntoResponse, Response},
};
use roster_core::store::RosterStore;

use crate::{
  AppState,
  error::Error,
  form::{PersonForm, collect_errors},
  handlers::{find_person, to_listing},
  views::{self, FormPage},
};

pub async fn form<S>(
  State(state): State<AppState<S>>,
  Path(person_id): Path<String>,
) -> Result<Response, Error>
where
  S: RosterStore,
{
  let Some(person) = find_person(&state, &person_id).await? else {
    return Ok(to_listing());
  };
  let countries = state.countries.get_all_countries().await?;
  let form = PersonForm::from(&person.to_update_request());
  Ok(
    views::person_form(FormPage::Edit(person.person_id), &form, &countries, &[])
      .into_response(),
  )
}

pub async fn submit<S>(
  State(state): State<AppState<S>>,
  Path(person_id): Path<String>,
  Form(form): Form<PersonForm>,
) -> Result<Response, Error>
where
  S: RosterStore,
{
  let Some(person) = find_person(&state, &person_id).await? else {
    return Ok(to_listing());
  };
  let (request, binding) = form.to_update_request(person.person_id);
  let errors = collect_errors(&request, binding);

  let errors = if errors.is_empty() {
    match state.persons.update_person(Some(request)).await {
      Ok(_) => return Ok(to_listing()),
      Err(roster_core::Error::Validation(errors)) => errors,
      Err(e) => return Err(e.into()),
    }
  } else {
    errors
  };

  let countries = state.countries.get_all_countries().await?;
  Ok(
    views::person_form(FormPage::Edit(person.person_id), &form, &countries, &errors)
      .into_response(),
  )
}
