//! `GET|POST /persons/create`.

use axum::{
  Form,
  extract::State,
  response::{Html, IntoResponse, Response},
};
use roster_core::store::RosterStore;

use crate::{
  AppState,
  error::Error,
  form::{PersonForm, collect_errors},
  handlers::to_listing,
  views::{self, FormPage},
};

pub async fn form<S>(State(state): State<AppState<S>>) -> Result<Html<String>, Error>
where
  S: RosterStore,
{
  let countries = state.countries.get_all_countries().await?;
  Ok(views::person_form(FormPage::Create, &PersonForm::default(), &countries, &[]))
}

pub async fn submit<S>(
  State(state): State<AppState<S>>,
  Form(form): Form<PersonForm>,
) -> Result<Response, Error>
where
  S: RosterStore,
{
  let (request, binding) = form.to_add_request();
  let errors = collect_errors(&request, binding);

  let errors = if errors.is_empty() {
    match state.persons.add_person(Some(request)).await {
      Ok(_) => return Ok(to_listing()),
      Err(roster_core::Error::Validation(errors)) => errors,
      Err(e) => return Err(e.into()),
    }
  } else {
    errors
  };

  let countries = state.countries.get_all_countries().await?;
  Ok(views::person_form(FormPage::Create, &form, &countries, &errors).into_response())
}
