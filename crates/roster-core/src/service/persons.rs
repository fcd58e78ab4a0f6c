use std::{collections::HashMap, sync::Arc};

use chrono::Utc;
use uuid::Uuid;
use validator::Validate as _;

use crate::{
  Error, Result,
  dto::{PersonAddRequest, PersonResponse, PersonUpdateRequest},
  entity::Person,
  query::{SortOrder, filter_persons, sort_persons},
  service::CountriesService,
  store::RosterStore,
};

/// Person CRUD plus listing search and sort.
pub struct PersonsService<S> {
  store:     Arc<S>,
  countries: CountriesService<S>,
}

impl<S> Clone for PersonsService<S> {
  fn clone(&self) -> Self {
    Self { store: self.store.clone(), countries: self.countries.clone() }
  }
}

impl<S: RosterStore> PersonsService<S> {
  pub fn new(store: Arc<S>, countries: CountriesService<S>) -> Self {
    Self { store, countries }
  }

  /// Build a response for one person, resolving the country name.
  async fn respond(&self, person: Person) -> Result<PersonResponse> {
    let country = self
      .countries
      .get_country_by_id(person.country_id)
      .await?
      .map(|c| c.country_name);
    Ok(PersonResponse::from_person(person, country, Utc::now().date_naive()))
  }

  /// Validate and persist a new person with a freshly generated id.
  pub async fn add_person(
    &self,
    request: Option<PersonAddRequest>,
  ) -> Result<PersonResponse> {
    let request = request.ok_or_else(|| {
      Error::invalid("person_add_request", "Person request can't be null")
    })?;
    request.validate()?;

    let person = self
      .store
      .insert_person(request.into_person(Uuid::new_v4()))
      .await
      .map_err(Error::store)?;

    tracing::info!(person_id = %person.person_id, "person added");
    self.respond(person).await
  }

  /// Every person, with country names resolved from one scan of the
  /// countries table.
  pub async fn get_all_persons(&self) -> Result<Vec<PersonResponse>> {
    let persons = self.store.list_persons().await.map_err(Error::store)?;
    let names: HashMap<Uuid, String> = self
      .countries
      .get_all_countries()
      .await?
      .into_iter()
      .map(|c| (c.country_id, c.country_name))
      .collect();

    let today = Utc::now().date_naive();
    Ok(
      persons
        .into_iter()
        .map(|p| {
          let country = p.country_id.and_then(|id| names.get(&id).cloned());
          PersonResponse::from_person(p, country, today)
        })
        .collect(),
    )
  }

  /// `None` when `id` is absent or matches no row.
  pub async fn get_person_by_id(
    &self,
    id: Option<Uuid>,
  ) -> Result<Option<PersonResponse>> {
    let Some(id) = id else { return Ok(None) };
    match self.store.get_person(id).await.map_err(Error::store)? {
      Some(person) => self.respond(person).await.map(Some),
      None => Ok(None),
    }
  }

  /// Persons whose `search_by` field contains `search_string`, ignoring case.
  /// See [`filter_persons`] for the fallbacks.
  pub async fn get_filtered_persons(
    &self,
    search_by: &str,
    search_string: Option<&str>,
  ) -> Result<Vec<PersonResponse>> {
    let all = self.get_all_persons().await?;
    Ok(filter_persons(all, search_by, search_string))
  }

  /// Pure reordering; never touches the store.
  pub fn get_sorted_persons(
    &self,
    persons: Vec<PersonResponse>,
    sort_by: &str,
    sort_order: SortOrder,
  ) -> Vec<PersonResponse> {
    sort_persons(persons, sort_by, sort_order)
  }

  /// Overwrite an existing person.
  ///
  /// The id is checked before the field rules, so an unknown id reports
  /// [`Error::PersonNotFound`] even when the other fields are invalid.
  pub async fn update_person(
    &self,
    request: Option<PersonUpdateRequest>,
  ) -> Result<PersonResponse> {
    let request = request.ok_or_else(|| {
      Error::invalid("person_update_request", "Person request can't be null")
    })?;
    let person_id = request.person_id;

    let existing = self.store.get_person(person_id).await.map_err(Error::store)?;
    if existing.is_none() {
      return Err(Error::PersonNotFound(person_id));
    }

    request.validate()?;

    let person = request.into_person();
    let updated = self
      .store
      .update_person(person.clone())
      .await
      .map_err(Error::store)?;
    if !updated {
      // Deleted between the lookup and the write.
      return Err(Error::PersonNotFound(person_id));
    }

    tracing::info!(%person_id, "person updated");
    self.respond(person).await
  }

  /// Remove a person. `Ok(false)` when no row matched.
  pub async fn delete_person(&self, id: Option<Uuid>) -> Result<bool> {
    let id = id.ok_or_else(|| Error::invalid("person_id", "PersonID can't be null"))?;
    let deleted = self.store.delete_person(id).await.map_err(Error::store)?;
    if deleted {
      tracing::info!(person_id = %id, "person deleted");
    } else {
      tracing::debug!(person_id = %id, "delete matched no person");
    }
    Ok(deleted)
  }
}
