use std::sync::Arc;

use uuid::Uuid;
use validator::Validate as _;

use crate::{
  Error, Result,
  dto::{CountryAddRequest, CountryResponse},
  store::RosterStore,
};

/// Adds and looks up countries.
pub struct CountriesService<S> {
  store: Arc<S>,
}

impl<S> Clone for CountriesService<S> {
  fn clone(&self) -> Self { Self { store: self.store.clone() } }
}

impl<S: RosterStore> CountriesService<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  /// Validate and persist a new country with a freshly generated id.
  ///
  /// The duplicate-name check and the insert are two separate store calls;
  /// concurrent adds of the same name can both succeed.
  pub async fn add_country(
    &self,
    request: Option<CountryAddRequest>,
  ) -> Result<CountryResponse> {
    let request = request.ok_or_else(|| {
      Error::invalid("country_add_request", "Country request can't be null")
    })?;
    request.validate()?;

    let name = request.country_name.clone().unwrap_or_default();
    let existing = self
      .store
      .find_country_by_name(name.clone())
      .await
      .map_err(Error::store)?;
    if existing.is_some() {
      return Err(Error::DuplicateCountryName(name));
    }

    let country = self
      .store
      .insert_country(request.into_country(Uuid::new_v4()))
      .await
      .map_err(Error::store)?;

    tracing::info!(country_id = %country.country_id, "country added");
    Ok(country.into())
  }

  pub async fn get_all_countries(&self) -> Result<Vec<CountryResponse>> {
    let countries = self.store.list_countries().await.map_err(Error::store)?;
    Ok(countries.into_iter().map(CountryResponse::from).collect())
  }

  /// `None` when `id` is absent or matches no row.
  pub async fn get_country_by_id(
    &self,
    id: Option<Uuid>,
  ) -> Result<Option<CountryResponse>> {
    let Some(id) = id else { return Ok(None) };
    let country = self.store.get_country(id).await.map_err(Error::store)?;
    Ok(country.map(CountryResponse::from))
  }
}
