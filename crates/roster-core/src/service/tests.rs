//! Service tests against a vector-backed store.

use std::{convert::Infallible, sync::{Arc, Mutex}};

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
  Error,
  dto::{CountryAddRequest, PersonAddRequest, PersonUpdateRequest},
  entity::{Country, Gender, Person},
  query::SortOrder,
  service::{CountriesService, PersonsService},
  store::RosterStore,
};

#[derive(Default)]
struct VecStore {
  countries: Mutex<Vec<Country>>,
  persons:   Mutex<Vec<Person>>,
}

impl RosterStore for VecStore {
  type Error = Infallible;

  async fn insert_country(&self, country: Country) -> Result<Country, Infallible> {
    self.countries.lock().unwrap().push(country.clone());
    Ok(country)
  }

  async fn list_countries(&self) -> Result<Vec<Country>, Infallible> {
    Ok(self.countries.lock().unwrap().clone())
  }

  async fn get_country(&self, id: Uuid) -> Result<Option<Country>, Infallible> {
    Ok(self.countries.lock().unwrap().iter().find(|c| c.country_id == id).cloned())
  }

  async fn find_country_by_name(&self, name: String) -> Result<Option<Country>, Infallible> {
    Ok(self.countries.lock().unwrap().iter().find(|c| c.country_name == name).cloned())
  }

  async fn insert_person(&self, person: Person) -> Result<Person, Infallible> {
    self.persons.lock().unwrap().push(person.clone());
    Ok(person)
  }

  async fn list_persons(&self) -> Result<Vec<Person>, Infallible> {
    Ok(self.persons.lock().unwrap().clone())
  }

  async fn get_person(&self, id: Uuid) -> Result<Option<Person>, Infallible> {
    Ok(self.persons.lock().unwrap().iter().find(|p| p.person_id == id).cloned())
  }

  async fn update_person(&self, person: Person) -> Result<bool, Infallible> {
    let mut persons = self.persons.lock().unwrap();
    match persons.iter_mut().find(|p| p.person_id == person.person_id) {
      Some(slot) => {
        *slot = person;
        Ok(true)
      }
      None => Ok(false),
    }
  }

  async fn delete_person(&self, id: Uuid) -> Result<bool, Infallible> {
    let mut persons = self.persons.lock().unwrap();
    let before = persons.len();
    persons.retain(|p| p.person_id != id);
    Ok(persons.len() != before)
  }
}

fn services() -> (Arc<VecStore>, CountriesService<VecStore>, PersonsService<VecStore>) {
  let store = Arc::new(VecStore::default());
  let countries = CountriesService::new(store.clone());
  let persons = PersonsService::new(store.clone(), countries.clone());
  (store, countries, persons)
}

fn add_request(name: &str, country_id: Uuid) -> PersonAddRequest {
  PersonAddRequest {
    person_name:          Some(name.into()),
    email:                Some(format!("{}@example.com", name.to_lowercase())),
    date_of_birth:        NaiveDate::from_ymd_opt(1993, 2, 11),
    gender:               Some(Gender::Male),
    country_id:           Some(country_id),
    address:              Some("12 Harbour Road".into()),
    receive_news_letters: false,
  }
}

// ─── Countries ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_country_assigns_fresh_ids() {
  let (_, countries, _) = services();
  let a = countries.add_country(Some(CountryAddRequest::new("Japan"))).await.unwrap();
  let b = countries.add_country(Some(CountryAddRequest::new("Chile"))).await.unwrap();
  assert_ne!(a.country_id, b.country_id);
  assert_ne!(a.country_id, Uuid::nil());

  let all = countries.get_all_countries().await.unwrap();
  assert_eq!(all, vec![a, b]);
}

#[tokio::test]
async fn add_country_rejects_missing_request_and_name() {
  let (_, countries, _) = services();
  assert!(matches!(countries.add_country(None).await, Err(Error::Validation(_))));
  assert!(matches!(
    countries.add_country(Some(CountryAddRequest::default())).await,
    Err(Error::Validation(_))
  ));
  assert!(matches!(
    countries.add_country(Some(CountryAddRequest::new(""))).await,
    Err(Error::Validation(_))
  ));
}

#[tokio::test]
async fn duplicate_country_name_leaves_table_unchanged() {
  let (store, countries, _) = services();
  countries.add_country(Some(CountryAddRequest::new("Peru"))).await.unwrap();

  let err = countries
    .add_country(Some(CountryAddRequest::new("Peru")))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::DuplicateCountryName(ref n) if n == "Peru"));
  assert_eq!(store.countries.lock().unwrap().len(), 1);

  // Exact match only.
  countries.add_country(Some(CountryAddRequest::new("peru"))).await.unwrap();
}

#[tokio::test]
async fn get_country_by_id_missing_is_none() {
  let (_, countries, _) = services();
  assert!(countries.get_country_by_id(None).await.unwrap().is_none());
  assert!(countries.get_country_by_id(Some(Uuid::new_v4())).await.unwrap().is_none());
}

// ─── Persons ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_person_resolves_country_name() {
  let (_, countries, persons) = services();
  let kenya = countries.add_country(Some(CountryAddRequest::new("Kenya"))).await.unwrap();

  let added = persons.add_person(Some(add_request("Anna", kenya.country_id))).await.unwrap();
  assert_eq!(added.country.as_deref(), Some("Kenya"));
  assert!(added.age.is_some());

  let fetched = persons.get_person_by_id(Some(added.person_id)).await.unwrap();
  assert_eq!(fetched, Some(added));
}

#[tokio::test]
async fn add_person_reports_every_violated_field() {
  let (store, _, persons) = services();
  let err = persons
    .add_person(Some(PersonAddRequest {
      email: Some("nope".into()),
      ..Default::default()
    }))
    .await
    .unwrap_err();

  let Error::Validation(fields) = err else { panic!("expected validation error") };
  let names: Vec<&str> = fields.iter().map(|f| f.field.as_str()).collect();
  assert_eq!(names, ["address", "country_id", "email", "gender", "person_name"]);
  assert!(store.persons.lock().unwrap().is_empty());
}

#[tokio::test]
async fn filtered_and_sorted_listing() {
  let (_, countries, persons) = services();
  let c = countries.add_country(Some(CountryAddRequest::new("Italy"))).await.unwrap();
  for name in ["Bob", "Anna", "Dante", "Hannah"] {
    persons.add_person(Some(add_request(name, c.country_id))).await.unwrap();
  }

  let hits = persons.get_filtered_persons("PersonName", Some("an")).await.unwrap();
  let sorted = persons.get_sorted_persons(hits, "PersonName", SortOrder::Desc);
  let names: Vec<_> = sorted.iter().filter_map(|p| p.person_name.as_deref()).collect();
  assert_eq!(names, ["Hannah", "Dante", "Anna"]);

  let all = persons.get_filtered_persons("PersonName", None).await.unwrap();
  assert_eq!(all.len(), 4);
}

#[tokio::test]
async fn update_unknown_person_is_not_found_and_changes_nothing() {
  let (store, _, persons) = services();
  let err = persons
    .update_person(Some(PersonUpdateRequest {
      person_id:            Uuid::new_v4(),
      person_name:          Some("Ghost".into()),
      email:                Some("ghost@example.com".into()),
      date_of_birth:        None,
      gender:               Some(Gender::Other),
      country_id:           Some(Uuid::new_v4()),
      address:              Some("Nowhere".into()),
      receive_news_letters: false,
    }))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::PersonNotFound(_)));
  assert!(store.persons.lock().unwrap().is_empty());
}

#[tokio::test]
async fn update_person_overwrites_in_place() {
  let (store, countries, persons) = services();
  let c = countries.add_country(Some(CountryAddRequest::new("Ghana"))).await.unwrap();
  let added = persons.add_person(Some(add_request("Kofi", c.country_id))).await.unwrap();

  let mut req = added.to_update_request();
  req.email = Some("kofi@work.example.com".into());
  req.receive_news_letters = true;
  let updated = persons.update_person(Some(req)).await.unwrap();

  assert_eq!(updated.person_id, added.person_id);
  assert_eq!(updated.email.as_deref(), Some("kofi@work.example.com"));
  assert!(updated.receive_news_letters);
  assert_eq!(store.persons.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn update_person_revalidates_fields() {
  let (_, countries, persons) = services();
  let c = countries.add_country(Some(CountryAddRequest::new("Nepal"))).await.unwrap();
  let added = persons.add_person(Some(add_request("Maya", c.country_id))).await.unwrap();

  let mut req = added.to_update_request();
  req.person_name = Some(String::new());
  let err = persons.update_person(Some(req)).await.unwrap_err();
  assert!(matches!(err, Error::Validation(_)));

  let unchanged = persons.get_person_by_id(Some(added.person_id)).await.unwrap();
  assert_eq!(unchanged, Some(added));
}

#[tokio::test]
async fn delete_person_reports_whether_a_row_matched() {
  let (_, countries, persons) = services();
  let c = countries.add_country(Some(CountryAddRequest::new("Oman"))).await.unwrap();
  let added = persons.add_person(Some(add_request("Sami", c.country_id))).await.unwrap();

  assert!(!persons.delete_person(Some(Uuid::new_v4())).await.unwrap());
  assert!(persons.delete_person(Some(added.person_id)).await.unwrap());
  assert!(persons.get_person_by_id(Some(added.person_id)).await.unwrap().is_none());
  assert!(matches!(persons.delete_person(None).await, Err(Error::Validation(_))));
}
