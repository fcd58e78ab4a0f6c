//! Handlers for `/countries` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/countries` | Every country, store order |
//! | `POST` | `/countries` | Body: `{"country_name":"..."}`; 201, 400, or 409 |
//! | `GET`  | `/countries/:id` | 404 if not found |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use roster_core::{
  dto::{CountryAddRequest, CountryResponse},
  store::RosterStore,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{ApiState, error::ApiError};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /countries`
pub async fn list<S>(
  State(state): State<ApiState<S>>,
) -> Result<Json<Vec<CountryResponse>>, ApiError>
where
  S: RosterStore,
{
  Ok(Json(state.countries.get_all_countries().await?))
}

// ─── Create ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub country_name: Option<String>,
}

impl From<CreateBody> for CountryAddRequest {
  fn from(b: CreateBody) -> Self {
    CountryAddRequest { country_name: b.country_name }
  }
}

/// `POST /countries`: 201 with the stored country.
pub async fn create<S>(
  State(state): State<ApiState<S>>,
  Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RosterStore,
{
  let country = state.countries.add_country(Some(body.into())).await?;
  Ok((StatusCode::CREATED, Json(country)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /countries/:id`
pub async fn get_one<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<CountryResponse>, ApiError>
where
  S: RosterStore,
{
  let country = state
    .countries
    .get_country_by_id(Some(id))
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("country {id} not found")))?;
  Ok(Json(country))
}
