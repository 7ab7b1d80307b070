//! Handlers for users and catalog reads.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/users` | Every user |
//! | `GET`  | `/people` | Every person |
//! | `GET`  | `/people/{id}` | 404 if not found |
//! | `GET`  | `/planet` | Every planet |
//! | `GET`  | `/planet/{id}` | 404 if not found |

use axum::{
  Json,
  extract::{Path, State},
};
use holocron_core::{
  catalog::{CatalogEntity, CatalogKind},
  store::Store,
  user::User,
};

use crate::{AppState, Listing, error::ApiError, path_id};

/// `GET /users`
pub async fn list_users<S: Store>(
  State(state): State<AppState<S>>,
) -> Result<Json<Listing<Vec<User>>>, ApiError> {
  let users = state.catalog.list_users().await?;
  Ok(Json(Listing::new(users)))
}

/// `GET /people`
pub async fn list_people<S: Store>(
  state: State<AppState<S>>,
) -> Result<Json<Listing<Vec<CatalogEntity>>>, ApiError> {
  list(state, CatalogKind::Person).await
}

/// `GET /people/{id}`
pub async fn get_person<S: Store>(
  state: State<AppState<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Listing<CatalogEntity>>, ApiError> {
  get_one(state, CatalogKind::Person, path_id(id)?).await
}

/// `GET /planet`
pub async fn list_planets<S: Store>(
  state: State<AppState<S>>,
) -> Result<Json<Listing<Vec<CatalogEntity>>>, ApiError> {
  list(state, CatalogKind::Planet).await
}

/// `GET /planet/{id}`
pub async fn get_planet<S: Store>(
  state: State<AppState<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Listing<CatalogEntity>>, ApiError> {
  get_one(state, CatalogKind::Planet, path_id(id)?).await
}

async fn list<S: Store>(
  State(state): State<AppState<S>>,
  kind: CatalogKind,
) -> Result<Json<Listing<Vec<CatalogEntity>>>, ApiError> {
  let entities = state.catalog.list_entities(kind).await?;
  Ok(Json(Listing::new(entities)))
}

async fn get_one<S: Store>(
  State(state): State<AppState<S>>,
  kind: CatalogKind,
  id: i64,
) -> Result<Json<Listing<CatalogEntity>>, ApiError> {
  let entity = state.catalog.get_entity(kind, id).await?;
  Ok(Json(Listing::new(entity)))
}
