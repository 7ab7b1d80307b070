//! Handlers for favorites.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/users/{id}/favorites` | Every favorite of the user |
//! | `POST`   | `/favorite/{user_id}/people/{people_id}` | Returns the created favorite |
//! | `DELETE` | `/favorite/{user_id}/people/{people_id}` | Confirmation, even if nothing matched |
//! | `POST`   | `/favorite/{user_id}/planet/{planet_id}` | Returns the created favorite |
//! | `DELETE` | `/favorite/{user_id}/planet/{planet_id}` | Confirmation, even if nothing matched |
//!
//! Negative ids answer 404 without touching the store. Removal of a missing
//! favorite only fails when the service runs with
//! [`FavoritesPolicy::report_missing_removal`](holocron_core::service::FavoritesPolicy).

use axum::{
  Json,
  extract::{Path, State},
};
use holocron_core::{
  favorite::{Favorite, Target},
  store::Store,
};

use crate::{AppState, FavoritesBody, error::ApiError, path_id};

/// Message returned by every successful removal.
pub const REMOVED_MESSAGE: &str = "Favorite removed";

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /users/{id}/favorites`
pub async fn list<S: Store>(
  State(state): State<AppState<S>>,
  Path(user_id): Path<i64>,
) -> Result<Json<FavoritesBody<Vec<Favorite>>>, ApiError> {
  let favorites = state.favorites.list_favorites(path_id(user_id)?).await?;
  Ok(Json(FavoritesBody::new(favorites)))
}

// ─── People ───────────────────────────────────────────────────────────────────

/// `POST /favorite/{user_id}/people/{people_id}`
pub async fn add_person<S: Store>(
  state: State<AppState<S>>,
  Path((user_id, person_id)): Path<(i64, i64)>,
) -> Result<Json<FavoritesBody<Favorite>>, ApiError> {
  add(state, user_id, Target::Person(person_id)).await
}

/// `DELETE /favorite/{user_id}/people/{people_id}`
pub async fn remove_person<S: Store>(
  state: State<AppState<S>>,
  Path((user_id, person_id)): Path<(i64, i64)>,
) -> Result<Json<FavoritesBody<&'static str>>, ApiError> {
  remove(state, user_id, Target::Person(person_id)).await
}

// ─── Planets ──────────────────────────────────────────────────────────────────

/// `POST /favorite/{user_id}/planet/{planet_id}`
pub async fn add_planet<S: Store>(
  state: State<AppState<S>>,
  Path((user_id, planet_id)): Path<(i64, i64)>,
) -> Result<Json<FavoritesBody<Favorite>>, ApiError> {
  add(state, user_id, Target::Planet(planet_id)).await
}

/// `DELETE /favorite/{user_id}/planet/{planet_id}`
pub async fn remove_planet<S: Store>(
  state: State<AppState<S>>,
  Path((user_id, planet_id)): Path<(i64, i64)>,
) -> Result<Json<FavoritesBody<&'static str>>, ApiError> {
  remove(state, user_id, Target::Planet(planet_id)).await
}

// ─── Shared ───────────────────────────────────────────────────────────────────

async fn add<S: Store>(
  State(state): State<AppState<S>>,
  user_id: i64,
  target: Target,
) -> Result<Json<FavoritesBody<Favorite>>, ApiError> {
  let user_id = path_id(user_id)?;
  path_id(target.id())?;
  let favorite = state.favorites.add_favorite(user_id, target).await?;
  Ok(Json(FavoritesBody::new(favorite)))
}

async fn remove<S: Store>(
  State(state): State<AppState<S>>,
  user_id: i64,
  target: Target,
) -> Result<Json<FavoritesBody<&'static str>>, ApiError> {
  let user_id = path_id(user_id)?;
  path_id(target.id())?;
  state.favorites.remove_favorite(user_id, target).await?;
  Ok(Json(FavoritesBody::new(REMOVED_MESSAGE)))
}
