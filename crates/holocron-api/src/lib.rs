//! JSON REST API for Holocron.
//!
//! Exposes an axum [`Router`] backed by any [`holocron_core::store::Store`].
//! CORS, tracing, and transport concerns are the caller's responsibility.
//!
//! Routes come from a fixed table ([`routes`]) built once when the router is
//! assembled; the same table feeds the sitemap served at `/`.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = holocron_api::router(AppState::new(store, policy));
//! ```

pub mod catalog;
pub mod error;
pub mod favorites;


use std::sync::Arc;

use axum::{
  Json, Router,
  routing::{MethodRouter, delete, get, post},
};
use holocron_core::{
  service::{CatalogService, FavoritesPolicy, FavoritesService},
  store::Store,
};
use serde::Serialize;

pub use error::ApiError;

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all handlers.
pub struct AppState<S> {
  pub favorites: FavoritesService<S>,
  pub catalog:   CatalogService<S>,
}

impl<S> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self {
      favorites: self.favorites.clone(),
      catalog:   self.catalog.clone(),
    }
  }
}

impl<S: Store> AppState<S> {
  pub fn new(store: Arc<S>, policy: FavoritesPolicy) -> Self {
    Self {
      favorites: FavoritesService::new(Arc::clone(&store), policy),
      catalog:   CatalogService::new(store),
    }
  }
}

// ─── Response envelopes ───────────────────────────────────────────────────────

/// `{"response": ...}` — wraps user and catalog reads.
#[derive(Debug, Serialize)]
pub struct Listing<T> {
  pub response: T,
}

impl<T> Listing<T> {
  pub fn new(response: T) -> Self { Self { response } }
}

/// `{"favorites": ...}` — wraps every favorites result.
#[derive(Debug, Serialize)]
pub struct FavoritesBody<T> {
  pub favorites: T,
}

impl<T> FavoritesBody<T> {
  pub fn new(favorites: T) -> Self { Self { favorites } }
}

// ─── Path ids ─────────────────────────────────────────────────────────────────

/// Ids in paths are non-negative; a negative id names no resource.
pub(crate) fn path_id(id: i64) -> Result<i64, ApiError> {
  if id < 0 {
    return Err(ApiError::NotFound(format!("no resource with id {id}")));
  }
  Ok(id)
}

// ─── Route table ──────────────────────────────────────────────────────────────

/// One `(method, path template) -> handler` entry.
pub struct Route<S> {
  pub method:  &'static str,
  pub path:    &'static str,
  pub handler: MethodRouter<AppState<S>>,
}

impl<S> Route<S> {
  fn new(
    method: &'static str,
    path: &'static str,
    handler: MethodRouter<AppState<S>>,
  ) -> Self {
    Self { method, path, handler }
  }
}

/// Every endpoint except the sitemap itself.
pub fn routes<S>() -> Vec<Route<S>>
where
  S: Store + 'static,
{
  vec![
    Route::new("GET", "/users", get(catalog::list_users::<S>)),
    Route::new("GET", "/users/{id}/favorites", get(favorites::list::<S>)),
    Route::new("GET", "/people", get(catalog::list_people::<S>)),
    Route::new("GET", "/people/{id}", get(catalog::get_person::<S>)),
    Route::new("GET", "/planet", get(catalog::list_planets::<S>)),
    Route::new("GET", "/planet/{id}", get(catalog::get_planet::<S>)),
    Route::new(
      "POST",
      "/favorite/{user_id}/people/{people_id}",
      post(favorites::add_person::<S>),
    ),
    Route::new(
      "DELETE",
      "/favorite/{user_id}/people/{people_id}",
      delete(favorites::remove_person::<S>),
    ),
    Route::new(
      "POST",
      "/favorite/{user_id}/planet/{planet_id}",
      post(favorites::add_planet::<S>),
    ),
    Route::new(
      "DELETE",
      "/favorite/{user_id}/planet/{planet_id}",
      delete(favorites::remove_planet::<S>),
    ),
  ]
}

// ─── Sitemap ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct Endpoint {
  pub method: &'static str,
  pub path:   &'static str,
}

/// Body of `GET /`.
#[derive(Debug, Clone, Serialize)]
pub struct Sitemap {
  pub endpoints: Vec<Endpoint>,
}

impl Sitemap {
  fn from_routes<S>(routes: &[Route<S>]) -> Self {
    let root = Endpoint { method: "GET", path: "/" };
    let endpoints = std::iter::once(root)
      .chain(routes.iter().map(|r| Endpoint { method: r.method, path: r.path }))
      .collect();
    Self { endpoints }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the API router for `state`.
///
/// Entries sharing a path are merged into one method router by axum.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: Store + 'static,
{
  let table = routes::<S>();
  let sitemap = Arc::new(Sitemap::from_routes(&table));

  let root = Router::new().route(
    "/",
    get(move || {
      let sitemap = Arc::clone(&sitemap);
      async move { Json(sitemap.as_ref().clone()) }
    }),
  );

  table
    .into_iter()
    .fold(root, |router, route| router.route(route.path, route.handler))
    .with_state(state)
}
