//! Store traits for the catalog, users, and favorites.
//!
//! Traits are implemented by storage backends (e.g. `holocron-store-sqlite`).
//! The services in [`crate::service`] and the HTTP layer depend on these
//! abstractions, not on any concrete backend. A backend is handed to the
//! services explicitly; there is no process-wide handle.
//!
//! All methods return `Send` futures so the traits can be used in
//! multi-threaded async runtimes (e.g. tokio with `axum`).

use std::future::Future;

use crate::{
  catalog::{CatalogEntity, CatalogKind},
  favorite::{Favorite, Target},
  user::User,
};

// ─── Catalog ─────────────────────────────────────────────────────────────────

/// Read access to people and planets.
pub trait CatalogStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Retrieve one entity. Returns `None` if no entity of `kind` has `id`.
  fn get_entity(
    &self,
    kind: CatalogKind,
    id: i64,
  ) -> impl Future<Output = Result<Option<CatalogEntity>, Self::Error>> + Send + '_;

  /// Every entity of `kind`. No filtering, ordering, or paging.
  fn list_entities(
    &self,
    kind: CatalogKind,
  ) -> impl Future<Output = Result<Vec<CatalogEntity>, Self::Error>> + Send + '_;
}

// ─── Users ───────────────────────────────────────────────────────────────────

/// Read access to users.
pub trait UserStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  fn user_exists(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  fn list_users(
    &self,
  ) -> impl Future<Output = Result<Vec<User>, Self::Error>> + Send + '_;
}

// ─── Favorites ───────────────────────────────────────────────────────────────

/// Owner of favorite records.
///
/// Each method is expected to run as a single atomic operation against the
/// backend.
pub trait FavoriteRegistry: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Insert a favorite and return it with a freshly assigned id.
  ///
  /// Backends do not check that `user_id` or the target exist.
  fn create_favorite(
    &self,
    user_id: i64,
    target: Target,
  ) -> impl Future<Output = Result<Favorite, Self::Error>> + Send + '_;

  /// Remove the first (lowest id) favorite matching `user_id` and `target`.
  ///
  /// Returns the removed record, or `None` if nothing matched. Duplicate
  /// favorites are removed one per call.
  fn delete_favorite(
    &self,
    user_id: i64,
    target: Target,
  ) -> impl Future<Output = Result<Option<Favorite>, Self::Error>> + Send + '_;

  /// All favorites owned by `user_id`, in insertion order.
  fn list_favorites(
    &self,
    user_id: i64,
  ) -> impl Future<Output = Result<Vec<Favorite>, Self::Error>> + Send + '_;
}

// ─── Combined ────────────────────────────────────────────────────────────────

/// A backend providing every store the services need.
pub trait Store: CatalogStore + UserStore + FavoriteRegistry {}

impl<T> Store for T where T: CatalogStore + UserStore + FavoriteRegistry {}
