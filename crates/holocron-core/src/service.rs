//! Operation surface over the stores: favorites mutations and catalog reads.
//!
//! Both services are cheap to clone; they share the backend through an
//! [`Arc`] supplied by the caller.

use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;

use crate::{
  Error, Result,
  catalog::{CatalogEntity, CatalogKind},
  favorite::{Favorite, Target},
  store::{CatalogStore, Store, UserStore},
  user::User,
};

// ─── Policy ──────────────────────────────────────────────────────────────────

/// Optional strictness for favorite mutations. The default accepts any ids on
/// create and treats removal of a missing favorite as success.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FavoritesPolicy {
  /// Reject `add_favorite` when the user or the target entity is unknown.
  pub verify_references:      bool,
  /// Fail `remove_favorite` with [`Error::FavoriteNotFound`] when nothing
  /// matched.
  pub report_missing_removal: bool,
}

// ─── Favorites ───────────────────────────────────────────────────────────────

/// Outcome of [`FavoritesService::remove_favorite`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Removal {
  Removed(Favorite),
  NothingToRemove,
}

impl Removal {
  pub fn removed(&self) -> Option<&Favorite> {
    match self {
      Self::Removed(f) => Some(f),
      Self::NothingToRemove => None,
    }
  }
}

pub struct FavoritesService<S> {
  store:  Arc<S>,
  policy: FavoritesPolicy,
}

impl<S> Clone for FavoritesService<S> {
  fn clone(&self) -> Self {
    Self { store: Arc::clone(&self.store), policy: self.policy }
  }
}

impl<S> FavoritesService<S>
where
  S: Store,
{
  pub fn new(store: Arc<S>, policy: FavoritesPolicy) -> Self {
    Self { store, policy }
  }

  /// Record that `user_id` favors `target`.
  pub async fn add_favorite(
    &self,
    user_id: i64,
    target: Target,
  ) -> Result<Favorite> {
    if self.policy.verify_references {
      self.verify_references(user_id, target).await?;
    }

    let favorite = self
      .store
      .create_favorite(user_id, target)
      .await
      .map_err(Error::store)?;

    debug!(favorite_id = favorite.id, user_id, %target, "favorite added");
    Ok(favorite)
  }

  /// Remove one favorite of `target` for `user_id`.
  pub async fn remove_favorite(
    &self,
    user_id: i64,
    target: Target,
  ) -> Result<Removal> {
    let removed = self
      .store
      .delete_favorite(user_id, target)
      .await
      .map_err(Error::store)?;

    match removed {
      Some(favorite) => {
        debug!(favorite_id = favorite.id, user_id, %target, "favorite removed");
        Ok(Removal::Removed(favorite))
      }
      None if self.policy.report_missing_removal => {
        Err(Error::FavoriteNotFound { user_id, target })
      }
      None => {
        debug!(user_id, %target, "no favorite to remove");
        Ok(Removal::NothingToRemove)
      }
    }
  }

  pub async fn list_favorites(&self, user_id: i64) -> Result<Vec<Favorite>> {
    self.store.list_favorites(user_id).await.map_err(Error::store)
  }

  async fn verify_references(&self, user_id: i64, target: Target) -> Result<()> {
    let user_exists = self
      .store
      .user_exists(user_id)
      .await
      .map_err(Error::store)?;
    if !user_exists {
      return Err(Error::UserNotFound(user_id));
    }

    self
      .store
      .get_entity(target.kind(), target.id())
      .await
      .map_err(Error::store)?
      .ok_or_else(|| not_found(target.kind(), target.id()))?;
    Ok(())
  }
}

// ─── Catalog ─────────────────────────────────────────────────────────────────

pub struct CatalogService<S> {
  store: Arc<S>,
}

impl<S> Clone for CatalogService<S> {
  fn clone(&self) -> Self { Self { store: Arc::clone(&self.store) } }
}

impl<S> CatalogService<S>
where
  S: CatalogStore + UserStore,
{
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  pub async fn list_users(&self) -> Result<Vec<User>> {
    self.store.list_users().await.map_err(Error::store)
  }

  pub async fn list_entities(
    &self,
    kind: CatalogKind,
  ) -> Result<Vec<CatalogEntity>> {
    self.store.list_entities(kind).await.map_err(Error::store)
  }

  /// Fetch one entity; a miss is reported as an error, unlike favorite
  /// removal.
  pub async fn get_entity(
    &self,
    kind: CatalogKind,
    id: i64,
  ) -> Result<CatalogEntity> {
    self
      .store
      .get_entity(kind, id)
      .await
      .map_err(Error::store)?
      .ok_or_else(|| not_found(kind, id))
  }
}

fn not_found(kind: CatalogKind, id: i64) -> Error {
  match kind {
    CatalogKind::Person => Error::PersonNotFound(id),
    CatalogKind::Planet => Error::PlanetNotFound(id),
  }
}
