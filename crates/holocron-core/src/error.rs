//! Error types for `holocron-core`.

use thiserror::Error;

use crate::favorite::Target;

#[derive(Debug, Error)]
pub enum Error {
  #[error("user not found: {0}")]
  UserNotFound(i64),

  #[error("person not found: {0}")]
  PersonNotFound(i64),

  #[error("planet not found: {0}")]
  PlanetNotFound(i64),

  #[error("no favorite of {target} for user {user_id}")]
  FavoriteNotFound { user_id: i64, target: Target },

  /// A stored or submitted favorite row names both catalog entities, or
  /// neither.
  #[error("favorite {id} must reference exactly one of person or planet")]
  InvalidFavorite { id: i64 },

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Wrap a backend error.
  pub fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(e))
  }

  /// Whether this error reports a missing record rather than a failure.
  pub fn is_not_found(&self) -> bool {
    matches!(
      self,
      Self::UserNotFound(_)
        | Self::PersonNotFound(_)
        | Self::PlanetNotFound(_)
        | Self::FavoriteNotFound { .. }
    )
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
