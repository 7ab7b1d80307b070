//! Favorites — a user's association with exactly one catalog entity.
//!
//! Inside the crate a favorite carries a [`Target`], so a record naming both a
//! person and a planet (or neither) cannot be constructed. The flat
//! `{id, user_id, person_id, planet_id}` shape only exists on the wire and in
//! storage, and is validated on the way in.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, catalog::CatalogKind};

// ─── Target ──────────────────────────────────────────────────────────────────

/// A tagged reference to a catalog entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
  Person(i64),
  Planet(i64),
}

impl Target {
  pub fn new(kind: CatalogKind, id: i64) -> Self {
    match kind {
      CatalogKind::Person => Self::Person(id),
      CatalogKind::Planet => Self::Planet(id),
    }
  }

  pub fn kind(&self) -> CatalogKind {
    match self {
      Self::Person(_) => CatalogKind::Person,
      Self::Planet(_) => CatalogKind::Planet,
    }
  }

  pub fn id(&self) -> i64 {
    match *self {
      Self::Person(id) | Self::Planet(id) => id,
    }
  }

  pub fn person_id(&self) -> Option<i64> {
    match *self {
      Self::Person(id) => Some(id),
      Self::Planet(_) => None,
    }
  }

  pub fn planet_id(&self) -> Option<i64> {
    match *self {
      Self::Planet(id) => Some(id),
      Self::Person(_) => None,
    }
  }
}

impl fmt::Display for Target {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} {}", self.kind(), self.id())
  }
}

// ─── Favorite ────────────────────────────────────────────────────────────────

/// A stored favorite. Never updated in place; created and deleted whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "FavoriteRecord", try_from = "FavoriteRecord")]
pub struct Favorite {
  pub id:      i64,
  pub user_id: i64,
  pub target:  Target,
}

/// The flat row form of a [`Favorite`], with nullable per-kind foreign keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteRecord {
  pub id:        i64,
  pub user_id:   i64,
  pub person_id: Option<i64>,
  pub planet_id: Option<i64>,
}

impl From<Favorite> for FavoriteRecord {
  fn from(f: Favorite) -> Self {
    Self {
      id:        f.id,
      user_id:   f.user_id,
      person_id: f.target.person_id(),
      planet_id: f.target.planet_id(),
    }
  }
}

impl TryFrom<FavoriteRecord> for Favorite {
  type Error = Error;

  fn try_from(r: FavoriteRecord) -> Result<Self, Self::Error> {
    let target = match (r.person_id, r.planet_id) {
      (Some(id), None) => Target::Person(id),
      (None, Some(id)) => Target::Planet(id),
      _ => return Err(Error::InvalidFavorite { id: r.id }),
    };
    Ok(Self { id: r.id, user_id: r.user_id, target })
  }
}
