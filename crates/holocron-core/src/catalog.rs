//! Catalog entities — the people and planets users can browse and favorite.
//!
//! Catalog records are read-only from this crate's point of view; they are
//! loaded by an operator (see `SqliteStore::seed`) and never mutated by a
//! request.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

// ─── Kind ────────────────────────────────────────────────────────────────────

/// The two partitions of the catalog.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum CatalogKind {
  Person,
  Planet,
}

// ─── Records ─────────────────────────────────────────────────────────────────

/// A character from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
  pub id:         i64,
  pub name:       String,
  #[serde(default)]
  pub height:     Option<String>,
  #[serde(default)]
  pub mass:       Option<String>,
  #[serde(default)]
  pub hair_color: Option<String>,
  #[serde(default)]
  pub eye_color:  Option<String>,
  #[serde(default)]
  pub gender:     Option<String>,
  #[serde(default)]
  pub birth_year: Option<String>,
}

impl Person {
  /// A person with only the required fields set.
  pub fn new(id: i64, name: impl Into<String>) -> Self {
    Self {
      id,
      name: name.into(),
      height: None,
      mass: None,
      hair_color: None,
      eye_color: None,
      gender: None,
      birth_year: None,
    }
  }
}

/// A planet from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Planet {
  pub id:         i64,
  pub name:       String,
  #[serde(default)]
  pub climate:    Option<String>,
  #[serde(default)]
  pub terrain:    Option<String>,
  #[serde(default)]
  pub population: Option<String>,
  #[serde(default)]
  pub diameter:   Option<String>,
  #[serde(default)]
  pub gravity:    Option<String>,
}

impl Planet {
  /// A planet with only the required fields set.
  pub fn new(id: i64, name: impl Into<String>) -> Self {
    Self {
      id,
      name: name.into(),
      climate: None,
      terrain: None,
      population: None,
      diameter: None,
      gravity: None,
    }
  }
}

// ─── Entity ──────────────────────────────────────────────────────────────────

/// Either kind of catalog record. Serialises as the bare inner record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CatalogEntity {
  Person(Person),
  Planet(Planet),
}

impl CatalogEntity {
  pub fn kind(&self) -> CatalogKind {
    match self {
      Self::Person(_) => CatalogKind::Person,
      Self::Planet(_) => CatalogKind::Planet,
    }
  }

  pub fn id(&self) -> i64 {
    match self {
      Self::Person(p) => p.id,
      Self::Planet(p) => p.id,
    }
  }

  pub fn name(&self) -> &str {
    match self {
      Self::Person(p) => &p.name,
      Self::Planet(p) => &p.name,
    }
  }
}

impl From<Person> for CatalogEntity {
  fn from(p: Person) -> Self { Self::Person(p) }
}

impl From<Planet> for CatalogEntity {
  fn from(p: Planet) -> Self { Self::Planet(p) }
}
