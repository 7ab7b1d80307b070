//! Conversions between SQLite rows and domain types.
//!
//! Timestamps are stored as RFC 3339 strings. Favorite rows are decoded
//! through [`FavoriteRecord`] so the one-target rule is checked on read.

use chrono::{DateTime, Utc};
use holocron_core::{
  catalog::{Person, Planet},
  favorite::{Favorite, FavoriteRecord},
  user::User,
};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Column lists ────────────────────────────────────────────────────────────

pub const PERSON_COLUMNS: &str =
  "id, name, height, mass, hair_color, eye_color, gender, birth_year";

pub const PLANET_COLUMNS: &str =
  "id, name, climate, terrain, population, diameter, gravity";

pub const FAVORITE_COLUMNS: &str = "id, user_id, person_id, planet_id";

// ─── Row mappers ─────────────────────────────────────────────────────────────

pub fn person_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Person> {
  Ok(Person {
    id:         row.get(0)?,
    name:       row.get(1)?,
    height:     row.get(2)?,
    mass:       row.get(3)?,
    hair_color: row.get(4)?,
    eye_color:  row.get(5)?,
    gender:     row.get(6)?,
    birth_year: row.get(7)?,
  })
}

pub fn planet_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Planet> {
  Ok(Planet {
    id:         row.get(0)?,
    name:       row.get(1)?,
    climate:    row.get(2)?,
    terrain:    row.get(3)?,
    population: row.get(4)?,
    diameter:   row.get(5)?,
    gravity:    row.get(6)?,
  })
}

pub fn favorite_record_from_row(
  row: &rusqlite::Row<'_>,
) -> rusqlite::Result<FavoriteRecord> {
  Ok(FavoriteRecord {
    id:        row.get(0)?,
    user_id:   row.get(1)?,
    person_id: row.get(2)?,
    planet_id: row.get(3)?,
  })
}

pub fn decode_favorite(record: FavoriteRecord) -> Result<Favorite> {
  Ok(Favorite::try_from(record)?)
}

// ─── Raw rows ────────────────────────────────────────────────────────────────

/// A `users` row before the timestamp is parsed.
pub struct RawUser {
  pub id:                i64,
  pub email:             String,
  pub subscription_date: String,
}

impl RawUser {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:                row.get(0)?,
      email:             row.get(1)?,
      subscription_date: row.get(2)?,
    })
  }

  pub fn into_user(self) -> Result<User> {
    Ok(User {
      id:                self.id,
      email:             self.email,
      subscription_date: decode_dt(&self.subscription_date)?,
    })
  }
}
