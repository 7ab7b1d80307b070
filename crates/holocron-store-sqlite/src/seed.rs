//! Bulk loading of users and catalog entities.
//!
//! The request path never writes users, people, or planets. Operators load
//! them with a [`Seed`], typically parsed from a JSON file:
//!
//! ```json
//! { "users": [...], "people": [...], "planets": [...] }
//! ```

use holocron_core::{
  catalog::{Person, Planet},
  user::User,
};
use serde::Deserialize;
use tracing::info;

use crate::{
  Result, SqliteStore,
  store::{upsert_person, upsert_planet, upsert_user},
};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Seed {
  pub users:   Vec<User>,
  pub people:  Vec<Person>,
  pub planets: Vec<Planet>,
}

/// Row counts written by [`SqliteStore::seed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
  pub users:   usize,
  pub people:  usize,
  pub planets: usize,
}

impl SqliteStore {
  /// Write every record in `seed` in one transaction. Existing rows with the
  /// same ids are updated in place, so re-running a seed is harmless. A user
  /// whose email already belongs to another id fails the whole seed.
  pub async fn seed(&self, seed: Seed) -> Result<SeedSummary> {
    let summary = SeedSummary {
      users:   seed.users.len(),
      people:  seed.people.len(),
      planets: seed.planets.len(),
    };

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        for user in &seed.users {
          upsert_user(&tx, user)?;
        }
        for person in &seed.people {
          upsert_person(&tx, person)?;
        }
        for planet in &seed.planets {
          upsert_planet(&tx, planet)?;
        }
        tx.commit()?;
        Ok(())
      })
      .await?;

    info!(
      users = summary.users,
      people = summary.people,
      planets = summary.planets,
      "seeded store"
    );
    Ok(summary)
  }
}
