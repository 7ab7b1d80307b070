//! [`SqliteStore`] — the SQLite implementation of the Holocron store traits.

use std::path::Path;

use holocron_core::{
  catalog::{CatalogEntity, CatalogKind, Person, Planet},
  favorite::{Favorite, Target},
  store::{CatalogStore, FavoriteRegistry, UserStore},
  user::User,
};
use rusqlite::OptionalExtension as _;

use crate::{
  Result,
  encode::{
    FAVORITE_COLUMNS, PERSON_COLUMNS, PLANET_COLUMNS, RawUser, decode_favorite,
    encode_dt, favorite_record_from_row, person_from_row, planet_from_row,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Holocron store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Fixture writes ────────────────────────────────────────────────────────
  //
  // Users and catalog entities are owned outside the request path. These
  // helpers update any existing row with the same id; a clash on another
  // unique column (a user's email) is an error.

  pub async fn insert_user(&self, user: User) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        upsert_user(conn, &user)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  pub async fn insert_person(&self, person: Person) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        upsert_person(conn, &person)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  pub async fn insert_planet(&self, planet: Planet) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        upsert_planet(conn, &planet)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── Row writers ─────────────────────────────────────────────────────────────

pub(crate) fn upsert_user(
  conn: &rusqlite::Connection,
  user: &User,
) -> rusqlite::Result<()> {
  conn.execute(
    "INSERT INTO users (id, email, subscription_date)
     VALUES (?1, ?2, ?3)
     ON CONFLICT(id) DO UPDATE SET
       email             = excluded.email,
       subscription_date = excluded.subscription_date",
    rusqlite::params![user.id, user.email, encode_dt(user.subscription_date)],
  )?;
  Ok(())
}

pub(crate) fn upsert_person(
  conn: &rusqlite::Connection,
  p: &Person,
) -> rusqlite::Result<()> {
  conn.execute(
    "INSERT INTO people (
       id, name, height, mass, hair_color, eye_color, gender, birth_year
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
     ON CONFLICT(id) DO UPDATE SET
       name       = excluded.name,
       height     = excluded.height,
       mass       = excluded.mass,
       hair_color = excluded.hair_color,
       eye_color  = excluded.eye_color,
       gender     = excluded.gender,
       birth_year = excluded.birth_year",
    rusqlite::params![
      p.id,
      p.name,
      p.height,
      p.mass,
      p.hair_color,
      p.eye_color,
      p.gender,
      p.birth_year,
    ],
  )?;
  Ok(())
}

pub(crate) fn upsert_planet(
  conn: &rusqlite::Connection,
  p: &Planet,
) -> rusqlite::Result<()> {
  conn.execute(
    "INSERT INTO planets (
       id, name, climate, terrain, population, diameter, gravity
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
     ON CONFLICT(id) DO UPDATE SET
       name       = excluded.name,
       climate    = excluded.climate,
       terrain    = excluded.terrain,
       population = excluded.population,
       diameter   = excluded.diameter,
       gravity    = excluded.gravity",
    rusqlite::params![
      p.id,
      p.name,
      p.climate,
      p.terrain,
      p.population,
      p.diameter,
      p.gravity,
    ],
  )?;
  Ok(())
}

// ─── CatalogStore impl ───────────────────────────────────────────────────────

impl CatalogStore for SqliteStore {
  type Error = crate::Error;

  async fn get_entity(
    &self,
    kind: CatalogKind,
    id: i64,
  ) -> Result<Option<CatalogEntity>> {
    let entity = self
      .conn
      .call(move |conn| {
        let entity = match kind {
          CatalogKind::Person => conn
            .query_row(
              &format!("SELECT {PERSON_COLUMNS} FROM people WHERE id = ?1"),
              rusqlite::params![id],
              person_from_row,
            )
            .optional()?
            .map(CatalogEntity::Person),
          CatalogKind::Planet => conn
            .query_row(
              &format!("SELECT {PLANET_COLUMNS} FROM planets WHERE id = ?1"),
              rusqlite::params![id],
              planet_from_row,
            )
            .optional()?
            .map(CatalogEntity::Planet),
        };
        Ok(entity)
      })
      .await?;
    Ok(entity)
  }

  async fn list_entities(&self, kind: CatalogKind) -> Result<Vec<CatalogEntity>> {
    let entities = self
      .conn
      .call(move |conn| {
        let rows = match kind {
          CatalogKind::Person => {
            let mut stmt =
              conn.prepare(&format!("SELECT {PERSON_COLUMNS} FROM people"))?;
            stmt
              .query_map([], |row| person_from_row(row).map(CatalogEntity::Person))?
              .collect::<rusqlite::Result<Vec<_>>>()?
          }
          CatalogKind::Planet => {
            let mut stmt =
              conn.prepare(&format!("SELECT {PLANET_COLUMNS} FROM planets"))?;
            stmt
              .query_map([], |row| planet_from_row(row).map(CatalogEntity::Planet))?
              .collect::<rusqlite::Result<Vec<_>>>()?
          }
        };
        Ok(rows)
      })
      .await?;
    Ok(entities)
  }
}

// ─── UserStore impl ──────────────────────────────────────────────────────────

impl UserStore for SqliteStore {
  type Error = crate::Error;

  async fn user_exists(&self, id: i64) -> Result<bool> {
    let exists = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT 1 FROM users WHERE id = ?1",
              rusqlite::params![id],
              |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false),
        )
      })
      .await?;
    Ok(exists)
  }

  async fn list_users(&self) -> Result<Vec<User>> {
    let raws: Vec<RawUser> = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare("SELECT id, email, subscription_date FROM users")?;
        let rows = stmt
          .query_map([], RawUser::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawUser::into_user).collect()
  }
}

// ─── FavoriteRegistry impl ───────────────────────────────────────────────────

impl FavoriteRegistry for SqliteStore {
  type Error = crate::Error;

  async fn create_favorite(&self, user_id: i64, target: Target) -> Result<Favorite> {
    let person_id = target.person_id();
    let planet_id = target.planet_id();

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO favorites (user_id, person_id, planet_id) VALUES (?1, ?2, ?3)",
          rusqlite::params![user_id, person_id, planet_id],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Favorite { id, user_id, target })
  }

  async fn delete_favorite(
    &self,
    user_id: i64,
    target: Target,
  ) -> Result<Option<Favorite>> {
    // One statement, so selecting and removing the match is atomic.
    let sql = match target.kind() {
      CatalogKind::Person => format!(
        "DELETE FROM favorites WHERE id = (
           SELECT id FROM favorites
           WHERE user_id = ?1 AND person_id = ?2
           ORDER BY id LIMIT 1
         ) RETURNING {FAVORITE_COLUMNS}"
      ),
      CatalogKind::Planet => format!(
        "DELETE FROM favorites WHERE id = (
           SELECT id FROM favorites
           WHERE user_id = ?1 AND planet_id = ?2
           ORDER BY id LIMIT 1
         ) RETURNING {FAVORITE_COLUMNS}"
      ),
    };
    let target_id = target.id();

    let record = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &sql,
              rusqlite::params![user_id, target_id],
              favorite_record_from_row,
            )
            .optional()?,
        )
      })
      .await?;

    record.map(decode_favorite).transpose()
  }

  async fn list_favorites(&self, user_id: i64) -> Result<Vec<Favorite>> {
    let records = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {FAVORITE_COLUMNS} FROM favorites WHERE user_id = ?1 ORDER BY id"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![user_id], favorite_record_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    records.into_iter().map(decode_favorite).collect()
  }
}
