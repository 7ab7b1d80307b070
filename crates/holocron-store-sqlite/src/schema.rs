//! SQL schema for the Holocron SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// Foreign keys are declared but not enforced: favorites may name users or
/// entities that do not exist. The bundled SQLite defaults enforcement on, so
/// it is switched off explicitly for the connection.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = OFF;

CREATE TABLE IF NOT EXISTS users (
    id                INTEGER PRIMARY KEY,
    email             TEXT NOT NULL UNIQUE,
    subscription_date TEXT NOT NULL       -- RFC 3339 UTC
);

CREATE TABLE IF NOT EXISTS people (
    id         INTEGER PRIMARY KEY,
    name       TEXT NOT NULL,
    height     TEXT,
    mass       TEXT,
    hair_color TEXT,
    eye_color  TEXT,
    gender     TEXT,
    birth_year TEXT
);

CREATE TABLE IF NOT EXISTS planets (
    id         INTEGER PRIMARY KEY,
    name       TEXT NOT NULL,
    climate    TEXT,
    terrain    TEXT,
    population TEXT,
    diameter   TEXT,
    gravity    TEXT
);

-- Rows are inserted and deleted, never updated.
-- Duplicate (user, target) pairs are allowed.
CREATE TABLE IF NOT EXISTS favorites (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id   INTEGER NOT NULL REFERENCES users(id),
    person_id INTEGER REFERENCES people(id),
    planet_id INTEGER REFERENCES planets(id),
    CHECK ((person_id IS NULL) <> (planet_id IS NULL))
);

CREATE INDEX IF NOT EXISTS favorites_user_idx ON favorites(user_id);

PRAGMA user_version = 1;
";
