//! SQL schema for the Roster SQLite store.
//!
//! Applied once, when `PRAGMA user_version` is still 0. Seed rows are
//! inserted in the same step, so they land exactly once per database file.

/// Version written to `PRAGMA user_version` after the schema is created.
pub const SCHEMA_VERSION: i64 = 1;

/// Pragmas applied on every connection.
pub const PRAGMAS: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;
";

/// Table DDL. `country_name` carries no UNIQUE constraint; uniqueness is a
/// service-level check only.
pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS countries (
    country_id   TEXT PRIMARY KEY,
    country_name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS persons (
    person_id            TEXT PRIMARY KEY,
    person_name          TEXT,
    email                TEXT,
    date_of_birth        TEXT,             -- YYYY-MM-DD or NULL
    gender               TEXT,             -- 'Male' | 'Female' | 'Other'
    country_id           TEXT REFERENCES countries(country_id),
    address              TEXT,
    receive_news_letters INTEGER NOT NULL DEFAULT 0
);

CREATE INDEX IF NOT EXISTS countries_name_idx ON countries(country_name);
";
