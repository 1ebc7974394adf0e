//! SQL schema for the gumma SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS people (
    person_id TEXT PRIMARY KEY,
    cid       TEXT NOT NULL UNIQUE
);

-- Timestamps are fixed-width RFC 3339 UTC strings, so text comparison
-- orders them chronologically.
CREATE TABLE IF NOT EXISTS groups (
    group_id     TEXT PRIMARY KEY,
    group_type   TEXT NOT NULL,   -- 'COMMITTEE'
    name         TEXT,
    active_start TEXT NOT NULL,
    active_end   TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS members (
    member_id TEXT PRIMARY KEY,
    person_id TEXT NOT NULL REFERENCES people(person_id) ON DELETE CASCADE,
    group_id  TEXT NOT NULL REFERENCES groups(group_id)  ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS groups_window_idx   ON groups(active_start, active_end);
CREATE INDEX IF NOT EXISTS members_person_idx  ON members(person_id);
CREATE INDEX IF NOT EXISTS members_group_idx   ON members(group_id);

PRAGMA user_version = 1;
";
