//! SQL schema for the Vitalog SQLite store.
//!
//! Executed once at connection startup. Idempotent thanks to `CREATE TABLE
//! IF NOT EXISTS`: opening an existing file neither fails nor touches
//! existing rows. Future migrations will be gated on `PRAGMA user_version`.

/// Full schema DDL.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- The measurement log is strictly append-only.
-- No UPDATE or DELETE is ever issued against this table.
CREATE TABLE IF NOT EXISTS health_data (
    recorded_at TEXT NOT NULL,   -- fixed-width RFC 3339, normalised to UTC
    category    TEXT NOT NULL,   -- 'pressure' | 'diabetes' | 'temperature' | 'pain' | 'heartbeat'
    value       TEXT NOT NULL,   -- canonical numeric string; free text for pain
    parameter   TEXT NOT NULL DEFAULT '',
    person      TEXT NOT NULL DEFAULT ''
);

PRAGMA user_version = 1;
";
