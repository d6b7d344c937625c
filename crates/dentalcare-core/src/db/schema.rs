//! SQLite schema definition.

/// Complete database schema for dentalcare.
pub const SCHEMA: &str = r#"
-- ============================================================================
-- Key-Value Store
-- ============================================================================
-- Each collection lives under one fixed key as a JSON-serialized array,
-- mirroring the localStorage layout the app's export files were built on.

CREATE TABLE IF NOT EXISTS kv_store (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);
"#;
