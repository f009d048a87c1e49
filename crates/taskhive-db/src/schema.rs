//! Schema definitions and migration runner for SurrealDB.
//!
//! All table definitions use SCHEMAFULL mode for data integrity.
//! UUIDs are stored as strings. Enums are stored as strings with
//! ASSERT constraints for validation.

use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::info;

use crate::error::DbError;

// -----------------------------------------------------------------------
// Migration tracking
// -----------------------------------------------------------------------

const MIGRATION_TABLE_DDL: &str = "\
DEFINE TABLE IF NOT EXISTS _migration SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS version ON TABLE _migration TYPE int;
DEFINE FIELD IF NOT EXISTS name ON TABLE _migration TYPE string;
DEFINE FIELD IF NOT EXISTS applied_at ON TABLE _migration TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX IF NOT EXISTS idx_migration_version ON TABLE _migration \
    COLUMNS version UNIQUE;
";

#[derive(Debug, SurrealValue)]
struct MigrationRecord {
    version: u32,
    #[allow(dead_code)]
    name: String,
}

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

static MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial_schema",
    sql: SCHEMA_V1,
}];

// -----------------------------------------------------------------------
// Schema v1 — initial table definitions
// -----------------------------------------------------------------------

const SCHEMA_V1: &str = "\
-- =======================================================================
-- Users
-- =======================================================================
DEFINE TABLE user SCHEMAFULL;
DEFINE FIELD name ON TABLE user TYPE string;
DEFINE FIELD email ON TABLE user TYPE string;
DEFINE FIELD password_hash ON TABLE user TYPE string;
DEFINE FIELD refresh_token_hash ON TABLE user TYPE option<string>;
DEFINE FIELD created_at ON TABLE user TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE user TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_user_email ON TABLE user COLUMNS email UNIQUE;
DEFINE INDEX idx_user_refresh_token ON TABLE user \
    COLUMNS refresh_token_hash;

-- =======================================================================
-- Todos (scoped to owning user)
-- =======================================================================
DEFINE TABLE todo SCHEMAFULL;
DEFINE FIELD user_id ON TABLE todo TYPE string;
DEFINE FIELD title ON TABLE todo TYPE string;
DEFINE FIELD description ON TABLE todo TYPE string DEFAULT '';
DEFINE FIELD status ON TABLE todo TYPE string \
    ASSERT $value IN ['pending', 'in-progress', 'completed'];
DEFINE FIELD priority ON TABLE todo TYPE string \
    ASSERT $value IN ['low', 'medium', 'high'];
DEFINE FIELD category ON TABLE todo TYPE string DEFAULT 'general';
DEFINE FIELD tags ON TABLE todo TYPE array<string> DEFAULT [];
DEFINE FIELD due_date ON TABLE todo TYPE option<datetime>;
DEFINE FIELD reminder ON TABLE todo TYPE option<datetime>;
DEFINE FIELD is_archived ON TABLE todo TYPE bool DEFAULT false;
DEFINE FIELD completed_at ON TABLE todo TYPE option<datetime>;
DEFINE FIELD created_at ON TABLE todo TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE todo TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_todo_user_status ON TABLE todo COLUMNS user_id, status;
DEFINE INDEX idx_todo_user_priority ON TABLE todo \
    COLUMNS user_id, priority;
DEFINE INDEX idx_todo_user_category ON TABLE todo \
    COLUMNS user_id, category;
DEFINE INDEX idx_todo_user_created ON TABLE todo \
    COLUMNS user_id, created_at;
";

/// Apply all pending migrations in version order.
///
/// Safe to run on every startup: applied versions are recorded in the
/// `_migration` table and skipped on subsequent runs.
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    db.query(MIGRATION_TABLE_DDL).await?.check()?;

    let mut result = db
        .query("SELECT version, name FROM _migration ORDER BY version ASC")
        .await?;
    let applied: Vec<MigrationRecord> = result.take(0)?;
    let latest = applied.iter().map(|m| m.version).max().unwrap_or(0);

    for migration in MIGRATIONS.iter().filter(|m| m.version > latest) {
        info!(
            version = migration.version,
            name = migration.name,
            "Applying migration"
        );
        db.query(migration.sql).await?.check()?;
        db.query(
            "CREATE _migration SET version = $version, name = $name",
        )
        .bind(("version", migration.version))
        .bind(("name", migration.name.to_string()))
        .await?
        .check()?;
    }

    Ok(())
}
