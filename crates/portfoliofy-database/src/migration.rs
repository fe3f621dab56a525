//! Embedded schema migrations.

use std::collections::HashSet;

use serde::Serialize;
use sqlx::migrate::{Migrate, Migrator};
use sqlx::{PgConnection, PgPool};
use tracing::{debug, info};

use portfoliofy_core::config::DatabaseConfig;
use portfoliofy_core::error::{AppError, ErrorKind};

static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Apply every pending migration.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    info!(
        available = MIGRATOR.iter().count(),
        "Applying schema migrations"
    );

    MIGRATOR.run(pool).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Database,
            format!("Failed to run migrations: {e}"),
            e,
        )
    })?;

    info!("Schema is up to date");
    Ok(())
}

/// Apply migrations when `database.run_migrations` is set.
pub async fn run_if_enabled(pool: &PgPool, config: &DatabaseConfig) -> Result<(), AppError> {
    if !config.run_migrations {
        debug!("Skipping migrations (database.run_migrations = false)");
        return Ok(());
    }
    run_migrations(pool).await
}

/// One embedded migration and whether the database has applied it.
#[derive(Debug, Clone, Serialize)]
pub struct MigrationStatus {
    /// Migration version (timestamp prefix).
    pub version: i64,
    /// Human-readable description from the file name.
    pub description: String,
    /// Whether the migration is recorded as applied.
    pub applied: bool,
}

/// Status of every embedded migration, oldest first.
pub async fn migration_status(pool: &PgPool) -> Result<Vec<MigrationStatus>, AppError> {
    let migrate_err = |e: sqlx::migrate::MigrateError| {
        AppError::with_source(
            ErrorKind::Database,
            format!("Failed to read migration status: {e}"),
            e,
        )
    };

    let mut conn = pool
        .acquire()
        .await
        .map_err(|e| crate::error::db_error("acquire connection", e))?;
    let conn: &mut PgConnection = &mut conn;
    conn.ensure_migrations_table().await.map_err(migrate_err)?;
    let applied: HashSet<i64> = conn
        .list_applied_migrations()
        .await
        .map_err(migrate_err)?
        .into_iter()
        .map(|m| m.version)
        .collect();

    Ok(MIGRATOR
        .iter()
        .map(|m| MigrationStatus {
            version: m.version,
            description: m.description.to_string(),
            applied: applied.contains(&m.version),
        })
        .collect())
}
