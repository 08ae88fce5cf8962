//! Database initialization and migrations.

use std::fs;
use std::path::Path;

use diesel::connection::SimpleConnection;
use diesel::sqlite::SqliteConnection;
use diesel::Connection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use log::{error, info};

use stockfolio_core::db::{get_connection, DbPool};
use stockfolio_core::errors::{DatabaseError, Error, Result};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Resolves the database file path, honoring `DATABASE_URL` when set.
pub fn get_db_path(app_data_dir: &str) -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| {
        Path::new(app_data_dir)
            .join("stockfolio.db")
            .to_str()
            .unwrap_or("stockfolio.db")
            .to_string()
    })
}

/// Creates the database file if needed and applies the global pragmas.
///
/// Returns the resolved database path; callers feed it to
/// [`stockfolio_core::db::create_pool`].
pub fn init(app_data_dir: &str) -> Result<String> {
    let db_path = get_db_path(app_data_dir);

    if let Some(db_dir) = Path::new(&db_path).parent() {
        if !db_dir.exists() {
            fs::create_dir_all(db_dir).map_err(|e| {
                Error::Database(DatabaseError::ConnectionFailed(format!(
                    "Failed to create database directory: {}",
                    e
                )))
            })?;
        }
    }

    let mut conn = SqliteConnection::establish(&db_path)?;
    conn.batch_execute(
        "\n        PRAGMA journal_mode = WAL;\n        PRAGMA foreign_keys = ON;\n        PRAGMA busy_timeout = 30000;\n        PRAGMA synchronous = NORMAL;\n    ",
    )?;

    Ok(db_path)
}

/// Runs any pending embedded migrations.
pub fn run_migrations(pool: &DbPool) -> Result<()> {
    info!("Running database migrations");
    let mut connection = get_connection(pool)?;

    let applied = connection.run_pending_migrations(MIGRATIONS).map_err(|e| {
        error!("Database migration failed: {}", e);
        Error::Database(DatabaseError::MigrationFailed(e.to_string()))
    })?;

    if applied.is_empty() {
        info!("No pending migrations to apply.");
    } else {
        for migration_version in &applied {
            info!("Applied migration {}", migration_version);
        }
    }

    Ok(())
}
