//! Worldwide Freight Storage
//!
//! `SQLite` persistence layer for identities, commodities and carriers.
//!
//! # Architecture
//!
//! - **Audited writes**: every insert and update goes through [`UnitOfWork`],
//!   which stamps `created_at`/`updated_at` on all pending entities with one
//!   captured instant before writing them in a single transaction
//! - **Uniqueness guard**: [`check_conflict`] is a read performed before
//!   inserting an entity whose business key must be unique. It is advisory;
//!   the schema carries no unique constraint
//! - **Vertical slicing**: each entity owns its own queries and row mapping
//!
//! # Example
//!
//! ```rust,no_run
//! use freight_core::Commodity;
//! use freight_storage::{create_pool, persist_audited, run_migrations};
//! use mockable::DefaultClock;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://freight.db").await?;
//! run_migrations(&pool).await?;
//!
//! let steel = persist_audited(&pool, &DefaultClock, Commodity::new("Steel", "STL"), true).await?;
//! assert_eq!(steel.audit.created_at, steel.audit.updated_at);
//! # Ok(())
//! # }
//! ```

mod error;
mod guard;
mod records;
mod unit_of_work;

// Vertical slices
pub mod carriers;
pub mod commodities;
pub mod users;

pub use error::{Result, StorageError};
pub use guard::{check_conflict, UniqueCandidate};
pub use records::{delete, table_name, AuditedRecord};
pub use unit_of_work::{persist_audited, EntryState, UnitOfWork};

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// This should be called once when the application starts to ensure
/// the database schema is up to date.
///
/// # Errors
///
/// Returns an error if migrations fail to run
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    MIGRATOR.run(pool).await?;
    tracing::debug!("Database migrations applied");
    Ok(())
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://freight.db>`)
///
/// # Errors
///
/// Returns an error if the connection fails
pub async fn create_pool(database_url: &str) -> Result<SqlitePool> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!(database_url, "Creating SQLite pool");

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

    tracing::info!("SQLite pool ready");

    Ok(pool)
}
