//! SQLite repository implementation using Diesel.
//!
//! All rows live in a single on-disk database file holding the `availability`
//! table.
//!
//! ## Features
//!
//! - Connection pooling with r2d2
//! - Busy timeout applied to every pooled connection
//! - Automatic migration execution on startup (idempotent)
//!
//! ## Configuration
//!
//! Environment variables:
//! - `DATABASE_URL` or `SQLITE_DATABASE_PATH`: Database file (default: `availability.db`)
//! - `SQLITE_POOL_MAX`: Maximum pool size (default: 8)
//! - `SQLITE_CONN_TIMEOUT_SEC`: Connection checkout timeout in seconds (default: 30)
//! - `SQLITE_BUSY_TIMEOUT_MS`: How long SQLite waits on a locked database (default: 5000)

use async_trait::async_trait;
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::sql_query;
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task;

use crate::api::{AvailabilityEntry, EntryId, NewAvailabilityEntry};
use crate::db::config::SqliteConfig;
use crate::db::repository::{
    AvailabilityRepository, ErrorContext, RepositoryError, RepositoryResult, ENTITY,
    SHIFT_NOT_FOUND,
};

mod models;
mod schema;

use models::*;
use schema::availability;

type SqlitePool = Pool<ConnectionManager<SqliteConnection>>;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("src/db/repositories/sqlite/migrations");

/// Pool health statistics.
#[derive(Debug, Clone, Default)]
pub struct PoolStats {
    /// Number of connections currently in use
    pub connections_in_use: u32,
    /// Number of idle connections
    pub idle_connections: u32,
    /// Total number of connections in the pool
    pub total_connections: u32,
    /// Maximum pool size
    pub max_size: u32,
    /// Total successful queries executed
    pub total_queries: u64,
    /// Total failed queries
    pub failed_queries: u64,
}

/// Per-connection setup run by the pool on every new connection.
#[derive(Debug, Clone, Copy)]
struct ConnectionOptions {
    busy_timeout_ms: u64,
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute(&format!("PRAGMA busy_timeout = {};", self.busy_timeout_ms))
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Diesel-backed repository for SQLite.
#[derive(Clone, Debug)]
pub struct SqliteRepository {
    pool: SqlitePool,
    config: SqliteConfig,
    total_queries: Arc<AtomicU64>,
    failed_queries: Arc<AtomicU64>,
}

impl SqliteRepository {
    /// Open (or create) the database file and run pending migrations.
    ///
    /// # Arguments
    /// * `config` - Database configuration
    ///
    /// # Returns
    /// * `Ok(SqliteRepository)` on success
    /// * `Err(RepositoryError)` if the pool cannot be built or migration fails
    pub fn new(config: SqliteConfig) -> RepositoryResult<Self> {
        let manager = ConnectionManager::<SqliteConnection>::new(config.connection_path());

        let pool = Pool::builder()
            .max_size(config.max_pool_size)
            .connection_timeout(Duration::from_secs(config.connection_timeout_sec))
            .connection_customizer(Box::new(ConnectionOptions {
                busy_timeout_ms: config.busy_timeout_ms,
            }))
            .test_on_check_out(true)
            .build(manager)
            .map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("create_pool").with_details(format!(
                        "path={} max_size={}",
                        config.connection_path(),
                        config.max_pool_size
                    )),
                )
            })?;

        {
            let mut conn = pool.get().map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("get_connection_for_migrations"),
                )
            })?;
            Self::run_migrations(&mut conn)?;
        }

        log::info!(
            "SQLite repository ready at {} (pool max {})",
            config.connection_path(),
            config.max_pool_size
        );

        Ok(Self {
            pool,
            config,
            total_queries: Arc::new(AtomicU64::new(0)),
            failed_queries: Arc::new(AtomicU64::new(0)),
        })
    }

    /// Run pending database migrations.
    fn run_migrations(conn: &mut SqliteConnection) -> RepositoryResult<()> {
        let applied = conn.run_pending_migrations(MIGRATIONS).map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Migration failed: {}", e),
                ErrorContext::new("run_migrations"),
            )
        })?;

        for version in &applied {
            log::info!("Applied migration {}", version);
        }

        Ok(())
    }

    /// Run a blocking database operation on a pooled connection.
    ///
    /// The connection is returned to the pool when the guard drops, on success
    /// and on every error path.
    async fn with_conn<T, F>(&self, operation: &'static str, f: F) -> RepositoryResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut SqliteConnection) -> RepositoryResult<T> + Send + 'static,
    {
        let pool = self.pool.clone();
        let total_queries = self.total_queries.clone();
        let failed_queries = self.failed_queries.clone();

        task::spawn_blocking(move || {
            let mut conn = pool.get().map_err(|e| {
                failed_queries.fetch_add(1, Ordering::Relaxed);
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new(operation).with_details("get_connection"),
                )
            })?;

            total_queries.fetch_add(1, Ordering::Relaxed);
            f(&mut *conn).map_err(|e| {
                if !e.is_not_found() {
                    failed_queries.fetch_add(1, Ordering::Relaxed);
                }
                e.with_operation(operation)
            })
        })
        .await
        .map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Task join error: {}", e),
                ErrorContext::new("spawn_blocking"),
            )
        })?
    }

    /// Get pool health statistics.
    pub fn get_pool_stats(&self) -> PoolStats {
        let state = self.pool.state();
        PoolStats {
            connections_in_use: state.connections - state.idle_connections,
            idle_connections: state.idle_connections,
            total_connections: state.connections,
            max_size: self.config.max_pool_size,
            total_queries: self.total_queries.load(Ordering::Relaxed),
            failed_queries: self.failed_queries.load(Ordering::Relaxed),
        }
    }

    pub fn config(&self) -> &SqliteConfig {
        &self.config
    }
}

#[async_trait]
impl AvailabilityRepository for SqliteRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        self.with_conn("health_check", |conn| {
            sql_query("SELECT 1").execute(conn)?;
            Ok(true)
        })
        .await
    }

    async fn insert_entry(
        &self,
        entry: &NewAvailabilityEntry,
    ) -> RepositoryResult<AvailabilityEntry> {
        let entry = entry.clone();
        self.with_conn("insert_entry", move |conn| {
            let row = diesel::insert_into(availability::table)
                .values(NewAvailabilityRow::from(&entry))
                .returning(AvailabilityRow::as_returning())
                .get_result::<AvailabilityRow>(conn)?;
            Ok(row.into())
        })
        .await
    }

    async fn list_by_user(&self, user_id: &str) -> RepositoryResult<Vec<AvailabilityEntry>> {
        let user_id = user_id.to_string();
        self.with_conn("list_by_user", move |conn| {
            let rows = availability::table
                .filter(availability::user_id.eq(&user_id))
                .order_by((
                    availability::day.asc(),
                    availability::time_slot.asc(),
                    availability::id.asc(),
                ))
                .select(AvailabilityRow::as_select())
                .load::<AvailabilityRow>(conn)?;
            Ok(rows.into_iter().map(Into::into).collect())
        })
        .await
    }

    async fn list_by_shift(
        &self,
        day: &str,
        time_slot: &str,
    ) -> RepositoryResult<Vec<AvailabilityEntry>> {
        let day = day.to_string();
        let time_slot = time_slot.to_string();
        self.with_conn("list_by_shift", move |conn| {
            let rows = availability::table
                .filter(availability::day.eq(&day))
                .filter(availability::time_slot.eq(&time_slot))
                .order_by(availability::id.asc())
                .select(AvailabilityRow::as_select())
                .load::<AvailabilityRow>(conn)?;
            Ok(rows.into_iter().map(Into::into).collect())
        })
        .await
    }

    async fn delete_entry(&self, id: EntryId) -> RepositoryResult<AvailabilityEntry> {
        self.with_conn("delete_entry", move |conn| {
            // Single DELETE ... RETURNING, so the read and the removal are one statement.
            let deleted = diesel::delete(availability::table.find(id.value()))
                .returning(AvailabilityRow::as_returning())
                .get_result::<AvailabilityRow>(conn)
                .optional()?;

            deleted.map(Into::into).ok_or_else(|| {
                RepositoryError::not_found_with_context(
                    SHIFT_NOT_FOUND,
                    ErrorContext::new("delete_entry")
                        .with_entity(ENTITY)
                        .with_entity_id(id),
                )
            })
        })
        .await
    }
}
