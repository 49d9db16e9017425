use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, DbErr, Statement};
use tracing::{debug, warn};
use xxhash_rust::xxh3::xxh3_64;

use crate::error::DbInfraError;

pub fn pg_lock_id(key: &str) -> i64 {
    xxh3_64(key.as_bytes()) as i64
}

// ============================================================================
// Transaction-scoped locks
// ============================================================================

/// Take a transaction-scoped exclusive lock on `key`.
///
/// On Postgres this blocks until `pg_advisory_xact_lock` is granted; the lock
/// is released automatically on commit or rollback, so `conn` must be a
/// transaction. SQLite serializes writers on its own and needs no lock.
pub async fn advisory_xact_lock<C: ConnectionTrait>(conn: &C, key: &str) -> Result<(), DbErr> {
    match conn.get_database_backend() {
        DatabaseBackend::Postgres => {
            let lock_key = pg_lock_id(key);
            let stmt = Statement::from_sql_and_values(
                DatabaseBackend::Postgres,
                "SELECT pg_advisory_xact_lock($1)",
                vec![lock_key.into()],
            );
            conn.execute(stmt).await?;
            debug!(lock_key, "Advisory transaction lock acquired");
            Ok(())
        }
        _ => Ok(()),
    }
}

// ============================================================================
// Session-scoped migration locks
// ============================================================================

/// Guard representing a held migration lock.
pub struct Guard {
    admin_pool: Option<DatabaseConnection>,
    lock_key: i64,
    released: bool,
}

impl Guard {
    fn postgres(admin_pool: DatabaseConnection, lock_key: i64) -> Self {
        Self {
            admin_pool: Some(admin_pool),
            lock_key,
            released: false,
        }
    }

    fn noop() -> Self {
        Self {
            admin_pool: None,
            lock_key: 0,
            released: false,
        }
    }

    /// Release the lock. Unlock failures are logged, never returned.
    pub async fn release(mut self) {
        if self.released {
            return;
        }
        self.released = true;

        let Some(admin_pool) = &self.admin_pool else {
            return;
        };

        let stmt = Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            "SELECT pg_advisory_unlock($1) AS unlocked",
            vec![self.lock_key.into()],
        );

        match admin_pool.query_one(stmt).await {
            Ok(Some(row)) => {
                let unlocked: bool = row.try_get("", "unlocked").unwrap_or(false);
                if !unlocked {
                    warn!(
                        code = "PG_UNLOCK_FALSE",
                        lock_key = self.lock_key,
                        "Advisory lock unlock returned false"
                    );
                }
            }
            Ok(None) => {
                warn!(
                    lock_key = self.lock_key,
                    "No result from advisory lock unlock query"
                );
            }
            Err(e) => {
                warn!(error = %e, lock_key = self.lock_key, "Failed to unlock advisory lock");
            }
        }
    }
}

/// Migration lock acquisition.
#[async_trait]
pub trait BootstrapLock {
    /// Try to acquire the lock (non-blocking).
    /// Returns Some(Guard) if acquired, None if already held elsewhere.
    async fn try_acquire(&mut self) -> Result<Option<Guard>, DbInfraError>;
}

/// PostgreSQL session advisory lock.
///
/// INVARIANT: the admin pool is configured with min=max=1 so lock and unlock
/// run on the same physical session.
pub struct PgAdvisoryLock {
    admin_pool: DatabaseConnection,
    lock_key: i64,
}

impl PgAdvisoryLock {
    pub fn new(admin_pool: DatabaseConnection, key: &str) -> Self {
        Self {
            admin_pool,
            lock_key: pg_lock_id(key),
        }
    }
}

#[async_trait]
impl BootstrapLock for PgAdvisoryLock {
    async fn try_acquire(&mut self) -> Result<Option<Guard>, DbInfraError> {
        let lock_stmt = Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            "SELECT pg_try_advisory_lock($1) AS locked",
            vec![self.lock_key.into()],
        );

        let row = self
            .admin_pool
            .query_one(lock_stmt)
            .await
            .map_err(|e| DbInfraError::migration(format!("failed to acquire advisory lock: {e}")))?
            .ok_or_else(|| DbInfraError::migration("pg_try_advisory_lock returned no row"))?;

        let locked: bool = row
            .try_get("", "locked")
            .map_err(|e| DbInfraError::migration(format!("failed to read lock result: {e}")))?;

        if !locked {
            return Ok(None);
        }

        Ok(Some(Guard::postgres(self.admin_pool.clone(), self.lock_key)))
    }
}

/// SQLite serializes schema changes itself; the lock always succeeds.
pub struct NoopLock;

#[async_trait]
impl BootstrapLock for NoopLock {
    async fn try_acquire(&mut self) -> Result<Option<Guard>, DbInfraError> {
        Ok(Some(Guard::noop()))
    }
}
