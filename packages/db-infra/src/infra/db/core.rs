use std::future::Future;
use std::time::{Duration, Instant};

use migration::{migrate, MigrationCommand, Migrator, MigratorTrait};
use rand::Rng;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use tracing::{info, trace, warn};

use crate::config::db::{sanitize_db_url, DbKind, PoolSettings, StorageCredentials};
use crate::error::DbInfraError;
use crate::infra::db::locking::{BootstrapLock, NoopLock, PgAdvisoryLock};

const MIGRATE_LOCK_TIMEOUT_VAR: &str = "MIGRATE_LOCK_TIMEOUT_MS";

async fn retry_connection<T, F, Fut>(
    mut connect_fn: F,
    max_attempts: u32,
    interval_ms: u64,
) -> Result<T, DbInfraError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, DbInfraError>>,
{
    let mut last_error = None;

    for attempt in 1..=max_attempts {
        match connect_fn().await {
            Ok(result) => {
                if attempt > 1 {
                    info!(
                        "connection_retry=success attempts={} interval_ms={}",
                        attempt, interval_ms
                    );
                }
                return Ok(result);
            }
            Err(e) => {
                last_error = Some(e);
                if attempt < max_attempts {
                    warn!(
                        "connection_retry=failed attempt={} max_attempts={} interval_ms={}",
                        attempt, max_attempts, interval_ms
                    );
                    tokio::time::sleep(Duration::from_millis(interval_ms)).await;
                }
            }
        }
    }

    Err(last_error
        .unwrap_or_else(|| DbInfraError::connect("no error recorded after max attempts")))
}

async fn open(url: String, kind: DbKind, settings: PoolSettings) -> Result<DatabaseConnection, DbInfraError> {
    let mut opt = ConnectOptions::new(url);
    opt.min_connections(1)
        .max_connections(settings.max_connections)
        .acquire_timeout(settings.acquire_timeout)
        .sqlx_logging(false);

    let connect_once = || {
        let opt = opt.clone();
        async move {
            Database::connect(opt).await.map_err(|e| {
                DbInfraError::connect(format!("failed to connect to {}: {e}", kind.engine()))
            })
        }
    };

    if matches!(kind, DbKind::Postgres) {
        retry_connection(connect_once, 5, 500).await
    } else {
        connect_once().await
    }
}

/// Open the application pool for the configured storage endpoint.
pub async fn connect(
    creds: &StorageCredentials,
    settings: PoolSettings,
) -> Result<DatabaseConnection, DbInfraError> {
    let kind = creds.db_kind()?;
    let url = creds.connection_url()?;
    let settings = settings.for_kind(kind);

    info!(
        engine = kind.engine(),
        endpoint = %sanitize_db_url(creds.endpoint()),
        max_connections = settings.max_connections,
        "Connecting to storage"
    );

    open(url, kind, settings).await
}

/// Single-session pool used to hold migration advisory locks.
pub async fn build_admin_pool(creds: &StorageCredentials) -> Result<DatabaseConnection, DbInfraError> {
    let kind = creds.db_kind()?;
    let settings = PoolSettings {
        max_connections: 1,
        acquire_timeout: Duration::from_secs(2),
    };
    open(creds.connection_url()?, kind, settings).await
}

/// Connect and bring the schema up to date.
pub async fn bootstrap(
    creds: &StorageCredentials,
    settings: PoolSettings,
) -> Result<DatabaseConnection, DbInfraError> {
    let conn = connect(creds, settings).await?;
    orchestrate_migration(&conn, creds, MigrationCommand::Up).await?;
    Ok(conn)
}

async fn schema_up_to_date(conn: &DatabaseConnection) -> Result<bool, DbInfraError> {
    let expected = Migrator::migrations().len();
    match Migrator::get_applied_migrations(conn).await {
        Ok(applied) => {
            trace!(applied = applied.len(), expected, "schema check");
            Ok(applied.len() == expected)
        }
        Err(DbErr::Exec(_)) => Ok(false),
        Err(e) => Err(DbInfraError::migration(format!(
            "failed to get applied migrations: {e}"
        ))),
    }
}

/// Run a migration command, serialized across processes.
///
/// Postgres runs the command on a dedicated admin session under a session
/// advisory lock. SQLite runs it on `pool` directly, which is required for
/// in-memory databases whose schema lives inside that pool's connection.
pub async fn orchestrate_migration(
    pool: &DatabaseConnection,
    creds: &StorageCredentials,
    command: MigrationCommand,
) -> Result<(), DbInfraError> {
    let kind = creds.db_kind()?;
    info!(engine = kind.engine(), ?command, "migrate=start");

    if matches!(command, MigrationCommand::Status) {
        migrate(pool, command)
            .await
            .map_err(|e| DbInfraError::migration(format!("migration execution failed: {e}")))?;
        info!("migrate=done");
        return Ok(());
    }

    match kind {
        DbKind::Postgres => {
            let admin_pool = build_admin_pool(creds).await?;
            let key = format!("policy-sim:migrate:{}", sanitize_db_url(creds.endpoint()));
            let lock = PgAdvisoryLock::new(admin_pool.clone(), &key);
            migrate_with_lock(&admin_pool, lock, command).await?;
        }
        DbKind::SqliteFile | DbKind::SqliteMemory => {
            migrate_with_lock(pool, NoopLock, command).await?;
        }
    }

    info!("migrate=done");
    Ok(())
}

async fn migrate_with_lock<L>(
    pool: &DatabaseConnection,
    mut lock: L,
    command: MigrationCommand,
) -> Result<(), DbInfraError>
where
    L: BootstrapLock,
{
    let lock_acquire_ms = std::env::var(MIGRATE_LOCK_TIMEOUT_VAR)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(3000);

    let start = Instant::now();
    let mut attempts: u32 = 0;

    let guard = loop {
        attempts += 1;

        if matches!(command, MigrationCommand::Up) && schema_up_to_date(pool).await? {
            info!("migrate=skipped up_to_date=true");
            return Ok(());
        }

        if let Some(guard) = lock.try_acquire().await? {
            trace!(lock = "won", attempts, elapsed_ms = start.elapsed().as_millis());
            break guard;
        }

        if start.elapsed() >= Duration::from_millis(lock_acquire_ms) {
            return Err(DbInfraError::migration(format!(
                "migration lock acquisition timeout after {:?} ({} attempts)",
                start.elapsed(),
                attempts
            )));
        }

        let base_delay_ms = (5u64 << attempts.saturating_sub(1).min(4)).min(80);
        let jitter_ms = rand::rng().random::<u64>() % 4;
        trace!(lock = "backoff", attempts, delay_ms = base_delay_ms + jitter_ms);
        tokio::time::sleep(Duration::from_millis(base_delay_ms + jitter_ms)).await;
    };

    let result = migrate(pool, command)
        .await
        .map_err(|e| DbInfraError::migration(format!("migration execution failed: {e}")));

    guard.release().await;
    result
}
