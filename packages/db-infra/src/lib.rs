//! Shared storage configuration and migration infrastructure.
//! Used by the backend and the migration CLI.

pub mod config;
pub mod error;
pub mod infra;

pub use config::db::{sanitize_db_url, DbKind, PoolSettings, StorageCredentials};
pub use error::DbInfraError;
pub use infra::db::core::{bootstrap, build_admin_pool, connect, orchestrate_migration};
pub use infra::db::locking::advisory_xact_lock;
