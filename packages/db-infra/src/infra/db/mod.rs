pub mod core;
pub mod locking;

pub use self::core::{bootstrap, build_admin_pool, connect, orchestrate_migration};
pub use locking::{
    advisory_xact_lock, pg_lock_id, BootstrapLock, Guard, NoopLock, PgAdvisoryLock,
};
