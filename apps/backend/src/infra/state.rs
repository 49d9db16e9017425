use std::sync::Arc;
use std::time::Duration;

use db_infra::{PoolSettings, StorageCredentials};

use crate::config::app::DEFAULT_STORAGE_TIMEOUT;
use crate::domain::{EntropySource, RandomSource};
use crate::error::AppError;
use crate::state::app_state::AppState;

/// Builder for creating AppState instances (used in both tests and main).
///
/// Without `with_storage` the state runs on a private in-memory SQLite
/// database, migrated on build.
pub struct StateBuilder {
    storage: StorageCredentials,
    pool: PoolSettings,
    rng: Arc<dyn RandomSource>,
    storage_timeout: Duration,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            storage: StorageCredentials::sqlite_memory(),
            pool: PoolSettings::default(),
            rng: Arc::new(EntropySource),
            storage_timeout: DEFAULT_STORAGE_TIMEOUT,
        }
    }

    pub fn with_storage(mut self, storage: StorageCredentials) -> Self {
        self.storage = storage;
        self
    }

    pub fn with_pool(mut self, pool: PoolSettings) -> Self {
        self.pool = pool;
        self
    }

    pub fn with_rng(mut self, rng: Arc<dyn RandomSource>) -> Self {
        self.rng = rng;
        self
    }

    pub fn with_storage_timeout(mut self, timeout: Duration) -> Self {
        self.storage_timeout = timeout;
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        // single entrypoint: connect + migrate
        let conn = db_infra::bootstrap(&self.storage, self.pool).await?;
        Ok(AppState::new(conn, self.rng, self.storage_timeout))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
