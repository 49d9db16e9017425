use std::sync::Arc;
use std::time::Duration;

use sea_orm::DatabaseConnection;

use crate::config::app::DEFAULT_STORAGE_TIMEOUT;
use crate::domain::RandomSource;

/// Application state shared by every worker
#[derive(Debug, Clone)]
pub struct AppState {
    /// Storage pool
    pub db: DatabaseConnection,
    /// Source of resolution draws
    pub rng: Arc<dyn RandomSource>,
    /// Upper bound for each individual storage call
    pub storage_timeout: Duration,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        rng: Arc<dyn RandomSource>,
        storage_timeout: Duration,
    ) -> Self {
        Self {
            db,
            rng,
            storage_timeout,
        }
    }

    /// State with the default storage timeout
    pub fn with_defaults(db: DatabaseConnection, rng: Arc<dyn RandomSource>) -> Self {
        Self::new(db, rng, DEFAULT_STORAGE_TIMEOUT)
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}
