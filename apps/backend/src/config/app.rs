//! Service configuration loaded from environment variables.
//!
//! Storage credentials and pool sizing are parsed by `db_infra`; this module
//! adds the HTTP bind address, the per-call storage timeout, and the
//! optional resolver seed.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use db_infra::{PoolSettings, StorageCredentials};

use crate::domain::{EntropySource, RandomSource, SeededSource};
use crate::error::AppError;

pub const BACKEND_HOST_VAR: &str = "BACKEND_HOST";
pub const BACKEND_PORT_VAR: &str = "BACKEND_PORT";
pub const STORAGE_TIMEOUT_MS_VAR: &str = "STORAGE_TIMEOUT_MS";
pub const RESOLVER_RNG_SEED_VAR: &str = "RESOLVER_RNG_SEED";

pub const DEFAULT_STORAGE_TIMEOUT: Duration = Duration::from_millis(5_000);

/// Everything the binary needs to start serving
#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub host: String,
    pub port: u16,
    pub storage: StorageCredentials,
    pub pool: PoolSettings,
    pub storage_timeout: Duration,
    pub rng_seed: Option<u64>,
}

impl BackendConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let host = env::var(BACKEND_HOST_VAR).unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = parse_var::<u16>(BACKEND_PORT_VAR)?.unwrap_or(3001);

        let storage = StorageCredentials::from_env()?;
        let pool = PoolSettings::from_env()?;

        let storage_timeout = match parse_var::<u64>(STORAGE_TIMEOUT_MS_VAR)? {
            Some(0) => {
                return Err(AppError::config(format!(
                    "{STORAGE_TIMEOUT_MS_VAR} must be greater than zero"
                )))
            }
            Some(ms) => Duration::from_millis(ms),
            None => DEFAULT_STORAGE_TIMEOUT,
        };

        let rng_seed = parse_var::<u64>(RESOLVER_RNG_SEED_VAR)?;

        Ok(Self {
            host,
            port,
            storage,
            pool,
            storage_timeout,
            rng_seed,
        })
    }

    /// Seeded draws when `RESOLVER_RNG_SEED` is set, fresh entropy otherwise.
    pub fn random_source(&self) -> Arc<dyn RandomSource> {
        match self.rng_seed {
            Some(seed) => Arc::new(SeededSource::new(seed)),
            None => Arc::new(EntropySource),
        }
    }
}

/// Parse an optional variable; present-but-invalid is a configuration error.
fn parse_var<T: std::str::FromStr>(name: &str) -> Result<Option<T>, AppError> {
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| AppError::config(format!("{name} has an invalid value: '{raw}'"))),
        _ => Ok(None),
    }
}
