//! Storage credentials and pool settings, read from the process environment.
//!
//! The storage backend is addressed by two values: an endpoint URL
//! (`STORAGE_URL`) and a privileged service key (`STORAGE_SERVICE_KEY`).
//! The key is injected as the connection password for network backends and
//! never appears in `Debug` output or logs.

use std::env;
use std::fmt;
use std::time::Duration;

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use crate::error::DbInfraError;

pub const STORAGE_URL_VAR: &str = "STORAGE_URL";
pub const STORAGE_SERVICE_KEY_VAR: &str = "STORAGE_SERVICE_KEY";
pub const STORAGE_MAX_CONNECTIONS_VAR: &str = "STORAGE_MAX_CONNECTIONS";

const SQLITE_MEMORY_URL: &str = "sqlite::memory:";

/// Database backend kinds supported by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbKind {
    Postgres,
    SqliteFile,
    SqliteMemory,
}

impl DbKind {
    /// Infer the backend from the endpoint URL scheme.
    pub fn from_url(url: &str) -> Result<Self, DbInfraError> {
        if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            return Ok(Self::Postgres);
        }
        if url == SQLITE_MEMORY_URL || url.contains("mode=memory") {
            return Ok(Self::SqliteMemory);
        }
        if url.starts_with("sqlite:") {
            return Ok(Self::SqliteFile);
        }
        Err(DbInfraError::config(format!(
            "Unsupported storage endpoint scheme: '{}'",
            sanitize_db_url(url)
        )))
    }

    pub fn engine(&self) -> &'static str {
        match self {
            DbKind::Postgres => "postgresql",
            DbKind::SqliteFile | DbKind::SqliteMemory => "sqlite",
        }
    }
}

/// Endpoint + privileged key for the storage backend
#[derive(Clone, PartialEq, Eq)]
pub struct StorageCredentials {
    endpoint: String,
    service_key: Option<String>,
}

impl fmt::Debug for StorageCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageCredentials")
            .field("endpoint", &sanitize_db_url(&self.endpoint))
            .field("service_key", &self.service_key.as_ref().map(|_| "***"))
            .finish()
    }
}

impl StorageCredentials {
    pub fn new(endpoint: impl Into<String>, service_key: Option<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            service_key,
        }
    }

    /// Private in-memory SQLite database (tests and local runs)
    pub fn sqlite_memory() -> Self {
        Self::new(SQLITE_MEMORY_URL, None)
    }

    /// Read `STORAGE_URL` and `STORAGE_SERVICE_KEY` from the environment.
    ///
    /// The key is mandatory for Postgres endpoints and optional for SQLite.
    pub fn from_env() -> Result<Self, DbInfraError> {
        let endpoint = must_var(STORAGE_URL_VAR)?;
        let service_key = env::var(STORAGE_SERVICE_KEY_VAR)
            .ok()
            .filter(|k| !k.is_empty());

        let creds = Self::new(endpoint, service_key);
        creds.validate()?;
        Ok(creds)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn db_kind(&self) -> Result<DbKind, DbInfraError> {
        DbKind::from_url(&self.endpoint)
    }

    pub fn validate(&self) -> Result<(), DbInfraError> {
        if self.db_kind()? == DbKind::Postgres && self.service_key.is_none() {
            return Err(DbInfraError::config(format!(
                "Required environment variable '{STORAGE_SERVICE_KEY_VAR}' is not set"
            )));
        }
        Ok(())
    }

    /// Full connection URL with the service key injected as the password.
    pub fn connection_url(&self) -> Result<String, DbInfraError> {
        match (self.db_kind()?, &self.service_key) {
            (DbKind::Postgres, Some(key)) => inject_password(&self.endpoint, key),
            (DbKind::Postgres, None) => Err(DbInfraError::config(format!(
                "'{STORAGE_SERVICE_KEY_VAR}' is required for Postgres endpoints"
            ))),
            (DbKind::SqliteFile, _) => Ok(with_create_mode(&self.endpoint)),
            (DbKind::SqliteMemory, _) => Ok(self.endpoint.clone()),
        }
    }
}

/// Pool sizing and acquisition limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 10,
            acquire_timeout: Duration::from_secs(5),
        }
    }
}

impl PoolSettings {
    pub fn from_env() -> Result<Self, DbInfraError> {
        let mut settings = Self::default();
        if let Ok(raw) = env::var(STORAGE_MAX_CONNECTIONS_VAR) {
            settings.max_connections = raw.parse::<u32>().ok().filter(|n| *n > 0).ok_or_else(
                || {
                    DbInfraError::config(format!(
                        "'{STORAGE_MAX_CONNECTIONS_VAR}' must be a positive integer, got '{raw}'"
                    ))
                },
            )?;
        }
        Ok(settings)
    }

    /// In-memory SQLite lives inside a single connection, so the pool is pinned to one.
    pub fn for_kind(self, kind: DbKind) -> Self {
        match kind {
            DbKind::SqliteMemory => Self {
                max_connections: 1,
                ..self
            },
            _ => self,
        }
    }
}

fn inject_password(endpoint: &str, key: &str) -> Result<String, DbInfraError> {
    let (scheme, rest) = endpoint
        .split_once("://")
        .ok_or_else(|| DbInfraError::config("Storage endpoint is missing a scheme"))?;
    let (user_info, host_part) = rest.split_once('@').ok_or_else(|| {
        DbInfraError::config("Storage endpoint must name a user, e.g. postgresql://svc@host/db")
    })?;
    if user_info.contains(':') {
        return Err(DbInfraError::config(format!(
            "Storage endpoint must not embed a password; use '{STORAGE_SERVICE_KEY_VAR}'"
        )));
    }

    let encoded = utf8_percent_encode(key, NON_ALPHANUMERIC);
    Ok(format!("{scheme}://{user_info}:{encoded}@{host_part}"))
}

fn with_create_mode(endpoint: &str) -> String {
    if endpoint.contains("mode=") {
        endpoint.to_string()
    } else if endpoint.contains('?') {
        format!("{endpoint}&mode=rwc")
    } else {
        format!("{endpoint}?mode=rwc")
    }
}

/// Mask the password in a connection string for logging and lock keys.
pub fn sanitize_db_url(url: &str) -> String {
    let Some((auth_part, host_part)) = url.rsplit_once('@') else {
        return url.to_string();
    };
    match auth_part.rfind(':') {
        Some(colon_pos) if auth_part[..colon_pos].contains("://") => {
            format!("{}:***@{}", &auth_part[..colon_pos], host_part)
        }
        _ => url.to_string(),
    }
}

fn must_var(name: &str) -> Result<String, DbInfraError> {
    env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| DbInfraError::config(format!("Required environment variable '{name}' is not set")))
}
