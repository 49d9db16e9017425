use actix_web::error::ResponseError;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;
use thiserror::Error;

use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind, StorageOp};
use crate::errors::ErrorCode;
use crate::trace_ctx;

/// JSON body of every failed request.
#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: String,
    pub trace_id: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {detail}")]
    BadRequest { code: ErrorCode, detail: String },
    #[error("Not found: {detail}")]
    NotFound { code: ErrorCode, detail: String },
    #[error("Conflict: {detail}")]
    Conflict { code: ErrorCode, detail: String },
    #[error("Storage read failed: {detail}")]
    StorageRead { detail: String },
    #[error("Storage write failed: {detail}")]
    StorageWrite { detail: String },
    #[error("Unexpected error: {detail}")]
    Unexpected { detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::BadRequest { code, .. } => *code,
            AppError::NotFound { code, .. } => *code,
            AppError::Conflict { code, .. } => *code,
            AppError::StorageRead { .. } => ErrorCode::StorageReadError,
            AppError::StorageWrite { .. } => ErrorCode::StorageWriteError,
            AppError::Unexpected { .. } => ErrorCode::UnexpectedError,
            AppError::Config { .. } => ErrorCode::ConfigError,
        }
    }

    pub fn detail(&self) -> &str {
        match self {
            AppError::BadRequest { detail, .. }
            | AppError::NotFound { detail, .. }
            | AppError::Conflict { detail, .. }
            | AppError::StorageRead { detail }
            | AppError::StorageWrite { detail }
            | AppError::Unexpected { detail }
            | AppError::Config { detail } => detail,
        }
    }

    /// Every failure is reported to callers as 400; the engine never answers 5xx.
    pub fn status(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    pub fn bad_request(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            detail: detail.into(),
        }
    }

    pub fn not_found(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::NotFound {
            code,
            detail: detail.into(),
        }
    }

    pub fn conflict(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Conflict {
            code,
            detail: detail.into(),
        }
    }

    pub fn storage_read(detail: impl Into<String>) -> Self {
        Self::StorageRead {
            detail: detail.into(),
        }
    }

    pub fn storage_write(detail: impl Into<String>) -> Self {
        Self::StorageWrite {
            detail: detail.into(),
        }
    }

    pub fn unexpected(detail: impl Into<String>) -> Self {
        Self::Unexpected {
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Validation(detail) => {
                AppError::bad_request(ErrorCode::ValidationError, detail)
            }
            DomainError::Conflict(kind, detail) => {
                let code = match kind {
                    ConflictKind::AlreadyResolved => ErrorCode::AlreadyClosed,
                    ConflictKind::UniqueNumber => ErrorCode::RoundNumberTaken,
                    _ => ErrorCode::Conflict,
                };
                AppError::conflict(code, detail)
            }
            DomainError::NotFound(kind, detail) => {
                let code = match kind {
                    NotFoundKind::Round => ErrorCode::RoundNotFound,
                    _ => ErrorCode::NotFound,
                };
                AppError::not_found(code, detail)
            }
            DomainError::Storage(op, _, detail) => match op {
                StorageOp::Read => AppError::storage_read(detail),
                StorageOp::Write => AppError::storage_write(detail),
            },
            DomainError::Unexpected(detail) => AppError::unexpected(detail),
        }
    }
}

impl From<db_infra::DbInfraError> for AppError {
    fn from(e: db_infra::DbInfraError) -> Self {
        AppError::config(e.to_string())
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let trace_id = trace_ctx::trace_id();

        let body = ErrorBody {
            error: self.detail().to_string(),
            code: self.code().as_str().to_string(),
            trace_id: trace_id.clone(),
        };

        HttpResponse::build(self.status())
            .insert_header(("x-trace-id", trace_id))
            .json(body)
    }
}
