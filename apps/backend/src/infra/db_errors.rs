//! SeaORM -> DomainError translation helpers.
//!
//! Repos convert `sea_orm::DbErr` into `DomainError` here, tagging the
//! direction of the failing call; handlers then map `DomainError` to
//! `AppError` via `From`.

use tracing::warn;

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind, StorageOp};
use crate::logging::Redacted;
use crate::trace_ctx;

/// Unique index guarding one hidden-state row per (round, variable).
const HIDDEN_STATE_UNIQUE: &str = "ux_hidden_state_round_variable";
/// Unique index on rounds.number.
const ROUNDS_NUMBER_UNIQUE: &str = "ux_rounds_number";

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

fn is_unique_violation(msg: &str) -> bool {
    mentions_sqlstate(msg, "23505")
        || msg.contains("duplicate key value violates unique constraint")
        || msg.contains("UNIQUE constraint failed")
}

/// Recognize which unique constraint fired.
///
/// Postgres names the index; SQLite lists the `table.column`s instead.
fn classify_unique_violation(msg: &str) -> (ConflictKind, &'static str) {
    if msg.contains(HIDDEN_STATE_UNIQUE) || msg.contains("hidden_state.round_id") {
        return (ConflictKind::AlreadyResolved, "Round is already closed");
    }
    if msg.contains(ROUNDS_NUMBER_UNIQUE) || msg.contains("rounds.number") {
        return (ConflictKind::UniqueNumber, "Round number already in use");
    }
    (
        ConflictKind::Other("Unique".into()),
        "Unique constraint violation",
    )
}

fn failure_detail(op: StorageOp) -> &'static str {
    match op {
        StorageOp::Read => "Failed to read from storage",
        StorageOp::Write => "Failed to write to storage",
    }
}

/// Translate a `DbErr` into a `DomainError` with sanitized detail.
///
/// The raw driver message is logged (redacted) but never returned to callers.
pub fn map_db_err(e: sea_orm::DbErr, op: StorageOp) -> DomainError {
    let error_msg = e.to_string();
    let trace_id = trace_ctx::trace_id();

    match &e {
        sea_orm::DbErr::RecordNotFound(_) => {
            return DomainError::not_found(
                NotFoundKind::Other("Record".into()),
                "Record not found",
            );
        }
        sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
            warn!(trace_id = %trace_id, ?op, raw_error = %Redacted(&error_msg), "Storage unavailable");
            return DomainError::storage(op, InfraErrorKind::DbUnavailable, failure_detail(op));
        }
        _ => {}
    }

    if is_unique_violation(&error_msg) {
        let (kind, detail) = classify_unique_violation(&error_msg);
        warn!(trace_id = %trace_id, ?kind, raw_error = %Redacted(&error_msg), "Unique constraint violation");
        return DomainError::conflict(kind, detail);
    }

    if mentions_sqlstate(&error_msg, "23503") || error_msg.contains("FOREIGN KEY constraint failed")
    {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Foreign key constraint violation");
        return DomainError::validation("Referenced round does not exist");
    }

    if mentions_sqlstate(&error_msg, "23514") || error_msg.contains("CHECK constraint failed") {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Check constraint violation");
        return DomainError::validation("Move quantities must be non-negative");
    }

    if error_msg.contains("timeout") || error_msg.contains("timed out") {
        warn!(trace_id = %trace_id, ?op, raw_error = %Redacted(&error_msg), "Storage timeout");
        return DomainError::storage(op, InfraErrorKind::Timeout, failure_detail(op));
    }

    warn!(trace_id = %trace_id, ?op, raw_error = %Redacted(&error_msg), "Unhandled storage error");
    DomainError::storage(
        op,
        InfraErrorKind::Other("DbErr".into()),
        failure_detail(op),
    )
}
