//! Read-side services for the DM and public consoles.

use std::time::Duration;

use sea_orm::ConnectionTrait;
use time::format_description::well_known::Rfc3339;

use crate::db::bounded;
use crate::errors::domain::{DomainError, StorageOp};
use crate::repos::moves::{self, MoveWithRound};
use crate::repos::rounds::{self, Round};
use crate::state::app_state::AppState;

/// Column order of the move export.
pub const MOVES_CSV_HEADER: [&str; 6] = [
    "round_number",
    "move_id",
    "round_id",
    "assistants_allocated",
    "resources",
    "created_at",
];

/// Timeline listings and move export.
#[derive(Debug, Clone, Copy)]
pub struct RoundsService {
    storage_timeout: Duration,
}

impl RoundsService {
    pub fn new(storage_timeout: Duration) -> Self {
        Self { storage_timeout }
    }

    pub fn from_state(state: &AppState) -> Self {
        Self::new(state.storage_timeout)
    }

    /// Every round in number order, DM notes included.
    pub async fn dm_timeline<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
    ) -> Result<Vec<Round>, DomainError> {
        bounded(
            self.storage_timeout,
            StorageOp::Read,
            "Failed to load rounds",
            rounds::list_all(conn),
        )
        .await
    }

    /// Closed rounds in number order. Callers must not expose `dm_notes`.
    pub async fn public_timeline<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
    ) -> Result<Vec<Round>, DomainError> {
        bounded(
            self.storage_timeout,
            StorageOp::Read,
            "Failed to load rounds",
            rounds::list_closed(conn),
        )
        .await
    }

    /// All moves as CSV, ordered by round number then submission time.
    pub async fn export_moves_csv<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
    ) -> Result<String, DomainError> {
        let rows = bounded(
            self.storage_timeout,
            StorageOp::Read,
            "Failed to load moves",
            moves::list_with_round_number(conn),
        )
        .await?;

        moves_to_csv(&rows)
    }
}

fn csv_err(e: impl std::fmt::Display) -> DomainError {
    DomainError::unexpected(format!("Failed to build CSV export: {e}"))
}

/// Render moves as CSV with a header row.
pub fn moves_to_csv(rows: &[MoveWithRound]) -> Result<String, DomainError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(MOVES_CSV_HEADER).map_err(csv_err)?;

    for row in rows {
        let created_at = row.mv.created_at.format(&Rfc3339).map_err(csv_err)?;
        writer
            .write_record([
                row.round_number.to_string(),
                row.mv.id.to_string(),
                row.mv.round_id.to_string(),
                row.mv.assistants_allocated.to_string(),
                row.mv.resources.to_string(),
                created_at,
            ])
            .map_err(csv_err)?;
    }

    let bytes = writer.into_inner().map_err(csv_err)?;
    String::from_utf8(bytes).map_err(csv_err)
}
