//! Round repository functions for domain layer (generic over ConnectionTrait).

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::adapters::rounds_sea as rounds_adapter;
use crate::entities::rounds;
use crate::errors::domain::{DomainError, StorageOp};
use crate::infra::db_errors::map_db_err;

/// Round domain model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    pub id: Uuid,
    pub number: i32,
    pub public_brief: String,
    pub public_results: Option<String>,
    pub dm_notes: Option<String>,
    pub is_open: bool,
    pub created_at: OffsetDateTime,
}

/// Find a round by its ID
pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: Uuid,
) -> Result<Option<Round>, DomainError> {
    let round = rounds_adapter::find_by_id(conn, round_id)
        .await
        .map_err(|e| map_db_err(e, StorageOp::Read))?;
    Ok(round.map(Round::from))
}

/// All rounds in display order
pub async fn list_all<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<Vec<Round>, DomainError> {
    let rounds = rounds_adapter::find_all_ordered(conn)
        .await
        .map_err(|e| map_db_err(e, StorageOp::Read))?;
    Ok(rounds.into_iter().map(Round::from).collect())
}

/// Closed rounds in display order
pub async fn list_closed<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<Round>, DomainError> {
    let rounds = rounds_adapter::find_closed_ordered(conn)
        .await
        .map_err(|e| map_db_err(e, StorageOp::Read))?;
    Ok(rounds.into_iter().map(Round::from).collect())
}

/// Create a new open round
pub async fn create_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    number: i32,
    public_brief: &str,
    dm_notes: Option<&str>,
) -> Result<Round, DomainError> {
    let mut dto = rounds_adapter::RoundCreate::new(number, public_brief);
    if let Some(notes) = dm_notes {
        dto = dto.with_dm_notes(notes);
    }
    let round = rounds_adapter::create_round(conn, dto)
        .await
        .map_err(|e| map_db_err(e, StorageOp::Write))?;
    Ok(Round::from(round))
}

/// Close an open round and attach its public results.
///
/// Fails with `Conflict(AlreadyResolved)` when the round is no longer open,
/// which includes losing a race against a concurrent resolution.
pub async fn close_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: Uuid,
    public_results: String,
) -> Result<(), DomainError> {
    let dto = rounds_adapter::RoundClose {
        id: round_id,
        public_results,
    };
    let affected = rounds_adapter::close_if_open(conn, dto)
        .await
        .map_err(|e| map_db_err(e, StorageOp::Write))?;

    if affected == 0 {
        return Err(DomainError::already_closed());
    }
    Ok(())
}

impl From<rounds::Model> for Round {
    fn from(model: rounds::Model) -> Self {
        Self {
            id: model.id,
            number: model.number,
            public_brief: model.public_brief,
            public_results: model.public_results,
            dm_notes: model.dm_notes,
            is_open: model.is_open,
            created_at: model.created_at,
        }
    }
}
