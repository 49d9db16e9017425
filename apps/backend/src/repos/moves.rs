//! Move repository functions for domain layer (generic over ConnectionTrait).

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::adapters::moves_sea as moves_adapter;
use crate::domain::MoveInput;
use crate::entities::moves;
use crate::errors::domain::{DomainError, InfraErrorKind, StorageOp};
use crate::infra::db_errors::map_db_err;

/// Move domain model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Move {
    pub id: Uuid,
    pub round_id: Uuid,
    pub assistants_allocated: u32,
    pub resources: u32,
    pub created_at: OffsetDateTime,
}

impl Move {
    pub fn as_input(&self) -> MoveInput {
        MoveInput::new(self.assistants_allocated, self.resources)
    }
}

/// A move together with the number of the round it belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveWithRound {
    pub round_number: i32,
    pub mv: Move,
}

/// Moves submitted for a round
pub async fn find_by_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: Uuid,
) -> Result<Vec<Move>, DomainError> {
    let models = moves_adapter::find_by_round(conn, round_id)
        .await
        .map_err(|e| map_db_err(e, StorageOp::Read))?;
    models.into_iter().map(Move::try_from).collect()
}

/// Every move with its round number, ordered by round number then submission
pub async fn list_with_round_number<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<MoveWithRound>, DomainError> {
    let rows = moves_adapter::find_all_with_round(conn)
        .await
        .map_err(|e| map_db_err(e, StorageOp::Read))?;

    rows.into_iter()
        .map(|(model, round)| {
            let round = round.ok_or_else(|| {
                DomainError::storage(
                    StorageOp::Read,
                    InfraErrorKind::DataCorruption,
                    format!("move {} references a missing round", model.id),
                )
            })?;
            Ok(MoveWithRound {
                round_number: round.number,
                mv: Move::try_from(model)?,
            })
        })
        .collect()
}

/// Record a move; omitted quantities default to zero
pub async fn create_move<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: Uuid,
    assistants_allocated: Option<u32>,
    resources: Option<u32>,
) -> Result<Move, DomainError> {
    let dto = moves_adapter::MoveCreate::new(round_id)
        .with_assistants(assistants_allocated.unwrap_or(0))
        .with_resources(resources.unwrap_or(0));
    let model = moves_adapter::create_move(conn, dto)
        .await
        .map_err(|e| map_db_err(e, StorageOp::Write))?;
    Move::try_from(model)
}

fn non_negative(value: i32, column: &str, id: Uuid) -> Result<u32, DomainError> {
    u32::try_from(value).map_err(|_| {
        DomainError::storage(
            StorageOp::Read,
            InfraErrorKind::DataCorruption,
            format!("move {id} has negative {column}: {value}"),
        )
    })
}

impl TryFrom<moves::Model> for Move {
    type Error = DomainError;

    fn try_from(model: moves::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            round_id: model.round_id,
            assistants_allocated: non_negative(
                model.assistants_allocated,
                "assistants_allocated",
                model.id,
            )?,
            resources: non_negative(model.resources, "resources", model.id)?,
            created_at: model.created_at,
        })
    }
}
