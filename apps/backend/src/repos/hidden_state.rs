//! Hidden-state repository functions (append-only, DM-only values).

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::adapters::hidden_state_sea as hidden_adapter;
use crate::domain::HiddenVariable;
use crate::entities::hidden_state::{self, VariableName};
use crate::errors::domain::{DomainError, StorageOp};
use crate::infra::db_errors::map_db_err;

/// Hidden-state entry domain model
#[derive(Debug, Clone, PartialEq)]
pub struct HiddenStateEntry {
    pub id: i64,
    pub round_id: Uuid,
    pub variable: HiddenVariable,
    pub value: f64,
    pub created_at: OffsetDateTime,
}

/// Append one entry per (variable, value) pair for a round
pub async fn append_for_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: Uuid,
    entries: &[(HiddenVariable, f64)],
) -> Result<u64, DomainError> {
    let dtos: Vec<hidden_adapter::HiddenStateCreate> = entries
        .iter()
        .map(|(variable, value)| hidden_adapter::HiddenStateCreate {
            variable_name: VariableName::from(*variable),
            value: *value,
        })
        .collect();

    hidden_adapter::insert_entries(conn, round_id, &dtos)
        .await
        .map_err(|e| map_db_err(e, StorageOp::Write))
}

/// Entries recorded for a round
pub async fn find_by_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: Uuid,
) -> Result<Vec<HiddenStateEntry>, DomainError> {
    let models = hidden_adapter::find_by_round(conn, round_id)
        .await
        .map_err(|e| map_db_err(e, StorageOp::Read))?;
    Ok(models.into_iter().map(HiddenStateEntry::from).collect())
}

// Conversions between SeaORM models and domain models

impl From<hidden_state::Model> for HiddenStateEntry {
    fn from(model: hidden_state::Model) -> Self {
        Self {
            id: model.id,
            round_id: model.round_id,
            variable: HiddenVariable::from(model.variable_name),
            value: model.value,
            created_at: model.created_at,
        }
    }
}

impl From<VariableName> for HiddenVariable {
    fn from(name: VariableName) -> Self {
        match name {
            VariableName::StakeholderInfluenceDelta => HiddenVariable::StakeholderInfluenceDelta,
            VariableName::PublicSentimentDelta => HiddenVariable::PublicSentimentDelta,
            VariableName::PolicyQualityDelta => HiddenVariable::PolicyQualityDelta,
        }
    }
}

impl From<HiddenVariable> for VariableName {
    fn from(variable: HiddenVariable) -> Self {
        match variable {
            HiddenVariable::StakeholderInfluenceDelta => VariableName::StakeholderInfluenceDelta,
            HiddenVariable::PublicSentimentDelta => VariableName::PublicSentimentDelta,
            HiddenVariable::PolicyQualityDelta => VariableName::PolicyQualityDelta,
        }
    }
}
