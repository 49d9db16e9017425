//! Round resolution service.
//!
//! Turns an open round's moves into hidden-state deltas and a public
//! narrative, then closes the round. Callers run `resolve` inside a single
//! transaction so that either every effect lands or none does.

use std::sync::Arc;
use std::time::Duration;

use db_infra::advisory_xact_lock;
use sea_orm::ConnectionTrait;
use tracing::{debug, info};
use uuid::Uuid;

use crate::db::bounded;
use crate::domain::{aggregate, compose_public_results, MoveInput, RandomSource, RoundDeltas};
use crate::errors::domain::{DomainError, StorageOp};
use crate::infra::db_errors::map_db_err;
use crate::repos::{hidden_state, moves, rounds};
use crate::state::app_state::AppState;

/// What a successful resolution produced
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub round_id: Uuid,
    pub round_number: i32,
    pub move_count: usize,
    pub deltas: RoundDeltas,
    pub public_results: String,
}

/// Resolves rounds using an injected randomness source.
#[derive(Debug, Clone)]
pub struct RoundResolver {
    rng: Arc<dyn RandomSource>,
    storage_timeout: Duration,
}

impl RoundResolver {
    pub fn new(rng: Arc<dyn RandomSource>, storage_timeout: Duration) -> Self {
        Self {
            rng,
            storage_timeout,
        }
    }

    pub fn from_state(state: &AppState) -> Self {
        Self::new(Arc::clone(&state.rng), state.storage_timeout)
    }

    /// Resolve an open round.
    ///
    /// `conn` should be a transaction: on Postgres the per-round advisory
    /// lock taken here lasts until that transaction ends. Errors:
    /// - `NotFound(Round)` when no round has this id
    /// - `Conflict(AlreadyResolved)` when it is closed, or closes underneath us
    /// - `Storage(Read | Write, ..)` when a storage call fails or times out
    pub async fn resolve<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        round_id: Uuid,
    ) -> Result<Resolution, DomainError> {
        let limit = self.storage_timeout;

        let lock_key = format!("round:{round_id}");
        bounded(limit, StorageOp::Read, "Failed to lock round", async {
            advisory_xact_lock(conn, &lock_key)
                .await
                .map_err(|e| map_db_err(e, StorageOp::Read))
        })
        .await?;

        let round = bounded(
            limit,
            StorageOp::Read,
            "Failed to load round",
            rounds::find_by_id(conn, round_id),
        )
        .await?
        .ok_or_else(DomainError::round_not_found)?;

        if !round.is_open {
            debug!(%round_id, round_number = round.number, "Round already closed");
            return Err(DomainError::already_closed());
        }

        let submitted = bounded(
            limit,
            StorageOp::Read,
            "Failed to load moves",
            moves::find_by_round(conn, round_id),
        )
        .await?;
        let inputs: Vec<MoveInput> = submitted.iter().map(moves::Move::as_input).collect();

        let draws = self.rng.draw();
        let deltas = aggregate(&inputs, draws);
        debug!(
            %round_id,
            assistant_factor = draws.assistant_factor,
            stakeholder_influence = deltas.stakeholder_influence,
            public_sentiment = deltas.public_sentiment,
            policy_quality = deltas.policy_quality,
            "Round deltas computed"
        );

        bounded(
            limit,
            StorageOp::Write,
            "Failed to record hidden state",
            hidden_state::append_for_round(conn, round_id, &deltas.entries()),
        )
        .await?;

        let public_results = compose_public_results(&deltas);

        bounded(
            limit,
            StorageOp::Write,
            "Failed to close round",
            rounds::close_round(conn, round_id, public_results.clone()),
        )
        .await?;

        info!(
            %round_id,
            round_number = round.number,
            moves = inputs.len(),
            "Round resolved"
        );

        Ok(Resolution {
            round_id,
            round_number: round.number,
            move_count: inputs.len(),
            deltas,
            public_results,
        })
    }
}
