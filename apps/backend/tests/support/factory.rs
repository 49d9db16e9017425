//! Seed data written straight through the repos.

use sea_orm::ConnectionTrait;
use sim_backend::errors::domain::DomainError;
use sim_backend::repos::moves::{self, Move};
use sim_backend::repos::rounds::{self, Round};
use uuid::Uuid;

/// Open round with a brief derived from its number
pub async fn seed_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    number: i32,
) -> Result<Round, DomainError> {
    rounds::create_round(conn, number, &format!("Brief for round {number}"), None).await
}

pub async fn seed_round_with_notes<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    number: i32,
    dm_notes: &str,
) -> Result<Round, DomainError> {
    rounds::create_round(
        conn,
        number,
        &format!("Brief for round {number}"),
        Some(dm_notes),
    )
    .await
}

pub async fn seed_move<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: Uuid,
    assistants_allocated: u32,
    resources: u32,
) -> Result<Move, DomainError> {
    moves::create_move(conn, round_id, Some(assistants_allocated), Some(resources)).await
}
