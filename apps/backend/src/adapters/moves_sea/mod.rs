//! SeaORM adapter for moves repository.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set,
};
use uuid::Uuid;

use crate::entities::{moves, rounds};

pub mod dto;

pub use dto::MoveCreate;

/// All moves submitted for a round, oldest first
pub async fn find_by_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: Uuid,
) -> Result<Vec<moves::Model>, DbErr> {
    moves::Entity::find()
        .filter(moves::Column::RoundId.eq(round_id))
        .order_by_asc(moves::Column::CreatedAt)
        .all(conn)
        .await
}

/// Every move joined with its round, ordered by round number then submission time
pub async fn find_all_with_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<(moves::Model, Option<rounds::Model>)>, DbErr> {
    moves::Entity::find()
        .find_also_related(rounds::Entity)
        .order_by_asc(rounds::Column::Number)
        .order_by_asc(moves::Column::CreatedAt)
        .order_by_asc(moves::Column::Id)
        .all(conn)
        .await
}

/// Record a move
pub async fn create_move<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: MoveCreate,
) -> Result<moves::Model, DbErr> {
    let assistants = i32::try_from(dto.assistants_allocated)
        .map_err(|_| DbErr::Custom("assistants_allocated out of range".to_string()))?;
    let resources = i32::try_from(dto.resources)
        .map_err(|_| DbErr::Custom("resources out of range".to_string()))?;

    let mv = moves::ActiveModel {
        id: Set(Uuid::new_v4()),
        round_id: Set(dto.round_id),
        assistants_allocated: Set(assistants),
        resources: Set(resources),
        created_at: Set(time::OffsetDateTime::now_utc()),
    };

    mv.insert(conn).await
}
