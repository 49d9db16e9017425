//! SeaORM adapter for the append-only hidden_state relation.

use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, NotSet, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::hidden_state;

pub mod dto;

pub use dto::HiddenStateCreate;

/// Append entries for a round in a single statement. Returns rows inserted.
pub async fn insert_entries<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: Uuid,
    entries: &[HiddenStateCreate],
) -> Result<u64, DbErr> {
    if entries.is_empty() {
        return Ok(0);
    }

    let now = time::OffsetDateTime::now_utc();
    let models = entries.iter().map(|entry| hidden_state::ActiveModel {
        id: NotSet,
        round_id: Set(round_id),
        variable_name: Set(entry.variable_name),
        value: Set(entry.value),
        created_at: Set(now),
    });

    hidden_state::Entity::insert_many(models)
        .exec_without_returning(conn)
        .await
}

/// Entries recorded for a round, in insertion order
pub async fn find_by_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: Uuid,
) -> Result<Vec<hidden_state::Model>, DbErr> {
    hidden_state::Entity::find()
        .filter(hidden_state::Column::RoundId.eq(round_id))
        .order_by_asc(hidden_state::Column::Id)
        .all(conn)
        .await
}
