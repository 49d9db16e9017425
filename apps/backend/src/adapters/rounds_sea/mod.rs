//! SeaORM adapter for rounds repository.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::rounds;

pub mod dto;

pub use dto::{RoundClose, RoundCreate};

/// Find a round by ID
pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: Uuid,
) -> Result<Option<rounds::Model>, sea_orm::DbErr> {
    rounds::Entity::find_by_id(round_id).one(conn).await
}

/// All rounds, ordered by number
pub async fn find_all_ordered<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<rounds::Model>, sea_orm::DbErr> {
    rounds::Entity::find()
        .order_by_asc(rounds::Column::Number)
        .all(conn)
        .await
}

/// Closed rounds only, ordered by number
pub async fn find_closed_ordered<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<rounds::Model>, sea_orm::DbErr> {
    rounds::Entity::find()
        .filter(rounds::Column::IsOpen.eq(false))
        .order_by_asc(rounds::Column::Number)
        .all(conn)
        .await
}

/// Create a new open round with no results
pub async fn create_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: RoundCreate,
) -> Result<rounds::Model, sea_orm::DbErr> {
    let round = rounds::ActiveModel {
        id: Set(Uuid::new_v4()),
        number: Set(dto.number),
        public_brief: Set(dto.public_brief),
        public_results: Set(None),
        dm_notes: Set(dto.dm_notes),
        is_open: Set(true),
        created_at: Set(time::OffsetDateTime::now_utc()),
    };

    round.insert(conn).await
}

/// Close a round and attach its public results, but only if it is still open.
///
/// Returns the number of rows affected: 1 on success, 0 if the round is
/// missing or was closed by someone else first.
pub async fn close_if_open<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: RoundClose,
) -> Result<u64, sea_orm::DbErr> {
    let result = rounds::Entity::update_many()
        .col_expr(rounds::Column::IsOpen, Expr::value(false))
        .col_expr(
            rounds::Column::PublicResults,
            Expr::value(Some(dto.public_results)),
        )
        .filter(rounds::Column::Id.eq(dto.id))
        .filter(rounds::Column::IsOpen.eq(true))
        .exec(conn)
        .await?;

    Ok(result.rows_affected)
}
