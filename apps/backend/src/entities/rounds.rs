use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "rounds")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub number: i32,
    #[sea_orm(column_name = "public_brief", column_type = "Text")]
    pub public_brief: String,
    #[sea_orm(column_name = "public_results", column_type = "Text", nullable)]
    pub public_results: Option<String>,
    #[sea_orm(column_name = "dm_notes", column_type = "Text", nullable)]
    pub dm_notes: Option<String>,
    #[sea_orm(column_name = "is_open")]
    pub is_open: bool,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::moves::Entity")]
    Moves,
    #[sea_orm(has_many = "super::hidden_state::Entity")]
    HiddenState,
}

impl Related<super::moves::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Moves.def()
    }
}

impl Related<super::hidden_state::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::HiddenState.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
