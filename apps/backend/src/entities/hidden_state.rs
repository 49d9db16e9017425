use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// The three DM-only quantities a resolution appends per round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum VariableName {
    #[sea_orm(string_value = "StakeholderInfluenceDelta")]
    StakeholderInfluenceDelta,
    #[sea_orm(string_value = "PublicSentimentDelta")]
    PublicSentimentDelta,
    #[sea_orm(string_value = "PolicyQualityDelta")]
    PolicyQualityDelta,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "hidden_state")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "round_id")]
    pub round_id: Uuid,
    #[sea_orm(column_name = "variable_name")]
    pub variable_name: VariableName,
    #[sea_orm(column_type = "Double")]
    pub value: f64,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::rounds::Entity",
        from = "Column::RoundId",
        to = "super::rounds::Column::Id"
    )]
    Round,
}

impl Related<super::rounds::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Round.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
