use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, Expr, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Rounds {
    Table,
    Id,
    Number,
    PublicBrief,
    PublicResults,
    DmNotes,
    IsOpen,
    CreatedAt,
}

#[derive(Iden)]
enum Moves {
    Table,
    Id,
    RoundId,
    AssistantsAllocated,
    Resources,
    CreatedAt,
}

#[derive(Iden)]
enum HiddenState {
    Table,
    Id,
    RoundId,
    VariableName,
    Value,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // rounds
        manager
            .create_table(
                Table::create()
                    .table(Rounds::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Rounds::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Rounds::Number).integer().not_null())
                    .col(ColumnDef::new(Rounds::PublicBrief).text().not_null())
                    .col(ColumnDef::new(Rounds::PublicResults).text().null())
                    .col(ColumnDef::new(Rounds::DmNotes).text().null())
                    .col(
                        ColumnDef::new(Rounds::IsOpen)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Rounds::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // number defines display/processing order and must be unique
        manager
            .create_index(
                Index::create()
                    .name("ux_rounds_number")
                    .table(Rounds::Table)
                    .col(Rounds::Number)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // moves
        manager
            .create_table(
                Table::create()
                    .table(Moves::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Moves::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Moves::RoundId).uuid().not_null())
                    .col(
                        ColumnDef::new(Moves::AssistantsAllocated)
                            .integer()
                            .not_null()
                            .default(0)
                            .check(Expr::col(Moves::AssistantsAllocated).gte(0)),
                    )
                    .col(
                        ColumnDef::new(Moves::Resources)
                            .integer()
                            .not_null()
                            .default(0)
                            .check(Expr::col(Moves::Resources).gte(0)),
                    )
                    .col(
                        ColumnDef::new(Moves::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_moves_round_id")
                            .from(Moves::Table, Moves::RoundId)
                            .to(Rounds::Table, Rounds::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_moves_round_id")
                    .table(Moves::Table)
                    .col(Moves::RoundId)
                    .to_owned(),
            )
            .await?;

        // hidden_state (append-only, DM-only deltas)
        manager
            .create_table(
                Table::create()
                    .table(HiddenState::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(HiddenState::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(HiddenState::RoundId).uuid().not_null())
                    .col(ColumnDef::new(HiddenState::VariableName).text().not_null())
                    .col(ColumnDef::new(HiddenState::Value).double().not_null())
                    .col(
                        ColumnDef::new(HiddenState::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_hidden_state_round_id")
                            .from(HiddenState::Table, HiddenState::RoundId)
                            .to(Rounds::Table, Rounds::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // one entry per variable per round: a round resolves at most once
        manager
            .create_index(
                Index::create()
                    .name("ux_hidden_state_round_variable")
                    .table(HiddenState::Table)
                    .col(HiddenState::RoundId)
                    .col(HiddenState::VariableName)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // drop in reverse order + drop index before table
        manager
            .drop_index(
                Index::drop()
                    .name("ux_hidden_state_round_variable")
                    .table(HiddenState::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(HiddenState::Table).if_exists().to_owned())
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("ix_moves_round_id")
                    .table(Moves::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Moves::Table).if_exists().to_owned())
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("ux_rounds_number")
                    .table(Rounds::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Rounds::Table).if_exists().to_owned())
            .await?;

        Ok(())
    }
}
