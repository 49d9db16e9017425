//! SeaORM adapters. Every function returns `sea_orm::DbErr`; translation to
//! domain errors happens one layer up in `repos`.

pub mod hidden_state_sea;
pub mod moves_sea;
pub mod rounds_sea;
