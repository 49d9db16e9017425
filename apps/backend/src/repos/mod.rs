//! Repository functions for the domain layer (generic over ConnectionTrait).
//!
//! Each function translates adapter `DbErr`s into `DomainError`s tagged with
//! the direction of the storage call.

pub mod hidden_state;
pub mod moves;
pub mod rounds;
