// Proptest generators for resolution inputs.

use proptest::prelude::*;

use crate::domain::resolution::{MoveInput, ResolutionDraws};

/// A single move with realistic quantities
pub fn move_input() -> impl Strategy<Value = MoveInput> {
    (0u32..=500, 0u32..=10_000).prop_map(|(a, r)| MoveInput::new(a, r))
}

/// Zero or more moves for one round
pub fn moves() -> impl Strategy<Value = Vec<MoveInput>> {
    prop::collection::vec(move_input(), 0..40)
}

/// Draws produced from arbitrary unit samples
pub fn draws() -> impl Strategy<Value = ResolutionDraws> {
    (0.0f64..1.0, 0.0f64..1.0).prop_map(|(f, s)| ResolutionDraws::from_unit(f, s))
}
