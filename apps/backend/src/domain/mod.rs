//! Domain layer: pure resolution logic and randomness, no storage or HTTP.

pub mod randomness;
pub mod resolution;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod tests_props_resolution;
#[cfg(test)]
mod tests_resolution;

pub use randomness::{EntropySource, FixedSource, RandomSource, SeededSource};
pub use resolution::{
    aggregate, compose_public_results, HiddenVariable, MoveInput, ResolutionDraws, RoundDeltas,
};
