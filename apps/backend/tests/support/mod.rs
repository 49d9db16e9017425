pub mod app_builder;
pub mod factory;
pub mod test_state;

// Re-export only what current tests actually import
pub use app_builder::call;
pub use test_state::{build_test_state, build_test_state_with_rng};
