use std::sync::Arc;

use sim_backend::domain::{FixedSource, RandomSource};
use sim_backend::infra::state::build_state;
use sim_backend::state::app_state::AppState;
use sim_backend::AppError;

/// Assistant factor used by [`build_test_state`]
pub const TEST_ASSISTANT_FACTOR: f64 = 1.0;
/// Public sentiment draw used by [`build_test_state`]
pub const TEST_SENTIMENT: i32 = 5;

/// Fresh in-memory SQLite state with fixed draws (factor 1.0, sentiment +5).
pub async fn build_test_state() -> Result<AppState, AppError> {
    build_test_state_with_rng(Arc::new(FixedSource::new(
        TEST_ASSISTANT_FACTOR,
        TEST_SENTIMENT,
    )))
    .await
}

pub async fn build_test_state_with_rng(rng: Arc<dyn RandomSource>) -> Result<AppState, AppError> {
    backend_test_support::test_logging::init();
    build_state().with_rng(rng).build().await
}
