//! DTOs for hidden_state_sea adapter.

use crate::entities::hidden_state::VariableName;

/// One hidden-state value to append for a round.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HiddenStateCreate {
    pub variable_name: VariableName,
    pub value: f64,
}
