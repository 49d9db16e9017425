//! DTOs for moves_sea adapter.

use uuid::Uuid;

/// DTO for submitting a move. Quantities default to zero.
#[derive(Debug, Clone)]
pub struct MoveCreate {
    pub round_id: Uuid,
    pub assistants_allocated: u32,
    pub resources: u32,
}

impl MoveCreate {
    pub fn new(round_id: Uuid) -> Self {
        Self {
            round_id,
            assistants_allocated: 0,
            resources: 0,
        }
    }

    pub fn with_assistants(mut self, assistants: u32) -> Self {
        self.assistants_allocated = assistants;
        self
    }

    pub fn with_resources(mut self, resources: u32) -> Self {
        self.resources = resources;
        self
    }
}
