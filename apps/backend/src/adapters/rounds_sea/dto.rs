//! DTOs for rounds_sea adapter.

use uuid::Uuid;

/// DTO for creating a new (open) round.
#[derive(Debug, Clone)]
pub struct RoundCreate {
    pub number: i32,
    pub public_brief: String,
    pub dm_notes: Option<String>,
}

impl RoundCreate {
    pub fn new(number: i32, public_brief: impl Into<String>) -> Self {
        Self {
            number,
            public_brief: public_brief.into(),
            dm_notes: None,
        }
    }

    pub fn with_dm_notes(mut self, notes: impl Into<String>) -> Self {
        self.dm_notes = Some(notes.into());
        self
    }
}

/// DTO for the open -> closed transition.
#[derive(Debug, Clone)]
pub struct RoundClose {
    pub id: Uuid,
    pub public_results: String,
}
