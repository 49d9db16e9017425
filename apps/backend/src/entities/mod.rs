pub mod hidden_state;
pub mod moves;
pub mod rounds;

pub use hidden_state::Entity as HiddenState;
pub use hidden_state::Model as HiddenStateEntry;
pub use moves::Entity as Moves;
pub use moves::Model as Move;
pub use rounds::Entity as Rounds;
pub use rounds::Model as Round;
