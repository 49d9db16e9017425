pub mod round_resolver;
pub mod rounds;

pub use round_resolver::{Resolution, RoundResolver};
pub use rounds::RoundsService;
