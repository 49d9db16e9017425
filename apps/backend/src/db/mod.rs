pub mod deadline;
pub mod txn;
pub mod txn_policy;

pub use deadline::bounded;
pub use txn::with_txn;
