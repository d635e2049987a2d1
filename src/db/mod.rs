pub mod memory;
pub mod mongo;
pub mod store;

pub use store::{DocumentStore, StoreError, UpdateOutcome};
