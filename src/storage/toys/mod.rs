pub mod memory;
pub mod mongo;
pub mod store;

pub use memory::InMemoryToyStore;
pub use mongo::MongoToyStore;
pub use store::{DeleteOutcome, StoreError, ToyStore, UpdateOutcome};
