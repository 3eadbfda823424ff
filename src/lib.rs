pub mod app;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::{CatalogError, CatalogService};
pub use domain::toy::{CreateToyRequest, NewToy, Toy, ToyDetail, ToyPatch, UpdateToyRequest};
pub use infra::AppConfig;
pub use storage::toys::{InMemoryToyStore, MongoToyStore, ToyStore};
