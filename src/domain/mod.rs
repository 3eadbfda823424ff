pub mod toy;

pub use toy::{CreateToyRequest, NewToy, Toy, ToyDetail, ToyPatch, UpdateToyRequest};
