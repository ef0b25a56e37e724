//! Store Layer
//!
//! Data access: the `DataStore` trait plus its REST and in-memory
//! implementations.

mod memory;
mod rest;
mod traits;

pub use memory::MemoryStore;
pub use rest::RestDataStore;
pub use traits::{DataStore, StoreError, StoreResult};
