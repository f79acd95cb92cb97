//! Update store adapters.
//!
//! Implementations of the UpdateStore port.
//!
//! - `QdrantUpdateStore` - Qdrant collection over REST
//! - `FileUpdateStore` - local YAML files, for development
//! - `InMemoryUpdateStore` - test double with failure injection

mod file_store;
mod in_memory_store;
mod qdrant_store;

pub use file_store::FileUpdateStore;
pub use in_memory_store::InMemoryUpdateStore;
pub use qdrant_store::{QdrantConfig, QdrantUpdateStore};
