//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `GenerationOracle` - the external text-generation service behind
//!   classification, question planning, and summarization
//! - `UpdateStore` - the persistence sink for finished updates

mod generation;
mod update_store;

pub use generation::{GenerationOracle, GenerationRequest, GenerationResponse, OracleError};
pub use update_store::{UpdateRecord, UpdateStore, UpdateStoreError};
