//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types that form the
//! vocabulary of the Weekly Pulse domain.

mod email;
mod errors;
mod ids;
mod state_machine;
mod timestamp;
mod week;

pub use email::EmailAddress;
pub use errors::ValidationError;
pub use ids::SessionId;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
pub use week::WeekBucket;
