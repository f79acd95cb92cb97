//! Generation oracle adapters.
//!
//! Implementations of the GenerationOracle port.
//!
//! - `OpenAiOracle` - OpenAI chat-completions client
//! - `MockOracle` - configurable mock for testing

mod mock_oracle;
mod openai_oracle;

pub use mock_oracle::{MockOracle, MockOracleError};
pub use openai_oracle::{OpenAiConfig, OpenAiOracle};
