//! Mock generation oracle for testing.
//!
//! Configurable to return queued replies, simulate latency, or inject
//! errors, with call tracking for verification. Tests script an entire
//! interview by queueing the classifier/planner/summarizer replies in turn
//! order.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;

use crate::ports::{GenerationOracle, GenerationRequest, GenerationResponse, OracleError};

/// A scripted oracle reply.
#[derive(Debug, Clone)]
enum MockReply {
    /// Return this text.
    Text(String),
    /// Return this error.
    Error(MockOracleError),
}

/// Mock error types for testing failure handling.
#[derive(Debug, Clone)]
pub enum MockOracleError {
    /// Simulate rate limiting.
    RateLimited { retry_after_secs: u32 },
    /// Simulate provider unavailability.
    Unavailable { message: String },
    /// Simulate authentication failure.
    AuthenticationFailed,
    /// Simulate a network error.
    Network { message: String },
    /// Simulate a timeout.
    Timeout { timeout_secs: u32 },
}

impl From<MockOracleError> for OracleError {
    fn from(err: MockOracleError) -> Self {
        match err {
            MockOracleError::RateLimited { retry_after_secs } => {
                OracleError::rate_limited(retry_after_secs)
            }
            MockOracleError::Unavailable { message } => OracleError::unavailable(message),
            MockOracleError::AuthenticationFailed => OracleError::AuthenticationFailed,
            MockOracleError::Network { message } => OracleError::network(message),
            MockOracleError::Timeout { timeout_secs } => OracleError::Timeout { timeout_secs },
        }
    }
}

/// Mock oracle with queued replies and call tracking.
#[derive(Debug, Clone, Default)]
pub struct MockOracle {
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    calls: Arc<Mutex<Vec<GenerationRequest>>>,
    delay: Duration,
}

impl MockOracle {
    /// Creates a mock oracle with no scripted replies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a text reply.
    pub fn with_reply(self, content: impl Into<String>) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(MockReply::Text(content.into()));
        self
    }

    /// Queues an error reply.
    pub fn with_error(self, error: MockOracleError) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(MockReply::Error(error));
        self
    }

    /// Sets simulated latency per call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns the number of calls made.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Returns all recorded requests.
    pub fn calls(&self) -> Vec<GenerationRequest> {
        self.calls.lock().unwrap().clone()
    }

    fn next_reply(&self) -> MockReply {
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| MockReply::Text("Mock reply".to_string()))
    }
}

#[async_trait]
impl GenerationOracle for MockOracle {
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse, OracleError> {
        self.calls.lock().unwrap().push(request);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match self.next_reply() {
            MockReply::Text(content) => Ok(GenerationResponse::new(content, "mock-model")),
            MockReply::Error(err) => Err(err.into()),
        }
    }
}
