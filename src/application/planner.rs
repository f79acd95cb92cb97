//! Question Planner - decides what the agent asks next.

use std::sync::Arc;

use crate::domain::interview::InterviewSession;
use crate::ports::{GenerationOracle, GenerationRequest, OracleError};

use super::prompts;

/// Maximum tokens for a planned question.
const QUESTION_MAX_TOKENS: u32 = 300;

/// Plans the next agent question from the session state.
///
/// The planner decides *what to ask for* (the first missing field, or the
/// week phase while that is unknown) and delegates the phrasing to the
/// oracle. It never decides termination; that is the controller's call.
pub struct QuestionPlanner {
    oracle: Arc<dyn GenerationOracle>,
}

impl QuestionPlanner {
    /// Creates a planner over the given oracle.
    pub fn new(oracle: Arc<dyn GenerationOracle>) -> Self {
        Self { oracle }
    }

    /// Produces the next agent message for an in-progress session.
    pub async fn next_prompt(&self, session: &InterviewSession) -> Result<String, OracleError> {
        let request = GenerationRequest::new(prompts::next_question_prompt(session))
            .with_max_tokens(QUESTION_MAX_TOKENS);

        let response = self.oracle.generate(request).await?;

        tracing::debug!(
            session_id = %session.id(),
            phase = session.phase().label(),
            missing = session.tracker().missing_fields().len(),
            model = %response.model,
            "planned next question"
        );

        Ok(response.content)
    }
}
