//! Summarizer - renders a finished interview into the structured report.

use std::sync::Arc;

use crate::domain::interview::{Transcript, WeekPhase};
use crate::ports::{GenerationOracle, GenerationRequest, OracleError};

use super::prompts;

/// Maximum tokens for a rendered summary.
const SUMMARY_MAX_TOKENS: u32 = 800;

/// Renders the final phase-appropriate summary of an interview.
pub struct Summarizer {
    oracle: Arc<dyn GenerationOracle>,
}

impl Summarizer {
    /// Creates a summarizer over the given oracle.
    pub fn new(oracle: Arc<dyn GenerationOracle>) -> Self {
        Self { oracle }
    }

    /// Summarizes the transcript using the layout for the given phase.
    pub async fn summarize(
        &self,
        transcript: &Transcript,
        phase: WeekPhase,
    ) -> Result<String, OracleError> {
        let request = GenerationRequest::new(prompts::summary_prompt(transcript, phase))
            .with_max_tokens(SUMMARY_MAX_TOKENS);

        let response = self.oracle.generate(request).await?;

        tracing::debug!(
            phase = phase.label(),
            entries = transcript.len(),
            model = %response.model,
            "rendered interview summary"
        );

        Ok(response.content)
    }
}
