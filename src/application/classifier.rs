//! Classifier - routes one utterance through the generation oracle.

use std::sync::Arc;

use crate::domain::interview::{Classification, Transcript};
use crate::ports::{GenerationOracle, GenerationRequest, OracleError};

use super::prompts;

/// Maximum tokens for a classification reply; three short lines.
const CLASSIFICATION_MAX_TOKENS: u32 = 100;

/// Classifies user utterances into the update taxonomy.
///
/// Holds no session state; safe to share across concurrent sessions.
pub struct Classifier {
    oracle: Arc<dyn GenerationOracle>,
}

impl Classifier {
    /// Creates a classifier over the given oracle.
    pub fn new(oracle: Arc<dyn GenerationOracle>) -> Self {
        Self { oracle }
    }

    /// Classifies one utterance with the transcript as context.
    ///
    /// Malformed oracle replies are not errors: they degrade to an
    /// `unclear` classification. Only transport-level oracle failures
    /// surface as `OracleError`.
    pub async fn classify(
        &self,
        utterance: &str,
        transcript: &Transcript,
    ) -> Result<Classification, OracleError> {
        let request = GenerationRequest::new(prompts::classification_prompt(utterance, transcript))
            .with_max_tokens(CLASSIFICATION_MAX_TOKENS)
            .with_temperature(0.0);

        let response = self.oracle.generate(request).await?;
        let classification = Classification::parse_reply(&response.content);

        tracing::debug!(
            category = %classification.category,
            has_email = classification.email.is_some(),
            week_signal = ?classification.week_signal,
            model = %response.model,
            "classified utterance"
        );

        Ok(classification)
    }
}
