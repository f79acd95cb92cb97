//! Dialogue Controller - orchestrates one interview turn.
//!
//! The controller owns the per-turn transition: classify the utterance,
//! commit it to the session, decide continue-or-finish, and produce the
//! outgoing agent message. All turn mutations are staged on a working copy
//! of the session, so a failed oracle call leaves the caller's session
//! exactly as it was and the next utterance retries cleanly.

use std::sync::Arc;

use crate::domain::foundation::ValidationError;
use crate::domain::interview::{DialogueState, InterviewSession};
use crate::ports::{GenerationOracle, OracleError, UpdateRecord, UpdateStore};

use super::classifier::Classifier;
use super::planner::QuestionPlanner;
use super::prompts;
use super::summarizer::Summarizer;

/// What one turn produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The interview continues; the reply is the next question.
    Continue { reply: String },

    /// The interview finished this turn; the reply wraps the summary.
    Completed { reply: String, summary: String },

    /// An oracle call failed; the reply is an apology and the session is
    /// unchanged, so the user can simply try again.
    Retry { reply: String },
}

impl TurnOutcome {
    /// Returns the user-facing reply for this turn.
    pub fn reply(&self) -> &str {
        match self {
            Self::Continue { reply } | Self::Completed { reply, .. } | Self::Retry { reply } => {
                reply
            }
        }
    }

    /// Returns true if the interview finished this turn.
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }

    /// Returns true if the turn failed and should be retried.
    pub fn is_retry(&self) -> bool {
        matches!(self, Self::Retry { .. })
    }
}

/// Orchestrates interview turns over the oracle and the update store.
///
/// Holds no session state; one controller serves any number of concurrent
/// sessions.
pub struct DialogueController {
    classifier: Classifier,
    planner: QuestionPlanner,
    summarizer: Summarizer,
    store: Arc<dyn UpdateStore>,
}

impl DialogueController {
    /// Wires a controller over the given oracle and store.
    pub fn new(oracle: Arc<dyn GenerationOracle>, store: Arc<dyn UpdateStore>) -> Self {
        Self {
            classifier: Classifier::new(oracle.clone()),
            planner: QuestionPlanner::new(oracle.clone()),
            summarizer: Summarizer::new(oracle),
            store,
        }
    }

    /// Returns the fixed opening message of a new interview.
    pub fn start_message(&self) -> &'static str {
        prompts::SESSION_START
    }

    /// Processes one user utterance against the session.
    ///
    /// # Errors
    ///
    /// - `InvalidFormat` if the session is already finished; callers must
    ///   start a fresh session per interview. Oracle failures are not
    ///   errors: they come back as [`TurnOutcome::Retry`].
    pub async fn handle_turn(
        &self,
        session: &mut InterviewSession,
        utterance: &str,
    ) -> Result<TurnOutcome, ValidationError> {
        if session.state() == DialogueState::Done {
            return Err(ValidationError::invalid_format(
                "session",
                "interview already finished; start a new session",
            ));
        }

        // Stage the whole turn on a copy. The caller's session is only
        // replaced once every oracle call has succeeded.
        let mut draft = session.clone();

        let classification = match self.classifier.classify(utterance, draft.transcript()).await {
            Ok(c) => c,
            Err(err) => return Ok(self.apologize(session, "classify", err)),
        };

        draft.record_user(utterance);
        draft.apply(&classification);

        if draft.is_ready_to_finish() {
            let summary = match self
                .summarizer
                .summarize(draft.transcript(), draft.phase())
                .await
            {
                Ok(s) => s,
                Err(err) => return Ok(self.apologize(session, "summarize", err)),
            };

            draft.finish()?;
            let reply = prompts::completion_message(&summary);
            draft.record_agent(reply.clone());

            tracing::info!(
                session_id = %draft.id(),
                phase = draft.phase().label(),
                turns = draft.transcript().user_message_count(),
                "interview completed"
            );

            self.persist_summary(&draft, &summary).await;
            *session = draft;

            return Ok(TurnOutcome::Completed { reply, summary });
        }

        let question = match self.planner.next_prompt(&draft).await {
            Ok(q) => q,
            Err(err) => return Ok(self.apologize(session, "plan", err)),
        };

        draft.record_agent(question.clone());
        *session = draft;

        Ok(TurnOutcome::Continue { reply: question })
    }

    /// Hands the summary to the sink. Failure is logged, never propagated:
    /// the interview is already done and the user has their summary.
    async fn persist_summary(&self, session: &InterviewSession, summary: &str) {
        let Some(email) = session.email() else {
            tracing::warn!(
                session_id = %session.id(),
                "completed interview has no email address; skipping persistence"
            );
            return;
        };

        let record = UpdateRecord::new(email.as_str(), summary);
        match self.store.persist(&record).await {
            Ok(()) => {
                tracing::info!(
                    session_id = %session.id(),
                    user = %record.user_email,
                    week = %record.week,
                    "update persisted"
                );
            }
            Err(err) => {
                tracing::error!(
                    session_id = %session.id(),
                    user = %record.user_email,
                    week = %record.week,
                    error = %err,
                    "failed to persist completed update"
                );
            }
        }
    }

    fn apologize(
        &self,
        session: &InterviewSession,
        stage: &'static str,
        err: OracleError,
    ) -> TurnOutcome {
        tracing::warn!(
            session_id = %session.id(),
            stage,
            retryable = err.is_retryable(),
            error = %err,
            "oracle call failed; turn rolled back"
        );

        TurnOutcome::Retry {
            reply: prompts::ORACLE_FAILURE_REPLY.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockOracle, MockOracleError};
    use crate::adapters::store::InMemoryUpdateStore;
    use crate::domain::interview::{RequiredField, WeekPhase};

    fn classify_reply(category: &str, email: &str, week: &str) -> String {
        format!("Category: {category}\nEmail: {email}\nWeek Time: {week}")
    }

    fn controller_with(oracle: MockOracle) -> (DialogueController, Arc<InMemoryUpdateStore>) {
        let store = Arc::new(InMemoryUpdateStore::new());
        let controller = DialogueController::new(Arc::new(oracle), store.clone());
        (controller, store)
    }

    #[test]
    fn start_message_is_the_fixed_opening() {
        let (controller, _) = controller_with(MockOracle::new());
        assert_eq!(controller.start_message(), prompts::SESSION_START);
    }

    #[tokio::test]
    async fn continue_turn_applies_classification_and_asks_next() {
        let oracle = MockOracle::new()
            .with_reply(classify_reply("week_time", "a@b.com", "beginning"))
            .with_reply("Got it! What project are you working on?");
        let (controller, _) = controller_with(oracle);

        let mut session = InterviewSession::new();
        let outcome = controller
            .handle_turn(
                &mut session,
                "It's the beginning of the week, my email is a@b.com",
            )
            .await
            .unwrap();

        assert_eq!(
            outcome,
            TurnOutcome::Continue {
                reply: "Got it! What project are you working on?".to_string()
            }
        );
        assert_eq!(session.phase(), WeekPhase::BeginningOfWeek);
        assert!(session.tracker().is_known(RequiredField::Email));
        assert_eq!(session.email().unwrap().as_str(), "a@b.com");
        // user utterance + agent question
        assert_eq!(session.transcript().len(), 2);
    }

    #[tokio::test]
    async fn classification_failure_rolls_the_turn_back() {
        let oracle = MockOracle::new().with_error(MockOracleError::Timeout { timeout_secs: 5 });
        let (controller, store) = controller_with(oracle);

        let mut session = InterviewSession::new();
        let before = session.clone();

        let outcome = controller.handle_turn(&mut session, "hello").await.unwrap();

        assert!(outcome.is_retry());
        assert_eq!(outcome.reply(), prompts::ORACLE_FAILURE_REPLY);
        assert_eq!(session, before);
        assert_eq!(store.records().len(), 0);
    }

    #[tokio::test]
    async fn planner_failure_also_rolls_the_turn_back() {
        let oracle = MockOracle::new()
            .with_reply(classify_reply("project", "None", "None"))
            .with_error(MockOracleError::Unavailable {
                message: "down".into(),
            });
        let (controller, _) = controller_with(oracle);

        let mut session = InterviewSession::new();
        let before = session.clone();

        let outcome = controller
            .handle_turn(&mut session, "I'm on the billing revamp")
            .await
            .unwrap();

        assert!(outcome.is_retry());
        // Even the successful classification was discarded.
        assert_eq!(session, before);
    }

    #[tokio::test]
    async fn final_field_completes_and_persists() {
        let mut oracle = MockOracle::new()
            .with_reply(classify_reply("week_time", "a@b.com", "beginning"))
            .with_reply("What project?");
        for (category, question) in [
            ("project", "Any wins?"),
            ("accomplishments", "Any blockers?"),
            ("blockers", "Any risks?"),
            ("risks", "Anything personal to share?"),
        ] {
            oracle = oracle
                .with_reply(classify_reply(category, "None", "None"))
                .with_reply(question);
        }
        let oracle = oracle
            .with_reply(classify_reply("personal_updates", "None", "None"))
            .with_reply("Beginning of Week:\n- summary bullets");
        let (controller, store) = controller_with(oracle);

        let mut session = InterviewSession::new();
        for utterance in [
            "Beginning of week, a@b.com",
            "The billing revamp",
            "Shipped invoicing",
            "Waiting on the design review",
            "Timeline might slip",
        ] {
            let outcome = controller.handle_turn(&mut session, utterance).await.unwrap();
            assert!(!outcome.is_completed());
        }

        let outcome = controller
            .handle_turn(&mut session, "My dog learned a new trick")
            .await
            .unwrap();

        let TurnOutcome::Completed { reply, summary } = outcome else {
            panic!("expected completion, got {outcome:?}");
        };
        assert_eq!(summary, "Beginning of Week:\n- summary bullets");
        assert!(reply.contains(&summary));

        assert_eq!(session.state(), DialogueState::Done);

        let records = store.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].user_email, "a@b.com");
        assert_eq!(records[0].summary, summary);
    }

    #[tokio::test]
    async fn store_failure_does_not_undo_completion() {
        let oracle = MockOracle::new()
            .with_reply(classify_reply("week_time", "a@b.com", "end"))
            .with_reply("q")
            .with_reply(classify_reply("project", "None", "None"))
            .with_reply("q")
            .with_reply(classify_reply("accomplishments", "None", "None"))
            .with_reply("q")
            .with_reply(classify_reply("blockers", "None", "None"))
            .with_reply("q")
            .with_reply(classify_reply("risks", "None", "None"))
            .with_reply("q")
            .with_reply(classify_reply("personal_updates", "None", "None"))
            .with_reply("End of Week:\n- bullets");
        let store = Arc::new(InMemoryUpdateStore::new().failing_with("disk full"));
        let controller = DialogueController::new(Arc::new(oracle), store.clone());

        let mut session = InterviewSession::new();
        for utterance in ["end, a@b.com", "billing", "shipped", "none", "none"] {
            controller.handle_turn(&mut session, utterance).await.unwrap();
        }

        let outcome = controller.handle_turn(&mut session, "all good").await.unwrap();

        assert!(outcome.is_completed());
        assert_eq!(session.state(), DialogueState::Done);
        assert_eq!(store.persist_attempts(), 1);
    }

    #[tokio::test]
    async fn finished_session_rejects_further_turns() {
        let (controller, _) = controller_with(MockOracle::new());

        let mut session = InterviewSession::new();
        session.finish().unwrap();

        let result = controller.handle_turn(&mut session, "one more thing").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn forever_unclear_oracle_never_completes() {
        let mut oracle = MockOracle::new();
        for _ in 0..10 {
            oracle = oracle
                .with_reply(classify_reply("unclear", "None", "None"))
                .with_reply("Could you tell me more?");
        }
        let (controller, store) = controller_with(oracle);

        let mut session = InterviewSession::new();
        for _ in 0..10 {
            let outcome = controller.handle_turn(&mut session, "hmm").await.unwrap();
            assert!(!outcome.is_completed());
        }

        assert_eq!(
            session.tracker().missing_fields(),
            RequiredField::ALL.to_vec()
        );
        assert_eq!(store.records().len(), 0);
    }
}
