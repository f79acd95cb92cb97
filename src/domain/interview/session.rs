//! Interview session aggregate.
//!
//! One `InterviewSession` is one interview. The caller owns it and passes it
//! `&mut` into the dialogue controller turn by turn; nothing else holds a
//! reference, so one session is never mutated concurrently.

use serde::{Deserialize, Serialize};

use super::classification::{Category, Classification};
use super::dialogue::DialogueState;
use super::field::{FieldTracker, RequiredField};
use super::phase::WeekPhase;
use super::transcript::Transcript;
use crate::domain::foundation::{EmailAddress, SessionId, StateMachine, ValidationError};

/// Mutable state of a single interview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewSession {
    id: SessionId,
    phase: WeekPhase,
    tracker: FieldTracker,
    email: Option<EmailAddress>,
    transcript: Transcript,
    state: DialogueState,
    last_utterance: Option<String>,
}

impl InterviewSession {
    /// Creates a fresh session with nothing collected.
    pub fn new() -> Self {
        Self {
            id: SessionId::new(),
            phase: WeekPhase::Unknown,
            tracker: FieldTracker::new(),
            email: None,
            transcript: Transcript::new(),
            state: DialogueState::Collecting,
            last_utterance: None,
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────

    /// Returns the session identifier.
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Returns the week phase established so far.
    pub fn phase(&self) -> WeekPhase {
        self.phase
    }

    /// Returns the field tracker.
    pub fn tracker(&self) -> &FieldTracker {
        &self.tracker
    }

    /// Returns the collected email address, if one has been detected.
    pub fn email(&self) -> Option<&EmailAddress> {
        self.email.as_ref()
    }

    /// Returns the transcript.
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Returns the dialogue lifecycle state.
    pub fn state(&self) -> DialogueState {
        self.state
    }

    /// Returns the most recent user utterance.
    pub fn last_utterance(&self) -> Option<&str> {
        self.last_utterance.as_deref()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Turn mutations
    // ─────────────────────────────────────────────────────────────────────

    /// Records a user utterance in the transcript.
    pub fn record_user(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.last_utterance = Some(text.clone());
        self.transcript.record_user(text);
    }

    /// Records an agent reply in the transcript.
    pub fn record_agent(&mut self, text: impl Into<String>) {
        self.transcript.record_agent(text);
    }

    /// Applies one classification result to the session state.
    ///
    /// Three independent channels:
    /// - a category matching a required field marks that field known;
    /// - an extracted email sets the address and marks the email field, no
    ///   matter what category it rode in on, unless an address is already
    ///   set;
    /// - a week-time signal establishes the phase, exactly once.
    pub fn apply(&mut self, classification: &Classification) {
        if let Some(field) = classification.category.as_required_field() {
            self.tracker.mark_known(field);
        }

        if let Some(email) = &classification.email {
            if self.email.is_none() {
                self.email = Some(email.clone());
            }
            self.tracker.mark_known(RequiredField::Email);
        }

        if classification.category == Category::WeekTime {
            if let Some(signal) = classification.week_signal {
                if self.phase.is_known() {
                    tracing::debug!(
                        session_id = %self.id,
                        phase = self.phase.label(),
                        ignored = signal.label(),
                        "ignoring week signal for session with established phase"
                    );
                } else {
                    self.phase = signal;
                }
            }
        }
    }

    /// Returns true once every field is collected and the phase is known.
    pub fn is_ready_to_finish(&self) -> bool {
        self.tracker.is_complete() && self.phase.is_known()
    }

    /// Moves the session into its terminal state.
    ///
    /// # Errors
    ///
    /// - `InvalidFormat` if the session is already `Done`
    pub fn finish(&mut self) -> Result<(), ValidationError> {
        self.state = self.state.transition_to(DialogueState::Done)?;
        Ok(())
    }
}

impl Default for InterviewSession {
    fn default() -> Self {
        Self::new()
    }
}
