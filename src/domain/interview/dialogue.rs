//! Dialogue lifecycle state machine.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// The lifecycle state of an interview dialogue.
///
/// A session collects fields until every required field is known and the
/// week phase is established, then moves to `Done` exactly once. There is no
/// way back out of `Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DialogueState {
    /// Actively gathering required fields.
    #[default]
    Collecting,

    /// All fields collected; summary produced; session is read-only.
    Done,
}

impl DialogueState {
    /// Returns true if user input is still being processed in this state.
    pub fn accepts_user_input(&self) -> bool {
        matches!(self, Self::Collecting)
    }
}

impl StateMachine for DialogueState {
    fn can_transition_to(&self, target: &Self) -> bool {
        matches!((self, target), (DialogueState::Collecting, DialogueState::Done))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            DialogueState::Collecting => vec![DialogueState::Done],
            DialogueState::Done => vec![],
        }
    }
}
