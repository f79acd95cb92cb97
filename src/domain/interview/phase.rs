//! Week phase of an interview.
//!
//! Whether the session is collecting beginning-of-week intentions or
//! end-of-week results. The phase decides which checklist the question
//! planner follows and which section layout the summary uses.

use serde::{Deserialize, Serialize};

/// Which half of the week the update covers.
///
/// Starts `Unknown` and is assigned exactly once from the first classified
/// week-time signal. Later signals never change it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WeekPhase {
    /// Not yet established; the planner asks for it before anything else.
    #[default]
    Unknown,

    /// Gathering intentions: project, weekly goals, expected blockers.
    BeginningOfWeek,

    /// Gathering results: accomplishments, blockers hit, risks.
    EndOfWeek,
}

impl WeekPhase {
    /// Interprets a raw week-time signal from the classifier.
    ///
    /// Case-insensitive "beginning" maps to `BeginningOfWeek`; any other
    /// non-empty signal maps to `EndOfWeek`.
    pub fn from_signal(signal: &str) -> Self {
        if signal.trim().eq_ignore_ascii_case("beginning") {
            Self::BeginningOfWeek
        } else {
            Self::EndOfWeek
        }
    }

    /// Returns true once the phase has been established.
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// Returns a label suitable for prompts and logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::BeginningOfWeek => "beginning of week",
            Self::EndOfWeek => "end of week",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unknown() {
        assert_eq!(WeekPhase::default(), WeekPhase::Unknown);
        assert!(!WeekPhase::Unknown.is_known());
    }

    #[test]
    fn beginning_signal_is_case_insensitive() {
        assert_eq!(WeekPhase::from_signal("beginning"), WeekPhase::BeginningOfWeek);
        assert_eq!(WeekPhase::from_signal("Beginning"), WeekPhase::BeginningOfWeek);
        assert_eq!(WeekPhase::from_signal(" BEGINNING "), WeekPhase::BeginningOfWeek);
    }

    #[test]
    fn any_other_signal_maps_to_end() {
        assert_eq!(WeekPhase::from_signal("end"), WeekPhase::EndOfWeek);
        assert_eq!(WeekPhase::from_signal("End"), WeekPhase::EndOfWeek);
        assert_eq!(WeekPhase::from_signal("friday"), WeekPhase::EndOfWeek);
    }

    #[test]
    fn assigned_phases_are_known() {
        assert!(WeekPhase::BeginningOfWeek.is_known());
        assert!(WeekPhase::EndOfWeek.is_known());
    }

    #[test]
    fn serializes_to_snake_case() {
        let json = serde_json::to_string(&WeekPhase::BeginningOfWeek).unwrap();
        assert_eq!(json, "\"beginning_of_week\"");
    }
}
