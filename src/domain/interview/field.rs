//! Required fields of a weekly update and the tracker that records them.
//!
//! The six fields are a closed set: adding one means touching every match
//! below, which is exactly the point.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the six pieces of information an update must contain.
///
/// Declaration order is meaningful: `FieldTracker::missing_fields` reports
/// gaps in this order, and the question planner asks for the first gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequiredField {
    /// The user's email, used as the persistence key.
    Email,
    /// The project the user is working on.
    Project,
    /// Achievements or milestones on that project.
    Accomplishments,
    /// Issues or challenges blocking specific tasks.
    Blockers,
    /// Risks to the project's completion or timely delivery.
    Risks,
    /// Personal news unrelated to the project.
    PersonalUpdates,
}

impl RequiredField {
    /// All required fields, in declaration order.
    pub const ALL: [RequiredField; 6] = [
        RequiredField::Email,
        RequiredField::Project,
        RequiredField::Accomplishments,
        RequiredField::Blockers,
        RequiredField::Risks,
        RequiredField::PersonalUpdates,
    ];

    /// Returns the snake_case name used in prompts and classifier replies.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Project => "project",
            Self::Accomplishments => "accomplishments",
            Self::Blockers => "blockers",
            Self::Risks => "risks",
            Self::PersonalUpdates => "personal_updates",
        }
    }

    fn index(&self) -> usize {
        match self {
            Self::Email => 0,
            Self::Project => 1,
            Self::Accomplishments => 2,
            Self::Blockers => 3,
            Self::Risks => 4,
            Self::PersonalUpdates => 5,
        }
    }
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Tracks which required fields have been collected so far.
///
/// Marking is idempotent and monotonic: a field can only go from unknown to
/// known, never back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldTracker {
    known: [bool; 6],
}

impl FieldTracker {
    /// Creates a tracker with every field unknown.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that a field has been collected.
    pub fn mark_known(&mut self, field: RequiredField) {
        self.known[field.index()] = true;
    }

    /// Returns true if the field has been collected.
    pub fn is_known(&self, field: RequiredField) -> bool {
        self.known[field.index()]
    }

    /// Returns true once every required field has been collected.
    pub fn is_complete(&self) -> bool {
        self.known.iter().all(|&k| k)
    }

    /// Returns the fields still missing, in declaration order.
    pub fn missing_fields(&self) -> Vec<RequiredField> {
        RequiredField::ALL
            .into_iter()
            .filter(|f| !self.is_known(*f))
            .collect()
    }

    /// Returns the fields already collected, in declaration order.
    pub fn known_fields(&self) -> Vec<RequiredField> {
        RequiredField::ALL
            .into_iter()
            .filter(|f| self.is_known(*f))
            .collect()
    }
}
