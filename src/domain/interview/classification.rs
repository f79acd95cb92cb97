//! Classification of user utterances.
//!
//! The classifier oracle replies in a fixed three-line shape:
//!
//! ```text
//! Category: [category]
//! Email: [address or None]
//! Week Time: [beginning/end or None]
//! ```
//!
//! Oracle output is untrusted. Every departure from that shape — missing
//! lines, unknown category names, malformed addresses — degrades to
//! `Unclear` with no extracted values instead of failing the turn.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::field::RequiredField;
use super::phase::WeekPhase;
use crate::domain::foundation::EmailAddress;

/// The category taxonomy an utterance is classified into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Whether it is the beginning or end of the week.
    WeekTime,
    /// The user's email address.
    Email,
    /// Information about the current project.
    Project,
    /// Achievements or milestones on the project.
    Accomplishments,
    /// Issues or challenges blocking tasks.
    Blockers,
    /// Risks to completion or timely delivery.
    Risks,
    /// Personal news unrelated to the project.
    PersonalUpdates,
    /// Could not be placed in any category.
    Unclear,
}

impl Category {
    /// All categories, in taxonomy order.
    pub const ALL: [Category; 8] = [
        Category::WeekTime,
        Category::Email,
        Category::Project,
        Category::Accomplishments,
        Category::Blockers,
        Category::Risks,
        Category::PersonalUpdates,
        Category::Unclear,
    ];

    /// Returns the snake_case name used in the classification prompt.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WeekTime => "week_time",
            Self::Email => "email",
            Self::Project => "project",
            Self::Accomplishments => "accomplishments",
            Self::Blockers => "blockers",
            Self::Risks => "risks",
            Self::PersonalUpdates => "personal_updates",
            Self::Unclear => "unclear",
        }
    }

    /// Parses a category name; anything unrecognized is `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized = name.trim().to_ascii_lowercase().replace(' ', "_");
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == normalized)
    }

    /// Returns the required field this category satisfies, if any.
    ///
    /// `week_time` and `unclear` satisfy no field: the first feeds the phase,
    /// the second feeds nothing.
    pub fn as_required_field(&self) -> Option<RequiredField> {
        match self {
            Self::Email => Some(RequiredField::Email),
            Self::Project => Some(RequiredField::Project),
            Self::Accomplishments => Some(RequiredField::Accomplishments),
            Self::Blockers => Some(RequiredField::Blockers),
            Self::Risks => Some(RequiredField::Risks),
            Self::PersonalUpdates => Some(RequiredField::PersonalUpdates),
            Self::WeekTime | Self::Unclear => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The outcome of classifying one utterance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Best-fit category for the utterance.
    pub category: Category,
    /// Email address extracted from the utterance, valid or absent.
    /// Honored regardless of `category` — addresses show up incidentally.
    pub email: Option<EmailAddress>,
    /// Week phase signalled by the utterance. Only meaningful when
    /// `category` is `WeekTime`.
    pub week_signal: Option<WeekPhase>,
}

impl Classification {
    /// The degraded result used for anything unparseable.
    pub fn unclear() -> Self {
        Self {
            category: Category::Unclear,
            email: None,
            week_signal: None,
        }
    }

    /// Parses the oracle's three-line reply, degrading instead of failing.
    pub fn parse_reply(reply: &str) -> Self {
        let mut category = None;
        let mut email = None;
        let mut week_signal = None;

        for line in reply.lines() {
            if let Some(value) = field_value(line, "category") {
                category = Category::from_name(&value);
            } else if let Some(value) = field_value(line, "email") {
                email = EmailAddress::parse(value).ok();
            } else if let Some(value) = field_value(line, "week time") {
                week_signal = Some(WeekPhase::from_signal(&value));
            }
        }

        let category = category.unwrap_or(Category::Unclear);

        Self {
            category,
            email,
            // A week signal is only trusted when the reply also said the
            // utterance was about week timing.
            week_signal: if category == Category::WeekTime {
                week_signal
            } else {
                None
            },
        }
    }
}

/// Extracts `value` from a `Key: value` line, case-insensitively.
///
/// Returns `None` for absent keys and for literal "none" placeholders.
/// Strips the bracket/quote decoration models tend to echo back from the
/// template.
fn field_value(line: &str, key: &str) -> Option<String> {
    let (line_key, value) = line.split_once(':')?;
    if !line_key.trim().eq_ignore_ascii_case(key) {
        return None;
    }

    let value = value
        .trim()
        .trim_matches(|c| matches!(c, '[' | ']' | '"' | '\''))
        .trim();

    if value.is_empty() || value.eq_ignore_ascii_case("none") {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod category {
        use super::*;

        #[test]
        fn from_name_accepts_taxonomy_names() {
            assert_eq!(Category::from_name("week_time"), Some(Category::WeekTime));
            assert_eq!(Category::from_name("blockers"), Some(Category::Blockers));
            assert_eq!(
                Category::from_name("personal_updates"),
                Some(Category::PersonalUpdates)
            );
        }

        #[test]
        fn from_name_normalizes_case_and_spaces() {
            assert_eq!(Category::from_name("Week Time"), Some(Category::WeekTime));
            assert_eq!(
                Category::from_name(" Personal Updates "),
                Some(Category::PersonalUpdates)
            );
        }

        #[test]
        fn from_name_rejects_unknown_names() {
            assert_eq!(Category::from_name("gossip"), None);
            assert_eq!(Category::from_name(""), None);
        }

        #[test]
        fn field_mapping_covers_the_six_fields() {
            let mapped: Vec<_> = Category::ALL
                .into_iter()
                .filter_map(|c| c.as_required_field())
                .collect();
            assert_eq!(mapped, RequiredField::ALL.to_vec());
        }

        #[test]
        fn week_time_and_unclear_map_to_no_field() {
            assert_eq!(Category::WeekTime.as_required_field(), None);
            assert_eq!(Category::Unclear.as_required_field(), None);
        }
    }

    mod parse_reply {
        use super::*;

        #[test]
        fn parses_the_expected_shape() {
            let reply = "Category: email\nEmail: sam@example.com\nWeek Time: None";
            let result = Classification::parse_reply(reply);

            assert_eq!(result.category, Category::Email);
            assert_eq!(result.email.unwrap().as_str(), "sam@example.com");
            assert_eq!(result.week_signal, None);
        }

        #[test]
        fn parses_week_time_reply() {
            let reply = "Category: week_time\nEmail: None\nWeek Time: beginning";
            let result = Classification::parse_reply(reply);

            assert_eq!(result.category, Category::WeekTime);
            assert_eq!(result.week_signal, Some(WeekPhase::BeginningOfWeek));
        }

        #[test]
        fn tolerates_bracketed_template_echo() {
            let reply = "Category: [week_time]\nEmail: [None]\nWeek Time: [end]";
            let result = Classification::parse_reply(reply);

            assert_eq!(result.category, Category::WeekTime);
            assert_eq!(result.week_signal, Some(WeekPhase::EndOfWeek));
        }

        #[test]
        fn missing_lines_degrade_to_unclear() {
            let result = Classification::parse_reply("Category: ");
            assert_eq!(result, Classification::unclear());

            let result = Classification::parse_reply("");
            assert_eq!(result, Classification::unclear());
        }

        #[test]
        fn unknown_category_degrades_to_unclear() {
            let reply = "Category: weather\nEmail: None\nWeek Time: None";
            let result = Classification::parse_reply(reply);
            assert_eq!(result.category, Category::Unclear);
        }

        #[test]
        fn prose_reply_degrades_to_unclear() {
            let result =
                Classification::parse_reply("I think this message is about the user's project.");
            assert_eq!(result, Classification::unclear());
        }

        #[test]
        fn email_is_kept_even_for_other_categories() {
            let reply = "Category: project\nEmail: sam@example.com\nWeek Time: None";
            let result = Classification::parse_reply(reply);

            assert_eq!(result.category, Category::Project);
            assert_eq!(result.email.unwrap().as_str(), "sam@example.com");
        }

        #[test]
        fn malformed_email_is_dropped() {
            let reply = "Category: email\nEmail: not-an-address\nWeek Time: None";
            let result = Classification::parse_reply(reply);

            assert_eq!(result.category, Category::Email);
            assert_eq!(result.email, None);
        }

        #[test]
        fn week_signal_ignored_when_category_differs() {
            let reply = "Category: blockers\nEmail: None\nWeek Time: beginning";
            let result = Classification::parse_reply(reply);

            assert_eq!(result.category, Category::Blockers);
            assert_eq!(result.week_signal, None);
        }

        #[test]
        fn none_placeholders_yield_no_values() {
            let reply = "Category: unclear\nEmail: none\nWeek Time: NONE";
            let result = Classification::parse_reply(reply);
            assert_eq!(result, Classification::unclear());
        }

        #[test]
        fn surrounding_chatter_is_ignored() {
            let reply = "Sure! Here is the classification:\n\nCategory: risks\nEmail: None\nWeek Time: None\n\nLet me know if you need more.";
            let result = Classification::parse_reply(reply);
            assert_eq!(result.category, Category::Risks);
        }
    }
}
