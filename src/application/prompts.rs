//! Fixed instruction templates for the generation oracle.
//!
//! Everything the oracle is ever asked lives here: the classification
//! instruction, the question-planning instruction, the summary layouts, and
//! the three canned agent messages. Keeping the text in one module makes
//! prompt drift reviewable.

use once_cell::sync::Lazy;

use crate::domain::interview::{Category, InterviewSession, RequiredField, Transcript, WeekPhase};

/// Opening message of every interview.
pub const SESSION_START: &str = "Hello! I'm here to help you craft an update for your manager. \
To get started, could you tell me whether this update is for the beginning or the end of the week? \
Please also share your email address.";

/// Reply used when any oracle call fails mid-turn.
pub const ORACLE_FAILURE_REPLY: &str =
    "I'm sorry, but I ran into an unexpected problem. Could you please try that again?";

/// Builds the closing message wrapped around the rendered summary.
pub fn completion_message(summary: &str) -> String {
    format!(
        "Great! We've completed your update. Here's a summary of what we discussed:\n\n\
        {summary}\n\n\
        We'll go ahead and save this update for your manager."
    )
}

fn category_description(category: Category) -> &'static str {
    match category {
        Category::WeekTime => "the input indicates whether it's the beginning or end of the week",
        Category::Email => "the input appears to be the user's email address",
        Category::Project => "information about the current project",
        Category::Accomplishments => {
            "recent achievements or milestones related to the specific project"
        }
        Category::Blockers => {
            "issues or challenges faced in completing specific tasks for the project"
        }
        Category::Risks => "potential risks to the project's completion or timely delivery",
        Category::PersonalUpdates => "personal news unrelated to the project",
        Category::Unclear => "the input doesn't clearly fit into any category",
    }
}

static CATEGORY_TAXONOMY: Lazy<String> = Lazy::new(|| {
    Category::ALL
        .into_iter()
        .map(|c| format!("- {}: {}", c.as_str(), category_description(c)))
        .collect::<Vec<_>>()
        .join("\n")
});

/// Builds the classification instruction for one utterance.
pub fn classification_prompt(utterance: &str, transcript: &Transcript) -> String {
    format!(
        "Analyze the following user input from a weekly status interview and determine which \
        category it best fits into:\n\
        {taxonomy}\n\n\
        If the input contains the user's email address, extract it.\n\
        If the category is \"week_time\", also extract whether it's the beginning or end of the week.\n\n\
        Conversation so far:\n\
        {transcript}\n\n\
        User input: {utterance}\n\n\
        Respond in exactly this format:\n\
        Category: [category]\n\
        Email: [extracted email, or None]\n\
        Week Time: [beginning/end, or None]",
        taxonomy = *CATEGORY_TAXONOMY,
        transcript = transcript.render(),
    )
}

/// Checklist the planner follows while the week phase is still unknown.
const PHASE_UNKNOWN_CHECKLIST: &str = "The week phase is not established yet. Before anything \
else, find out whether this update covers the beginning or the end of the week, and collect the \
user's email address.";

/// Checklist for beginning-of-week interviews.
const BEGINNING_OF_WEEK_CHECKLIST: &str = "For the beginning of the week, focus on:\n\
1. What project the user is currently working on and which specific tasks belong to it\n\
2. What the user would like to get done by the end of this week\n\
3. Any potential blockers or unknowns that may come up this week\n\
4. Anything notable the user would like to share or celebrate\n\
5. Make sure to collect the user's email";

/// Checklist for end-of-week interviews.
const END_OF_WEEK_CHECKLIST: &str = "For the end of the week, focus on:\n\
1. Any personal updates the user wants to share\n\
2. What the user accomplished: the project and the tasks they completed\n\
3. Blockers or issues the user ran into this week\n\
4. Risks or concerns about the project and its goals\n\
5. Make sure to collect the user's email";

fn checklist_for(phase: WeekPhase) -> &'static str {
    match phase {
        WeekPhase::Unknown => PHASE_UNKNOWN_CHECKLIST,
        WeekPhase::BeginningOfWeek => BEGINNING_OF_WEEK_CHECKLIST,
        WeekPhase::EndOfWeek => END_OF_WEEK_CHECKLIST,
    }
}

fn render_tracker(session: &InterviewSession) -> String {
    RequiredField::ALL
        .into_iter()
        .map(|field| {
            let status = if session.tracker().is_known(field) {
                "collected"
            } else {
                "missing"
            };
            format!("- {}: {}", field.as_str(), status)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Builds the question-planning instruction for the current session state.
pub fn next_question_prompt(session: &InterviewSession) -> String {
    let missing = session.tracker().missing_fields();
    let missing_line = if missing.is_empty() {
        "(nothing)".to_string()
    } else {
        missing
            .iter()
            .map(|f| f.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };

    let ask_instruction = match missing.first() {
        Some(first) => format!(
            "Acknowledge the user's last message, then ask one direct question to collect \
            \"{}\". Ask for exactly one piece of information at a time; be direct but keep a \
            conversational tone.",
            first.as_str()
        ),
        None => "All required information has been gathered. Acknowledge the user's last message \
            with a brief concluding note; do not ask another question."
            .to_string(),
    };

    format!(
        "You are interviewing a team member for their weekly status update.\n\n\
        Conversation so far:\n\
        {transcript}\n\n\
        Last message from the user: {last}\n\n\
        Collected so far:\n\
        {tracker}\n\n\
        {checklist}\n\n\
        Still missing, in order: {missing_line}\n\n\
        {ask_instruction}",
        transcript = session.transcript().render(),
        last = session.last_utterance().unwrap_or(""),
        tracker = render_tracker(session),
        checklist = checklist_for(session.phase()),
    )
}

/// Section layout for beginning-of-week summaries.
const BEGINNING_OF_WEEK_LAYOUT: &str = "Beginning of Week:\n\
    Current Tasks:\n\
        Project: the project the user is working on\n\
        Tasks for the week: the specific tasks the user will be working on\n\
    Goals for the Week:\n\
        The goals the user has for this week\n\
    Blockers:\n\
        Any blockers, issues, or unknowns the user might experience\n\
    Personal Update:\n\
        Any personal updates from the user";

/// Section layout for end-of-week summaries.
const END_OF_WEEK_LAYOUT: &str = "End of Week:\n\
    Personal Update:\n\
        Any personal updates from the user\n\
    Accomplishments:\n\
        Project: the project the user worked on\n\
        The tasks the user completed\n\
    Blockers:\n\
        Any blockers, issues, or unknowns the user experienced this week\n\
    Risks:\n\
        Any risks or concerns expressed by the user about the project and its goals";

/// Builds the summary-rendering instruction for a finished interview.
pub fn summary_prompt(transcript: &Transcript, phase: WeekPhase) -> String {
    let layout = match phase {
        // Phase is established before completion; beginning is the safe
        // fallback if a caller summarizes early.
        WeekPhase::BeginningOfWeek | WeekPhase::Unknown => BEGINNING_OF_WEEK_LAYOUT,
        WeekPhase::EndOfWeek => END_OF_WEEK_LAYOUT,
    };

    format!(
        "Based on the following conversation, generate a concise summary of the team member's \
        weekly update. Format it as a set of bullets using exactly this structure:\n\n\
        {layout}\n\n\
        Conversation:\n\
        {transcript}\n\n\
        Summary:",
        transcript = transcript.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::interview::InterviewSession;

    fn transcript_with(lines: &[(&str, bool)]) -> Transcript {
        let mut transcript = Transcript::new();
        for (text, is_user) in lines {
            if *is_user {
                transcript.record_user(*text);
            } else {
                transcript.record_agent(*text);
            }
        }
        transcript
    }

    mod classification {
        use super::*;

        #[test]
        fn embeds_every_category() {
            let prompt = classification_prompt("hello", &Transcript::new());
            for category in Category::ALL {
                assert!(
                    prompt.contains(category.as_str()),
                    "missing category {}",
                    category
                );
            }
        }

        #[test]
        fn embeds_utterance_and_transcript() {
            let transcript = transcript_with(&[("Hi there", false)]);
            let prompt = classification_prompt("my email is a@b.com", &transcript);

            assert!(prompt.contains("User input: my email is a@b.com"));
            assert!(prompt.contains("agent: Hi there"));
        }

        #[test]
        fn requests_the_three_line_format() {
            let prompt = classification_prompt("hello", &Transcript::new());
            assert!(prompt.contains("Category: [category]"));
            assert!(prompt.contains("Email: [extracted email, or None]"));
            assert!(prompt.contains("Week Time: [beginning/end, or None]"));
        }
    }

    mod planning {
        use super::*;
        use crate::domain::interview::{Category, Classification};

        #[test]
        fn unknown_phase_steers_to_phase_and_email() {
            let session = InterviewSession::new();
            let prompt = next_question_prompt(&session);

            assert!(prompt.contains("week phase is not established"));
            assert!(prompt.contains("email address"));
        }

        #[test]
        fn known_phase_uses_its_checklist() {
            let mut session = InterviewSession::new();
            session.apply(&Classification {
                category: Category::WeekTime,
                email: None,
                week_signal: Some(WeekPhase::EndOfWeek),
            });

            let prompt = next_question_prompt(&session);
            assert!(prompt.contains("For the end of the week"));
            assert!(!prompt.contains("For the beginning of the week"));
        }

        #[test]
        fn asks_for_the_first_missing_field() {
            let mut session = InterviewSession::new();
            session.apply(&Classification {
                category: Category::Email,
                email: None,
                week_signal: None,
            });

            let prompt = next_question_prompt(&session);
            assert!(prompt.contains("to collect \"project\""));
        }

        #[test]
        fn lists_missing_fields_in_declaration_order() {
            let mut session = InterviewSession::new();
            session.apply(&Classification {
                category: Category::Risks,
                email: None,
                week_signal: None,
            });

            let prompt = next_question_prompt(&session);
            assert!(prompt.contains(
                "Still missing, in order: email, project, accomplishments, blockers, personal_updates"
            ));
        }

        #[test]
        fn concludes_when_nothing_is_missing() {
            let mut session = InterviewSession::new();
            for category in [
                Category::Email,
                Category::Project,
                Category::Accomplishments,
                Category::Blockers,
                Category::Risks,
                Category::PersonalUpdates,
            ] {
                session.apply(&Classification {
                    category,
                    email: None,
                    week_signal: None,
                });
            }

            let prompt = next_question_prompt(&session);
            assert!(prompt.contains("do not ask another question"));
        }
    }

    mod summary {
        use super::*;

        #[test]
        fn beginning_layout_has_its_sections() {
            let prompt = summary_prompt(&Transcript::new(), WeekPhase::BeginningOfWeek);

            assert!(prompt.contains("Current Tasks"));
            assert!(prompt.contains("Goals for the Week"));
            assert!(prompt.contains("Blockers"));
            assert!(prompt.contains("Personal Update"));
            assert!(!prompt.contains("Risks"));
        }

        #[test]
        fn end_layout_has_its_sections() {
            let prompt = summary_prompt(&Transcript::new(), WeekPhase::EndOfWeek);

            assert!(prompt.contains("Personal Update"));
            assert!(prompt.contains("Accomplishments"));
            assert!(prompt.contains("Blockers"));
            assert!(prompt.contains("Risks"));
            assert!(!prompt.contains("Goals for the Week"));
        }

        #[test]
        fn embeds_the_conversation() {
            let transcript = transcript_with(&[("I shipped the importer", true)]);
            let prompt = summary_prompt(&transcript, WeekPhase::EndOfWeek);
            assert!(prompt.contains("user: I shipped the importer"));
        }
    }

    mod messages {
        use super::*;

        #[test]
        fn start_message_asks_for_phase_and_email() {
            assert!(SESSION_START.contains("beginning or the end of the week"));
            assert!(SESSION_START.contains("email"));
        }

        #[test]
        fn completion_message_wraps_the_summary() {
            let message = completion_message("- shipped things");
            assert!(message.contains("- shipped things"));
            assert!(message.contains("save this update"));
        }
    }
}
