//! Append-only interview transcript.
//!
//! The transcript is the single source of context for classification,
//! question planning, and summarization. Entries are immutable once
//! appended and are never removed.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

/// Who produced a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    /// The interviewed team member.
    User,
    /// The interviewing agent.
    Agent,
}

impl Speaker {
    /// Returns the label used when rendering the transcript into prompts.
    pub fn label(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Agent => "agent",
        }
    }
}

/// One immutable exchange line in the transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    speaker: Speaker,
    text: String,
    recorded_at: Timestamp,
}

impl TranscriptEntry {
    fn new(speaker: Speaker, text: impl Into<String>) -> Self {
        Self {
            speaker,
            text: text.into(),
            recorded_at: Timestamp::now(),
        }
    }

    /// Returns who spoke.
    pub fn speaker(&self) -> Speaker {
        self.speaker
    }

    /// Returns what was said.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns when the entry was appended.
    pub fn recorded_at(&self) -> &Timestamp {
        &self.recorded_at
    }
}

/// The ordered, append-only log of an interview.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    /// Creates an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a user utterance.
    pub fn record_user(&mut self, text: impl Into<String>) {
        self.entries.push(TranscriptEntry::new(Speaker::User, text));
    }

    /// Appends an agent reply.
    pub fn record_agent(&mut self, text: impl Into<String>) {
        self.entries.push(TranscriptEntry::new(Speaker::Agent, text));
    }

    /// Returns the entries in chronological order.
    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of user utterances recorded.
    pub fn user_message_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.speaker() == Speaker::User)
            .count()
    }

    /// Renders the transcript as `speaker: text` lines for prompt context.
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(|e| format!("{}: {}", e.speaker().label(), e.text()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let transcript = Transcript::new();
        assert!(transcript.is_empty());
        assert_eq!(transcript.len(), 0);
        assert_eq!(transcript.render(), "");
    }

    #[test]
    fn records_entries_in_order() {
        let mut transcript = Transcript::new();
        transcript.record_agent("Hello! Beginning or end of week?");
        transcript.record_user("Beginning");
        transcript.record_agent("What project are you on?");

        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript.entries()[0].speaker(), Speaker::Agent);
        assert_eq!(transcript.entries()[1].speaker(), Speaker::User);
        assert_eq!(transcript.entries()[1].text(), "Beginning");
    }

    #[test]
    fn counts_only_user_messages() {
        let mut transcript = Transcript::new();
        transcript.record_agent("Hi");
        transcript.record_user("Hello");
        transcript.record_agent("And?");
        transcript.record_user("More");

        assert_eq!(transcript.user_message_count(), 2);
    }

    #[test]
    fn renders_speaker_prefixed_lines() {
        let mut transcript = Transcript::new();
        transcript.record_user("It's Monday");
        transcript.record_agent("Noted.");

        assert_eq!(transcript.render(), "user: It's Monday\nagent: Noted.");
    }

    #[test]
    fn entries_survive_serde_round_trip() {
        let mut transcript = Transcript::new();
        transcript.record_user("working on the parser");

        let json = serde_json::to_string(&transcript).unwrap();
        let back: Transcript = serde_json::from_str(&json).unwrap();
        assert_eq!(transcript, back);
    }
}
