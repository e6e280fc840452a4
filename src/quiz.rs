//! Question record and the single-round quiz session.
//!
//! A `QuizSession` owns one parsed `QuestionRecord` and tracks the user's
//! choice. Selection is one-shot: the first in-range pick is final and every
//! later pick is ignored until the session is discarded on reset.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One multiple-choice question parsed from the model response.
///
/// Wire field names are camelCase; the response schema handed to the model is
/// generated from this type. `correct_option_index` pointing at a valid
/// option is a contract of that schema, not enforced locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
#[schemars(description = "A single multiple-choice educational question derived from the supplied images")]
pub struct QuestionRecord {
    /// The question text shown to the learner
    #[schemars(description = "The text of the educational question")]
    pub question_text: String,
    /// Answer options in display order
    #[schemars(length(min = 4, max = 4), description = "Exactly four answer options")]
    pub options: Vec<String>,
    /// Which option is right
    #[schemars(range(min = 0, max = 3), description = "Zero-based index of the correct option")]
    pub correct_option_index: usize,
    /// Shown after the learner answers
    #[schemars(description = "A short, clear explanation of why the correct option is right")]
    pub explanation_text: String,
}

/// How a single option should be presented to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionOutcome {
    /// No selection has been made yet
    Pending,
    /// This is the correct option (revealed after selection)
    Correct,
    /// The user picked this option and it was wrong
    WrongPick,
    /// Neither picked nor correct; de-emphasized after selection
    Dimmed,
}

/// One quiz round over a single question.
#[derive(Debug, Clone)]
pub struct QuizSession {
    record: QuestionRecord,
    selected: Option<usize>,
}

impl QuizSession {
    pub fn new(record: QuestionRecord) -> Self {
        Self { record, selected: None }
    }

    pub fn record(&self) -> &QuestionRecord {
        &self.record
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn is_answered(&self) -> bool {
        self.selected.is_some()
    }

    /// Record the user's choice. The first in-range selection wins; later
    /// calls and out-of-range indices change nothing. Returns whether the
    /// selection was taken.
    pub fn select(&mut self, index: usize) -> bool {
        if self.selected.is_some() || index >= self.record.options.len() {
            return false;
        }
        self.selected = Some(index);
        true
    }

    /// Presentation outcome for the option at `index`.
    pub fn outcome(&self, index: usize) -> OptionOutcome {
        match self.selected {
            None => OptionOutcome::Pending,
            Some(picked) => {
                if index == self.record.correct_option_index {
                    OptionOutcome::Correct
                } else if index == picked {
                    OptionOutcome::WrongPick
                } else {
                    OptionOutcome::Dimmed
                }
            }
        }
    }

    /// Whether the recorded pick was right; `None` until an option is chosen.
    pub fn answered_correctly(&self) -> Option<bool> {
        self.selected
            .map(|picked| picked == self.record.correct_option_index)
    }

    /// The explanation text, hidden until an option has been selected.
    pub fn explanation(&self) -> Option<&str> {
        self.selected.map(|_| self.record.explanation_text.as_str())
    }
}
