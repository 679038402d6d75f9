//! Closed enums and value types exchanged between the engine and its callers.

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ParseEnumError, QuizError};

/// Identifier of an answer option.
pub type AnswerId = Uuid;

/// Implements `as_str`, `Display`, `FromStr` and `TryFrom<String>` for a fieldless enum
/// stored as text.
macro_rules! text_enum {
    ($ty:ident, $kind:literal, { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $ty {
            /// The canonical lowercase name, as stored and serialized.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok(Self::$variant),)+
                    other => Err(ParseEnumError {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }

        impl TryFrom<String> for $ty {
            type Error = ParseEnumError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }
    };
}

/// Difficulty tier of a flashcard, ordered from easiest to retired.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
    /// Terminal graveyard state. The card never scores again.
    Buried,
}

text_enum!(Difficulty, "difficulty", {
    Easy => "easy",
    Medium => "medium",
    Hard => "hard",
    Buried => "buried",
});

impl Difficulty {
    /// The single "buried never scores and never advances" guard.
    pub const fn is_retired(self) -> bool {
        matches!(self, Self::Buried)
    }
}

/// Outcome classification of an attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Correctness {
    None,
    /// Part of the taxonomy, never produced by the scorer.
    Partial,
    Complete,
}

text_enum!(Correctness, "correctness", {
    None => "none",
    Partial => "partial",
    Complete => "complete",
});

/// Kind of question a flashcard asks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    /// True/false statement.
    Statement,
    /// Exactly one correct option.
    Single,
    /// One or more correct options, all of which must be selected.
    Multiple,
}

text_enum!(QuestionType, "question type", {
    Statement => "statement",
    Single => "single",
    Multiple => "multiple",
});

/// Authoring lifecycle of a flashcard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleStatus {
    Draft,
    #[default]
    Published,
    Hidden,
}

text_enum!(LifecycleStatus, "status", {
    Draft => "draft",
    Published => "published",
    Hidden => "hidden",
});

/// Ground truth for a flashcard, shaped after its question type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerKey {
    Statement { is_true: bool },
    /// Every option of the card mapped to its `is_correct` flag.
    Choices(BTreeMap<AnswerId, bool>),
}

impl AnswerKey {
    pub fn choices<I>(options: I) -> Self
    where
        I: IntoIterator<Item = (AnswerId, bool)>,
    {
        Self::Choices(options.into_iter().collect())
    }

    /// Ids flagged as correct. Empty for statements.
    pub fn correct_ids(&self) -> BTreeSet<AnswerId> {
        match self {
            Self::Statement { .. } => BTreeSet::new(),
            Self::Choices(options) => options
                .iter()
                .filter(|(_, is_correct)| **is_correct)
                .map(|(id, _)| *id)
                .collect(),
        }
    }

    /// Whether `answer_id` is one of this card's options.
    pub fn contains(&self, answer_id: &AnswerId) -> bool {
        match self {
            Self::Statement { .. } => false,
            Self::Choices(options) => options.contains_key(answer_id),
        }
    }

    /// Snapshot of what was selected and whether each selection was correct.
    ///
    /// Only the card's own answers are kept; anything else has no row to point at.
    pub fn snapshot(&self, submitted: &SubmittedAnswer) -> Vec<GivenAnswer> {
        let Self::Choices(options) = self else {
            return Vec::new();
        };
        submitted
            .selected_ids()
            .into_iter()
            .filter_map(|answer_id| {
                options.get(&answer_id).map(|is_correct| GivenAnswer {
                    answer_id,
                    is_correct: *is_correct,
                })
            })
            .collect()
    }
}

/// What the user submitted for one attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmittedAnswer {
    Statement(bool),
    Single(AnswerId),
    Multiple(BTreeSet<AnswerId>),
}

impl SubmittedAnswer {
    /// Builds a submission from the raw request fields; exactly one of them must be present.
    pub fn from_shape(
        is_true: Option<bool>,
        answer_id: Option<AnswerId>,
        answer_ids: Option<Vec<AnswerId>>,
    ) -> Result<Self, QuizError> {
        match (is_true, answer_id, answer_ids) {
            (Some(value), None, None) => Ok(Self::Statement(value)),
            (None, Some(id), None) => Ok(Self::Single(id)),
            (None, None, Some(ids)) => Ok(Self::Multiple(ids.into_iter().collect())),
            (None, None, None) => Err(QuizError::UndeterminedQuestionType {
                reason: "no answer was submitted",
            }),
            _ => Err(QuizError::UndeterminedQuestionType {
                reason: "more than one answer shape was submitted",
            }),
        }
    }

    pub fn selected_ids(&self) -> Vec<AnswerId> {
        match self {
            Self::Statement(_) => Vec::new(),
            Self::Single(id) => vec![*id],
            Self::Multiple(ids) => ids.iter().copied().collect(),
        }
    }

    pub const fn statement_value(&self) -> Option<bool> {
        match self {
            Self::Statement(value) => Some(*value),
            Self::Single(_) | Self::Multiple(_) => None,
        }
    }
}

/// One selected option together with its correctness at the time of the attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GivenAnswer {
    pub answer_id: AnswerId,
    pub is_correct: bool,
}
