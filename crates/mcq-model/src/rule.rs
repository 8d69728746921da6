//! Rule identifiers.
//!
//! Every diagnostic names exactly one rule. Codes are stable and appear in
//! text and JSON output.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which battery a rule belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Content rules that decide the default verdict.
    Rule,
    /// Structural and formatting expectations of the import format.
    Format,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Rule => "Rule",
            Self::Format => "Format",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleId {
    MultipleChoice,
    AnswerCount,
    CorrectCount,
    IncorrectCount,
    PointsCap,
    MalformedOption,
    Type,
    Title,
    OptionColumns,
    OptionPlaceholders,
    OptionTag,
    QuestionColumns,
    QuestionText,
    FeedbackFormat,
    FeedbackText,
    EmptyFeedback,
}

impl RuleId {
    /// All rules, in evaluation order.
    pub const ALL: [RuleId; 16] = [
        RuleId::MultipleChoice,
        RuleId::AnswerCount,
        RuleId::CorrectCount,
        RuleId::IncorrectCount,
        RuleId::PointsCap,
        RuleId::MalformedOption,
        RuleId::Type,
        RuleId::Title,
        RuleId::OptionColumns,
        RuleId::OptionPlaceholders,
        RuleId::OptionTag,
        RuleId::QuestionColumns,
        RuleId::QuestionText,
        RuleId::FeedbackFormat,
        RuleId::FeedbackText,
        RuleId::EmptyFeedback,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            RuleId::MultipleChoice => "MC001",
            RuleId::AnswerCount => "MC002",
            RuleId::CorrectCount => "MC003",
            RuleId::IncorrectCount => "MC004",
            RuleId::PointsCap => "MC005",
            RuleId::MalformedOption => "MC006",
            RuleId::Type => "FMT001",
            RuleId::Title => "FMT002",
            RuleId::OptionColumns => "FMT003",
            RuleId::OptionPlaceholders => "FMT004",
            RuleId::OptionTag => "FMT005",
            RuleId::QuestionColumns => "FMT006",
            RuleId::QuestionText => "FMT007",
            RuleId::FeedbackFormat => "FMT008",
            RuleId::FeedbackText => "FMT009",
            RuleId::EmptyFeedback => "FMT010",
        }
    }

    /// Look a rule up by its code, ignoring case.
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::ALL
            .into_iter()
            .find(|rule| rule.code().eq_ignore_ascii_case(code))
    }

    pub fn category(&self) -> Category {
        match self {
            RuleId::MultipleChoice
            | RuleId::AnswerCount
            | RuleId::CorrectCount
            | RuleId::IncorrectCount
            | RuleId::PointsCap
            | RuleId::MalformedOption => Category::Rule,
            _ => Category::Format,
        }
    }

    /// One-line description used by the `rules` listing.
    pub fn description(&self) -> &'static str {
        match self {
            RuleId::MultipleChoice => "Header row declares a multiple-choice question",
            RuleId::AnswerCount => "Question has the expected number of options",
            RuleId::CorrectCount => "Exactly the required number of options award full points",
            RuleId::IncorrectCount => "Enough options award zero points",
            RuleId::PointsCap => "Few enough options award more than the points threshold",
            RuleId::MalformedOption => "Option points are numeric and between 0 and 100",
            RuleId::Type => "Header row carries the NewQuestion tag and a type code",
            RuleId::Title => "Exactly one filled-in title row",
            RuleId::OptionColumns => "Option rows have the expected number of columns",
            RuleId::OptionPlaceholders => "Option text and feedback contain no template placeholders",
            RuleId::OptionTag => "Option rows are tagged exactly \"Option\"",
            RuleId::QuestionColumns => "Exactly one question text row with the expected columns",
            RuleId::QuestionText => "Question text is filled in and well formed",
            RuleId::FeedbackFormat => "Text format cells hold an allowed format marker",
            RuleId::FeedbackText => "Feedback contains no template placeholders",
            RuleId::EmptyFeedback => "Feedback rows are not empty",
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
