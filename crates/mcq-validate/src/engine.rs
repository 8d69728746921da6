//! Rule engine.
//!
//! Runs the fixed battery of checks against a question table and collects
//! one diagnostic per violated rule. Every check runs on every call; a
//! failing check never stops the ones after it.

use mcq_model::{
    Diagnostic, QuestionTable, RuleId, RuleSettings, SettingsError, ValidationVerdict,
};
use regex::Regex;

use crate::checks::{format, rules};

/// Rules deciding the default verdict, in evaluation order.
pub const CONTENT_RULES: [RuleId; 5] = [
    RuleId::MultipleChoice,
    RuleId::AnswerCount,
    RuleId::CorrectCount,
    RuleId::IncorrectCount,
    RuleId::PointsCap,
];

/// Formatting checks added by strict validation, in evaluation order.
pub const FORMAT_RULES: [RuleId; 10] = [
    RuleId::EmptyFeedback,
    RuleId::Type,
    RuleId::Title,
    RuleId::OptionColumns,
    RuleId::OptionPlaceholders,
    RuleId::OptionTag,
    RuleId::QuestionColumns,
    RuleId::QuestionText,
    RuleId::FeedbackFormat,
    RuleId::FeedbackText,
];

/// Rule engine holding checked settings.
#[derive(Debug, Clone)]
pub struct RuleEngine {
    settings: RuleSettings,
    question_pattern: Option<Regex>,
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self {
            settings: RuleSettings::default(),
            question_pattern: None,
        }
    }
}

impl RuleEngine {
    /// Create an engine, rejecting settings that fail [`RuleSettings::check`].
    pub fn new(settings: RuleSettings) -> Result<Self, SettingsError> {
        settings.check()?;
        let question_pattern = settings.format.question_text_regex()?;
        Ok(Self {
            settings,
            question_pattern,
        })
    }

    pub fn settings(&self) -> &RuleSettings {
        &self.settings
    }

    /// Validate against the five content rules plus malformed option rows.
    pub fn validate(&self, table: &QuestionTable) -> ValidationVerdict {
        let mut diagnostics = Vec::new();
        for rule in CONTENT_RULES {
            self.run_rule(table, rule, &mut diagnostics);
        }
        diagnostics.extend(rules::malformed_options(table, &self.settings));
        self.finish(diagnostics)
    }

    /// Validate against content rules, malformed rows and every formatting check.
    pub fn validate_strict(&self, table: &QuestionTable) -> ValidationVerdict {
        let mut diagnostics = Vec::new();
        for rule in CONTENT_RULES {
            self.run_rule(table, rule, &mut diagnostics);
        }
        diagnostics.extend(rules::malformed_options(table, &self.settings));
        for rule in FORMAT_RULES {
            self.run_rule(table, rule, &mut diagnostics);
        }
        self.finish(diagnostics)
    }

    /// Whether `table` satisfies a single rule.
    pub fn passes(&self, table: &QuestionTable, rule: RuleId) -> bool {
        let settings = &self.settings;
        match rule {
            RuleId::MultipleChoice => rules::is_multiple_choice(table, settings),
            RuleId::AnswerCount => {
                rules::count_answers(table, settings) == settings.expected_answers
            }
            RuleId::CorrectCount => {
                rules::count_correct(table, settings) == settings.required_correct
            }
            RuleId::IncorrectCount => {
                rules::count_incorrect(table, settings) >= settings.min_incorrect
            }
            RuleId::PointsCap => rules::validate_answer_points(table, settings),
            RuleId::MalformedOption => rules::malformed_options(table, settings).is_empty(),
            RuleId::Type => format::good_type(table, settings),
            RuleId::Title => format::good_title(table, settings),
            RuleId::OptionColumns => format::good_option_cols(table, settings),
            RuleId::OptionPlaceholders => format::good_option_placeholders(table, settings),
            RuleId::OptionTag => format::good_option_tag(table, settings),
            RuleId::QuestionColumns => format::good_question_cols(table, settings),
            RuleId::QuestionText => {
                format::good_question_text(table, settings, self.question_pattern.as_ref())
            }
            RuleId::FeedbackFormat => format::good_feedback_format(table, settings),
            RuleId::FeedbackText => format::good_feedback_text(table, settings),
            RuleId::EmptyFeedback => format::non_empty_feedback(table, settings),
        }
    }

    fn run_rule(&self, table: &QuestionTable, rule: RuleId, diagnostics: &mut Vec<Diagnostic>) {
        let passed = self.passes(table, rule);
        tracing::debug!(rule = rule.code(), passed, "evaluated rule");
        if !passed {
            diagnostics.push(Diagnostic::new(rule, self.message(table, rule)));
        }
    }

    fn finish(&self, diagnostics: Vec<Diagnostic>) -> ValidationVerdict {
        let verdict = ValidationVerdict::from_diagnostics(diagnostics);
        tracing::debug!(
            status = %verdict.status,
            violations = verdict.diagnostics.len(),
            "validation finished"
        );
        verdict
    }

    /// Message for a failed rule, with the observed value where there is one.
    fn message(&self, table: &QuestionTable, rule: RuleId) -> String {
        let settings = &self.settings;
        let tags = &settings.tags;
        match rule {
            RuleId::MultipleChoice => match table.question_type().as_str() {
                Some(found) => format!(
                    "question type is \"{found}\", expected \"{}\"",
                    settings.mc_tag
                ),
                None => format!("question type is missing, expected \"{}\"", settings.mc_tag),
            },
            RuleId::AnswerCount => format!(
                "expected {} options, found {}",
                settings.expected_answers,
                rules::count_answers(table, settings)
            ),
            RuleId::CorrectCount => format!(
                "expected exactly {} option(s) worth 100 points, found {}",
                settings.required_correct,
                rules::count_correct(table, settings)
            ),
            RuleId::IncorrectCount => format!(
                "expected at least {} options worth 0 points, found {}",
                settings.min_incorrect,
                rules::count_incorrect(table, settings)
            ),
            RuleId::PointsCap => format!(
                "at most {} options may be worth more than {} points, found {}",
                settings.max_high_value,
                settings.points_threshold,
                rules::count_high_value(table, settings)
            ),
            RuleId::MalformedOption => "option rows have malformed points".to_string(),
            RuleId::Type => format!(
                "first row must be tagged \"{}\" and name a question type",
                tags.header
            ),
            RuleId::Title => format!("expected exactly one filled-in \"{}\" row", tags.title),
            RuleId::OptionColumns => format!(
                "\"{}\" rows must have {} to {} columns",
                tags.option, settings.format.option_min_columns, settings.format.option_max_columns
            ),
            RuleId::OptionPlaceholders => {
                "option text or feedback still contains a placeholder".to_string()
            }
            RuleId::OptionTag => format!("option rows must be tagged exactly \"{}\"", tags.option),
            RuleId::QuestionColumns => format!(
                "expected exactly one \"{}\" row with 2 to {} columns",
                tags.question, settings.format.question_max_columns
            ),
            RuleId::QuestionText => match &settings.format.question_text_pattern {
                Some(pattern) => format!(
                    "question text is empty, a placeholder, or does not match /{pattern}/"
                ),
                None => "question text is empty or a placeholder".to_string(),
            },
            RuleId::FeedbackFormat => format!(
                "text format cells must be empty or one of: {}",
                settings.format.allowed_text_formats.join(", ")
            ),
            RuleId::FeedbackText => "feedback still contains a placeholder".to_string(),
            RuleId::EmptyFeedback => format!("\"{}\" rows must not be empty", tags.feedback),
        }
    }
}
