//! Rule settings.
//!
//! Every threshold and tag the rule engine compares against lives here so a
//! grading system with a different import dialect can override it from a
//! TOML file. Missing keys fall back to [`RuleSettings::default`].
//!
//! ```toml
//! mc_tag = "MC"
//! expected_answers = 4
//!
//! [format]
//! placeholder_markers = ["TODO", "<<"]
//! ```

use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SettingsError};

/// Thresholds for the content rules plus formatting expectations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuleSettings {
    /// Question-type code a multiple-choice header must carry.
    pub mc_tag: String,
    pub expected_answers: usize,
    /// Options that must award 100 points.
    pub required_correct: usize,
    /// Minimum options that must award 0 points.
    pub min_incorrect: usize,
    /// Options awarding strictly more than this count as high-value.
    pub points_threshold: u32,
    pub max_high_value: usize,
    pub tags: RowTags,
    pub format: FormatSettings,
}

impl Default for RuleSettings {
    fn default() -> Self {
        Self {
            mc_tag: "MC".to_string(),
            expected_answers: 4,
            required_correct: 1,
            min_incorrect: 2,
            points_threshold: 50,
            max_high_value: 2,
            tags: RowTags::default(),
            format: FormatSettings::default(),
        }
    }
}

/// Row-type tags of the question file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RowTags {
    pub header: String,
    pub title: String,
    pub question: String,
    pub option: String,
    pub feedback: String,
}

impl Default for RowTags {
    fn default() -> Self {
        Self {
            header: "NewQuestion".to_string(),
            title: "Title".to_string(),
            question: "QuestionText".to_string(),
            option: "Option".to_string(),
            feedback: "Feedback".to_string(),
        }
    }
}

/// Expectations checked by the formatting rules.
///
/// Option rows are laid out as
/// `Option, points, text, text format, feedback, feedback format`;
/// question rows as `QuestionText, text, text format`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormatSettings {
    /// Substrings marking template text that was never filled in.
    pub placeholder_markers: Vec<String>,
    /// Accepted values of text-format cells. An empty cell is always accepted.
    pub allowed_text_formats: Vec<String>,
    pub option_min_columns: usize,
    pub option_max_columns: usize,
    pub question_max_columns: usize,
    /// Regex the question text must match, if set.
    pub question_text_pattern: Option<String>,
}

impl Default for FormatSettings {
    fn default() -> Self {
        Self {
            placeholder_markers: ["TODO", "TBD", "XXX", "<<", ">>", "[[", "]]"]
                .into_iter()
                .map(String::from)
                .collect(),
            allowed_text_formats: vec!["HTML".to_string()],
            option_min_columns: 3,
            option_max_columns: 6,
            question_max_columns: 3,
            question_text_pattern: None,
        }
    }
}

impl FormatSettings {
    /// True when `text` contains any configured placeholder marker.
    pub fn has_placeholder(&self, text: &str) -> bool {
        self.placeholder_markers
            .iter()
            .filter(|marker| !marker.is_empty())
            .any(|marker| text.contains(marker.as_str()))
    }

    pub fn is_allowed_format(&self, value: &str) -> bool {
        let value = value.trim();
        value.is_empty()
            || self
                .allowed_text_formats
                .iter()
                .any(|format| format.eq_ignore_ascii_case(value))
    }

    /// Compile the question text pattern.
    pub fn question_text_regex(&self) -> Result<Option<Regex>> {
        self.question_text_pattern
            .as_deref()
            .map(|pattern| {
                Regex::new(pattern).map_err(|source| SettingsError::InvalidPattern {
                    pattern: pattern.to_string(),
                    source,
                })
            })
            .transpose()
    }
}

impl RuleSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse settings from TOML text and check them.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let settings: Self = toml::from_str(text).map_err(|source| SettingsError::Toml { source })?;
        settings.check()?;
        Ok(settings)
    }

    /// Load settings from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    #[must_use]
    pub fn with_mc_tag(mut self, tag: impl Into<String>) -> Self {
        self.mc_tag = tag.into();
        self
    }

    #[must_use]
    pub fn with_expected_answers(mut self, count: usize) -> Self {
        self.expected_answers = count;
        self
    }

    #[must_use]
    pub fn with_points_threshold(mut self, threshold: u32) -> Self {
        self.points_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_question_text_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.format.question_text_pattern = Some(pattern.into());
        self
    }

    /// Reject settings no question could ever satisfy.
    pub fn check(&self) -> Result<()> {
        if self.mc_tag.trim().is_empty() {
            return Err(SettingsError::InvalidValue {
                field: "mc_tag",
                reason: "must not be empty".to_string(),
            });
        }
        if self.required_correct.saturating_add(self.min_incorrect) > self.expected_answers {
            return Err(SettingsError::InvalidValue {
                field: "expected_answers",
                reason: format!(
                    "{} options cannot hold {} correct and {} incorrect",
                    self.expected_answers, self.required_correct, self.min_incorrect
                ),
            });
        }
        if self.points_threshold > 100 {
            return Err(SettingsError::InvalidValue {
                field: "points_threshold",
                reason: format!("{} is above 100", self.points_threshold),
            });
        }
        let format = &self.format;
        if format.option_min_columns > format.option_max_columns {
            return Err(SettingsError::InvalidValue {
                field: "format.option_min_columns",
                reason: format!(
                    "{} exceeds option_max_columns {}",
                    format.option_min_columns, format.option_max_columns
                ),
            });
        }
        if format.question_max_columns < 2 {
            return Err(SettingsError::InvalidValue {
                field: "format.question_max_columns",
                reason: "question rows need at least a tag and a text column".to_string(),
            });
        }
        format.question_text_regex()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let settings = RuleSettings::default();
        assert_eq!(settings.expected_answers, 4);
        assert_eq!(settings.required_correct, 1);
        assert_eq!(settings.min_incorrect, 2);
        assert_eq!(settings.points_threshold, 50);
        assert_eq!(settings.max_high_value, 2);
        assert_eq!(settings.mc_tag, "MC");
        assert!(settings.check().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let settings = RuleSettings::from_toml_str(
            r#"
            expected_answers = 5

            [format]
            allowed_text_formats = ["HTML", "TEXT"]
            "#,
        )
        .unwrap();
        assert_eq!(settings.expected_answers, 5);
        assert_eq!(settings.min_incorrect, 2);
        assert!(settings.format.is_allowed_format("text"));
        assert_eq!(settings.tags.option, "Option");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result = RuleSettings::from_toml_str("expected_anwsers = 5");
        assert!(matches!(result, Err(SettingsError::Toml { .. })));
    }

    #[test]
    fn invalid_pattern_is_rejected() {
        let result = RuleSettings::from_toml_str("[format]\nquestion_text_pattern = \"(\"");
        assert!(matches!(result, Err(SettingsError::InvalidPattern { .. })));
    }

    #[test]
    fn inverted_column_bounds_are_rejected() {
        let result = RuleSettings::from_toml_str(
            "[format]\noption_min_columns = 7\noption_max_columns = 6",
        );
        assert!(matches!(
            result,
            Err(SettingsError::InvalidValue {
                field: "format.option_min_columns",
                ..
            })
        ));
    }

    #[test]
    fn unsatisfiable_answer_counts_are_rejected() {
        let result = RuleSettings::from_toml_str("expected_answers = 2");
        assert!(matches!(
            result,
            Err(SettingsError::InvalidValue {
                field: "expected_answers",
                ..
            })
        ));
        assert!(RuleSettings::from_toml_str("expected_answers = 3").is_ok());
    }

    #[test]
    fn placeholder_detection() {
        let format = FormatSettings::default();
        assert!(format.has_placeholder("<<answer here>>"));
        assert!(format.has_placeholder("TODO"));
        assert!(!format.has_placeholder("Paris"));
    }
}
