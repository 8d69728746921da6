//! Validation of multiple-choice question tables.
//!
//! The free functions in this crate use [`RuleSettings::default`]; build a
//! [`RuleEngine`] to validate with other thresholds or tags.
//!
//! ```ignore
//! use mcq_validate::{count_answers, validate};
//!
//! let verdict = validate(&table);
//! if !verdict.is_ok() {
//!     for diagnostic in &verdict.diagnostics {
//!         eprintln!("{diagnostic}");
//!     }
//! }
//! ```

pub mod checks;
mod count;
mod engine;

use std::sync::OnceLock;

use mcq_model::{QuestionTable, ValidationVerdict};

pub use count::count_matching;
pub use engine::{CONTENT_RULES, FORMAT_RULES, RuleEngine};
pub use mcq_model::RuleSettings;

fn default_engine() -> &'static RuleEngine {
    static ENGINE: OnceLock<RuleEngine> = OnceLock::new();
    ENGINE.get_or_init(RuleEngine::default)
}

fn default_settings() -> &'static RuleSettings {
    default_engine().settings()
}

/// Validate with the default settings: the five content rules plus
/// malformed option rows.
pub fn validate(table: &QuestionTable) -> ValidationVerdict {
    default_engine().validate(table)
}

/// Validate with the default settings, including every formatting check.
pub fn validate_strict(table: &QuestionTable) -> ValidationVerdict {
    default_engine().validate_strict(table)
}

pub fn is_multiple_choice(table: &QuestionTable) -> bool {
    checks::rules::is_multiple_choice(table, default_settings())
}

pub fn count_answers(table: &QuestionTable) -> usize {
    checks::rules::count_answers(table, default_settings())
}

pub fn count_correct(table: &QuestionTable) -> usize {
    checks::rules::count_correct(table, default_settings())
}

pub fn count_incorrect(table: &QuestionTable) -> usize {
    checks::rules::count_incorrect(table, default_settings())
}

pub fn validate_answer_points(table: &QuestionTable) -> bool {
    checks::rules::validate_answer_points(table, default_settings())
}

pub fn non_empty_feedback(table: &QuestionTable) -> bool {
    checks::format::non_empty_feedback(table, default_settings())
}

pub fn good_type(table: &QuestionTable) -> bool {
    checks::format::good_type(table, default_settings())
}

pub fn good_title(table: &QuestionTable) -> bool {
    checks::format::good_title(table, default_settings())
}

pub fn good_option_cols(table: &QuestionTable) -> bool {
    checks::format::good_option_cols(table, default_settings())
}

pub fn good_option_placeholders(table: &QuestionTable) -> bool {
    checks::format::good_option_placeholders(table, default_settings())
}

pub fn good_option_tag(table: &QuestionTable) -> bool {
    checks::format::good_option_tag(table, default_settings())
}

pub fn good_question_cols(table: &QuestionTable) -> bool {
    checks::format::good_question_cols(table, default_settings())
}

pub fn good_question_text(table: &QuestionTable) -> bool {
    checks::format::good_question_text(table, default_settings(), None)
}

pub fn good_feedback_format(table: &QuestionTable) -> bool {
    checks::format::good_feedback_format(table, default_settings())
}

pub fn good_feedback_text(table: &QuestionTable) -> bool {
    checks::format::good_feedback_text(table, default_settings())
}
