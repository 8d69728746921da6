//! Data model for multiple-choice question checking.
//!
//! A question file is loaded into a [`QuestionTable`] of untyped [`Row`]s.
//! Rules read cells through [`Field`] and [`NumericField`] so short rows and
//! non-numeric cells are explicit values instead of panics.

pub mod error;
pub mod rule;
pub mod settings;
pub mod table;
pub mod verdict;

pub use error::{Result, SettingsError};
pub use rule::{Category, RuleId};
pub use settings::{FormatSettings, RowTags, RuleSettings};
pub use table::{Field, NumericField, QuestionTable, Row};
pub use verdict::{Diagnostic, Status, ValidationVerdict};
