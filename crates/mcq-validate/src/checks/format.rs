//! Formatting checks for the question import layout.
//!
//! These do not take part in the default verdict. Callers wanting finer
//! diagnostics run them through [`RuleEngine::validate_strict`] or call them
//! one by one.
//!
//! Row layouts:
//!
//! | Row | Columns |
//! |---|---|
//! | header | `NewQuestion, type code` |
//! | title | `Title, text` |
//! | question | `QuestionText, text, text format` |
//! | option | `Option, points, text, text format, feedback, feedback format` |
//! | feedback | `Feedback, text, text format` |
//!
//! [`RuleEngine::validate_strict`]: crate::RuleEngine::validate_strict

use mcq_model::{QuestionTable, Row, RuleSettings};
use regex::Regex;

pub const TEXT_COLUMN: usize = 1;
pub const OPTION_TEXT_COLUMN: usize = 2;
pub const OPTION_FORMAT_COLUMN: usize = 3;
pub const OPTION_FEEDBACK_COLUMN: usize = 4;
pub const OPTION_FEEDBACK_FORMAT_COLUMN: usize = 5;
pub const TEXT_FORMAT_COLUMN: usize = 2;

fn rows_with<'a>(
    table: &'a QuestionTable,
    tag: &'a str,
) -> impl Iterator<Item = &'a Row> + 'a {
    table.tagged(tag).map(|(_, row)| row)
}

/// The single row carrying `tag`, if there is exactly one.
fn single_row<'a>(table: &'a QuestionTable, tag: &'a str) -> Option<&'a Row> {
    let mut rows = rows_with(table, tag);
    match (rows.next(), rows.next()) {
        (Some(row), None) => Some(row),
        _ => None,
    }
}

/// Header row is tagged `NewQuestion` and names a question type.
pub fn good_type(table: &QuestionTable, settings: &RuleSettings) -> bool {
    table
        .header()
        .is_some_and(|row| row.has_tag(&settings.tags.header) && !row.field(1).is_blank())
}

/// Exactly one title row, with filled-in text.
pub fn good_title(table: &QuestionTable, settings: &RuleSettings) -> bool {
    single_row(table, &settings.tags.title).is_some_and(|row| {
        let text = row.field(TEXT_COLUMN);
        !text.is_blank() && !settings.format.has_placeholder(text.text())
    })
}

/// Every option row has between the configured minimum and maximum of
/// significant columns.
pub fn good_option_cols(table: &QuestionTable, settings: &RuleSettings) -> bool {
    let format = &settings.format;
    rows_with(table, &settings.tags.option).all(|row| {
        (format.option_min_columns..=format.option_max_columns).contains(&row.significant_len())
    })
}

/// No option text or option feedback still holds a template placeholder.
pub fn good_option_placeholders(table: &QuestionTable, settings: &RuleSettings) -> bool {
    rows_with(table, &settings.tags.option).all(|row| {
        [OPTION_TEXT_COLUMN, OPTION_FEEDBACK_COLUMN]
            .into_iter()
            .all(|column| !settings.format.has_placeholder(row.field(column).text()))
    })
}

/// Rows that look like option rows are tagged exactly as option rows.
///
/// Catches `option`, `OPTION` and `Options`, which the counting rules would
/// silently skip.
pub fn good_option_tag(table: &QuestionTable, settings: &RuleSettings) -> bool {
    let expected = settings.tags.option.as_str();
    let folded = fold_tag(expected);
    table.iter().all(|row| {
        let tag = row.tag().text();
        !fold_tag(tag).starts_with(&folded) || tag == expected
    })
}

fn fold_tag(tag: &str) -> String {
    tag.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Exactly one question row, with a tag, text and at most a format column.
pub fn good_question_cols(table: &QuestionTable, settings: &RuleSettings) -> bool {
    single_row(table, &settings.tags.question).is_some_and(|row| {
        (2..=settings.format.question_max_columns).contains(&row.significant_len())
    })
}

/// Question text is filled in, free of placeholders and, when a pattern is
/// configured, matches it.
pub fn good_question_text(
    table: &QuestionTable,
    settings: &RuleSettings,
    pattern: Option<&Regex>,
) -> bool {
    let Some(row) = rows_with(table, &settings.tags.question).next() else {
        return false;
    };
    let text = row.field(TEXT_COLUMN);
    if text.is_blank() || settings.format.has_placeholder(text.text()) {
        return false;
    }
    pattern.is_none_or(|pattern| pattern.is_match(text.text().trim()))
}

/// Every text-format cell is empty or an allowed format marker.
pub fn good_feedback_format(table: &QuestionTable, settings: &RuleSettings) -> bool {
    let format = &settings.format;
    let options_ok = rows_with(table, &settings.tags.option).all(|row| {
        [OPTION_FORMAT_COLUMN, OPTION_FEEDBACK_FORMAT_COLUMN]
            .into_iter()
            .all(|column| format.is_allowed_format(row.field(column).text()))
    });
    let feedback_ok = rows_with(table, &settings.tags.feedback)
        .all(|row| format.is_allowed_format(row.field(TEXT_FORMAT_COLUMN).text()));
    options_ok && feedback_ok
}

/// No feedback row and no option feedback holds a template placeholder.
pub fn good_feedback_text(table: &QuestionTable, settings: &RuleSettings) -> bool {
    let format = &settings.format;
    let feedback_ok = rows_with(table, &settings.tags.feedback)
        .all(|row| !format.has_placeholder(row.field(TEXT_COLUMN).text()));
    let options_ok = rows_with(table, &settings.tags.option)
        .all(|row| !format.has_placeholder(row.field(OPTION_FEEDBACK_COLUMN).text()));
    feedback_ok && options_ok
}

/// Every feedback row has non-empty text. Holds vacuously without feedback rows.
pub fn non_empty_feedback(table: &QuestionTable, settings: &RuleSettings) -> bool {
    rows_with(table, &settings.tags.feedback).all(|row| !row.field(TEXT_COLUMN).is_blank())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn well_formed() -> QuestionTable {
        QuestionTable::from_records([
            vec!["NewQuestion", "MC", "HTML"],
            vec!["ID", "GEO-001"],
            vec!["Title", "Capitals"],
            vec!["QuestionText", "What is the capital of France?", "HTML"],
            vec!["Points", "1"],
            vec!["Option", "100", "Paris", "HTML", "Correct", "HTML"],
            vec!["Option", "0", "Rome", "", "", ""],
            vec!["Option", "0", "Madrid"],
            vec!["Option", "25", "Lyon", "HTML", "Same country"],
            vec!["Feedback", "Paris has been the capital since 987.", "HTML"],
        ])
    }

    fn with_row(index: usize, record: &[&str]) -> QuestionTable {
        let mut rows = well_formed().rows().to_vec();
        rows[index] = record.iter().copied().collect();
        QuestionTable::new(rows)
    }

    #[test]
    fn test_well_formed_passes_every_check() {
        let settings = RuleSettings::default();
        let table = well_formed();
        assert!(good_type(&table, &settings));
        assert!(good_title(&table, &settings));
        assert!(good_option_cols(&table, &settings));
        assert!(good_option_placeholders(&table, &settings));
        assert!(good_option_tag(&table, &settings));
        assert!(good_question_cols(&table, &settings));
        assert!(good_question_text(&table, &settings, None));
        assert!(good_feedback_format(&table, &settings));
        assert!(good_feedback_text(&table, &settings));
        assert!(non_empty_feedback(&table, &settings));
    }

    #[test]
    fn test_good_type() {
        let settings = RuleSettings::default();
        assert!(!good_type(&with_row(0, &["Question", "MC"]), &settings));
        assert!(!good_type(&with_row(0, &["NewQuestion"]), &settings));
        assert!(!good_type(&QuestionTable::default(), &settings));
    }

    #[test]
    fn test_good_title() {
        let settings = RuleSettings::default();
        assert!(!good_title(&with_row(2, &["Title", ""]), &settings));
        assert!(!good_title(&with_row(2, &["Title", "TODO title"]), &settings));
        assert!(!good_title(&with_row(1, &["Title", "Second title"]), &settings));
    }

    #[test]
    fn test_good_option_cols() {
        let settings = RuleSettings::default();
        assert!(!good_option_cols(&with_row(7, &["Option", "0"]), &settings));
        assert!(!good_option_cols(
            &with_row(7, &["Option", "0", "a", "", "", "", "extra"]),
            &settings
        ));
        // Trailing padding does not count.
        assert!(good_option_cols(
            &with_row(7, &["Option", "0", "a", "", "", "", "", ""]),
            &settings
        ));
    }

    #[test]
    fn test_good_option_placeholders() {
        let settings = RuleSettings::default();
        assert!(!good_option_placeholders(
            &with_row(7, &["Option", "0", "<<wrong answer>>"]),
            &settings
        ));
        assert!(!good_option_placeholders(
            &with_row(7, &["Option", "0", "Madrid", "", "TBD"]),
            &settings
        ));
    }

    #[test]
    fn test_good_option_tag() {
        let settings = RuleSettings::default();
        assert!(!good_option_tag(&with_row(7, &["option", "0", "Madrid"]), &settings));
        assert!(!good_option_tag(&with_row(7, &["Options", "0", "Madrid"]), &settings));
        assert!(!good_option_tag(&with_row(7, &["OPTION", "0", "Madrid"]), &settings));
    }

    #[test]
    fn test_good_question_cols() {
        let settings = RuleSettings::default();
        assert!(!good_question_cols(&with_row(3, &["QuestionText"]), &settings));
        assert!(!good_question_cols(
            &with_row(3, &["QuestionText", "Why?", "HTML", "extra"]),
            &settings
        ));
        assert!(!good_question_cols(
            &with_row(2, &["QuestionText", "Duplicate?"]),
            &settings
        ));
    }

    #[test]
    fn test_good_question_text() {
        let settings = RuleSettings::default();
        assert!(!good_question_text(&with_row(3, &["QuestionText", " "]), &settings, None));
        assert!(!good_question_text(
            &with_row(3, &["QuestionText", "[[question]]"]),
            &settings,
            None
        ));

        let pattern = Regex::new(r"\?$").unwrap();
        assert!(good_question_text(&well_formed(), &settings, Some(&pattern)));
        assert!(!good_question_text(
            &with_row(3, &["QuestionText", "Name the capital of France"]),
            &settings,
            Some(&pattern)
        ));
    }

    #[test]
    fn test_good_feedback_format() {
        let settings = RuleSettings::default();
        assert!(!good_feedback_format(
            &with_row(9, &["Feedback", "text", "Markdown"]),
            &settings
        ));
        assert!(!good_feedback_format(
            &with_row(7, &["Option", "0", "Madrid", "", "No", "RTF"]),
            &settings
        ));
        assert!(good_feedback_format(&with_row(9, &["Feedback", "text", "html"]), &settings));
    }

    #[test]
    fn test_good_feedback_text() {
        let settings = RuleSettings::default();
        assert!(!good_feedback_text(&with_row(9, &["Feedback", "XXX explain"]), &settings));
        assert!(!good_feedback_text(
            &with_row(7, &["Option", "0", "Madrid", "", "<<why>>"]),
            &settings
        ));
    }

    #[test]
    fn test_non_empty_feedback() {
        let settings = RuleSettings::default();
        assert!(!non_empty_feedback(&with_row(9, &["Feedback", ""]), &settings));
        assert!(!non_empty_feedback(&with_row(9, &["Feedback"]), &settings));
        assert!(non_empty_feedback(&with_row(9, &["Hint", ""]), &settings));
    }
}
