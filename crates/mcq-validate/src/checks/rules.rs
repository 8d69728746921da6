//! Content rules: question type, option counts and points distribution.

use mcq_model::{Diagnostic, NumericField, QuestionTable, Row, RuleId, RuleSettings};

use crate::count::count_matching;

/// Points awarded by a fully-correct option.
pub const FULL_POINTS: f64 = 100.0;

/// Points awarded by a fully-incorrect option.
pub const NO_POINTS: f64 = 0.0;

/// Column holding the points of an option row.
pub const POINTS_COLUMN: usize = 1;

fn is_option(row: &Row, settings: &RuleSettings) -> bool {
    row.has_tag(&settings.tags.option)
}

fn option_points(row: &Row) -> NumericField<'_> {
    row.field(POINTS_COLUMN).numeric()
}

/// Header row carries the multiple-choice type code (exact match).
pub fn is_multiple_choice(table: &QuestionTable, settings: &RuleSettings) -> bool {
    table.question_type().as_str() == Some(settings.mc_tag.as_str())
}

pub fn count_answers(table: &QuestionTable, settings: &RuleSettings) -> usize {
    count_matching(table, |row| is_option(row, settings))
}

/// Option rows whose points are numerically 100.
pub fn count_correct(table: &QuestionTable, settings: &RuleSettings) -> usize {
    count_matching(table, |row| {
        is_option(row, settings) && option_points(row).equals(FULL_POINTS)
    })
}

/// Option rows whose points are numerically 0.
pub fn count_incorrect(table: &QuestionTable, settings: &RuleSettings) -> usize {
    count_matching(table, |row| {
        is_option(row, settings) && option_points(row).equals(NO_POINTS)
    })
}

/// Option rows awarding strictly more than the points threshold.
pub fn count_high_value(table: &QuestionTable, settings: &RuleSettings) -> usize {
    let threshold = f64::from(settings.points_threshold);
    count_matching(table, |row| {
        is_option(row, settings) && option_points(row).exceeds(threshold)
    })
}

pub fn validate_answer_points(table: &QuestionTable, settings: &RuleSettings) -> bool {
    count_high_value(table, settings) <= settings.max_high_value
}

/// One diagnostic per option row whose points are missing, non-numeric or
/// outside 0..=100, located by source line.
///
/// Such rows are ignored by the counting rules above, so without this check
/// a typo in a points cell would only show up as a wrong count.
pub fn malformed_options(table: &QuestionTable, settings: &RuleSettings) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for (index, row) in table.tagged(&settings.tags.option) {
        let message = match option_points(row) {
            NumericField::Number(points) if (NO_POINTS..=FULL_POINTS).contains(&points) => continue,
            NumericField::Number(points) => {
                format!("option points {points} are outside 0 to 100")
            }
            NumericField::Missing => "option row has no points column".to_string(),
            NumericField::NotNumeric(value) if value.trim().is_empty() => {
                "option points are empty".to_string()
            }
            NumericField::NotNumeric(value) => {
                format!("option points \"{value}\" are not numeric")
            }
        };
        let line = table.line_of(index);
        tracing::warn!(line, %message, "malformed option row");
        diagnostics.push(Diagnostic::new(RuleId::MalformedOption, message).at_line(line));
    }

    diagnostics
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(points: &[&str]) -> QuestionTable {
        let mut records = vec![vec!["NewQuestion".to_string(), "MC".to_string()]];
        for value in points {
            records.push(vec!["Option".to_string(), (*value).to_string(), "text".to_string()]);
        }
        QuestionTable::from_records(records)
    }

    #[test]
    fn test_counts_compare_numerically() {
        let settings = RuleSettings::default();
        let table = table(&["100.0", "0", "0.00", " 30 "]);

        assert_eq!(count_answers(&table, &settings), 4);
        assert_eq!(count_correct(&table, &settings), 1);
        assert_eq!(count_incorrect(&table, &settings), 2);
        assert_eq!(count_high_value(&table, &settings), 1);
    }

    #[test]
    fn test_threshold_is_strict() {
        let settings = RuleSettings::default();
        let table = table(&["100", "50", "50", "50"]);
        assert_eq!(count_high_value(&table, &settings), 1);
        assert!(validate_answer_points(&table, &settings));
    }

    #[test]
    fn test_option_tag_is_case_sensitive() {
        let settings = RuleSettings::default();
        let table = QuestionTable::from_records([
            vec!["NewQuestion", "MC"],
            vec!["option", "100", "a"],
            vec!["Option", "100", "b"],
        ]);
        assert_eq!(count_answers(&table, &settings), 1);
    }

    #[test]
    fn test_malformed_options_are_reported_per_row() {
        let settings = RuleSettings::default();
        let table = table(&["100", "abc", "", "150"]);

        let diagnostics = malformed_options(&table, &settings);

        assert_eq!(diagnostics.len(), 3);
        assert_eq!(diagnostics[0].line, Some(3));
        assert_eq!(diagnostics[0].message, "option points \"abc\" are not numeric");
        assert_eq!(diagnostics[1].message, "option points are empty");
        assert_eq!(diagnostics[2].message, "option points 150 are outside 0 to 100");
        assert!(diagnostics.iter().all(|d| d.rule == RuleId::MalformedOption));
    }

    #[test]
    fn test_short_option_row_is_malformed_not_a_panic() {
        let settings = RuleSettings::default();
        let table = QuestionTable::from_records([vec!["NewQuestion", "MC"], vec!["Option"]]);

        assert_eq!(count_correct(&table, &settings), 0);
        let diagnostics = malformed_options(&table, &settings);
        assert_eq!(diagnostics[0].message, "option row has no points column");
    }

    #[test]
    fn test_multiple_choice_requires_exact_tag() {
        let settings = RuleSettings::default();
        let lower = QuestionTable::from_records([["NewQuestion", "mc"]]);
        assert!(!is_multiple_choice(&lower, &settings));
        assert!(!is_multiple_choice(&QuestionTable::default(), &settings));
        assert!(is_multiple_choice(&table(&[]), &settings));
    }
}
