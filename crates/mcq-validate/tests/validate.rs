//! Integration tests for question validation.

use std::path::Path;

use mcq_ingest::parse_question;
use mcq_model::{QuestionTable, Row, RuleId, RuleSettings, Status};
use mcq_validate::{
    RuleEngine, count_answers, count_correct, count_incorrect, is_multiple_choice, validate,
    validate_answer_points, validate_strict,
};
use proptest::prelude::*;

fn question(kind: &str, points: &[&str]) -> QuestionTable {
    let mut rows: Vec<Row> = vec![Row::from_iter(["NewQuestion", kind])];
    for (index, value) in points.iter().enumerate() {
        let text = format!("Answer {}", index + 1);
        rows.push(Row::from_iter(["Option", *value, text.as_str()]));
    }
    QuestionTable::new(rows)
}

#[test]
fn test_scenario_a_valid_question() {
    let table = question("MC", &["100", "0", "0", "30"]);

    assert_eq!(count_answers(&table), 4);
    assert_eq!(count_correct(&table), 1);
    assert_eq!(count_incorrect(&table), 2);
    assert!(validate_answer_points(&table));

    let verdict = validate(&table);
    assert_eq!(verdict.status, Status::Ok);
    assert!(verdict.diagnostics.is_empty());
}

#[test]
fn test_scenario_b_wrong_question_type() {
    let table = question("MA", &["100", "0", "0", "30"]);

    assert!(!is_multiple_choice(&table));
    let verdict = validate(&table);
    assert_eq!(verdict.status, Status::NotOk);
    assert_eq!(verdict.rules(), [RuleId::MultipleChoice]);
    assert_eq!(
        verdict.diagnostics[0].message,
        "question type is \"MA\", expected \"MC\""
    );
}

#[test]
fn test_scenario_c_points_cap_and_answer_count() {
    let table = question("MC", &["100", "60", "55", "0", "0"]);

    assert!(!validate_answer_points(&table));
    assert_eq!(count_answers(&table), 5);

    let verdict = validate(&table);
    assert_eq!(verdict.status, Status::NotOk);
    assert_eq!(verdict.rules(), [RuleId::AnswerCount, RuleId::PointsCap]);
    assert_eq!(
        verdict.diagnostics[1].message,
        "at most 2 options may be worth more than 50 points, found 3"
    );
}

#[test]
fn test_scenario_d_three_answers() {
    let table = question("MC", &["100", "0", "0"]);

    assert_eq!(count_answers(&table), 3);
    assert!(is_multiple_choice(&table));
    assert_eq!(count_correct(&table), 1);
    assert_eq!(count_incorrect(&table), 2);
    assert!(validate_answer_points(&table));

    let verdict = validate(&table);
    assert_eq!(verdict.status, Status::NotOk);
    assert_eq!(verdict.diagnostics.len(), 1);
    assert_eq!(verdict.diagnostics[0].rule, RuleId::AnswerCount);
    assert_eq!(verdict.diagnostics[0].message, "expected 4 options, found 3");
}

#[test]
fn test_single_violation_reports_only_that_rule() {
    let engine = RuleEngine::default();
    let cases = [
        (question("MA", &["100", "0", "0", "30"]), RuleId::MultipleChoice),
        (question("MC", &["100", "0", "0"]), RuleId::AnswerCount),
        (question("MC", &["100", "100", "0", "0"]), RuleId::CorrectCount),
        (question("MC", &["100", "0", "30", "30"]), RuleId::IncorrectCount),
    ];

    for (table, violated) in cases {
        let verdict = engine.validate(&table);
        assert_eq!(verdict.rules(), [violated], "table: {table:?}");
        for rule in mcq_validate::CONTENT_RULES {
            assert_eq!(engine.passes(&table, rule), rule != violated);
        }
    }
}

#[test]
fn test_points_cap_alone_with_stricter_settings() {
    // With four options, one correct and two incorrect, at most two options
    // can exceed the threshold, so the default cap cannot fail on its own.
    let settings = RuleSettings {
        max_high_value: 1,
        ..RuleSettings::default()
    };
    let engine = RuleEngine::new(settings).unwrap();
    let table = question("MC", &["100", "0", "0", "60"]);

    let verdict = engine.validate(&table);
    assert_eq!(verdict.rules(), [RuleId::PointsCap]);
}

#[test]
fn test_validate_is_idempotent() {
    let table = question("MA", &["100", "60", "55", "x", "0"]);
    let first = validate(&table);
    let second = validate(&table);
    assert_eq!(first, second);
}

#[test]
fn test_empty_table_fails_without_panicking() {
    let verdict = validate(&QuestionTable::default());
    assert_eq!(
        verdict.rules(),
        [
            RuleId::MultipleChoice,
            RuleId::AnswerCount,
            RuleId::CorrectCount,
            RuleId::IncorrectCount,
        ]
    );
}

#[test]
fn test_malformed_points_are_diagnosed_per_row() {
    let table = question("MC", &["100", "0", "zero", "0"]);

    let verdict = validate(&table);

    assert_eq!(verdict.rules(), [RuleId::MalformedOption]);
    assert_eq!(verdict.diagnostics[0].line, Some(4));
    assert_eq!(
        verdict.diagnostics[0].to_string(),
        "[MC006] line 4: option points \"zero\" are not numeric"
    );
}

#[test]
fn test_malformed_row_reports_file_line_after_blank_lines() {
    let text = "NewQuestion,MC\n\nOption,100,A\nOption,0,B\nOption,zero,C\nOption,0,D\n";
    let table = parse_question(text.as_bytes(), Path::new("q.csv")).unwrap();

    let verdict = validate(&table);

    assert_eq!(verdict.rules(), [RuleId::MalformedOption]);
    assert_eq!(verdict.diagnostics[0].line, Some(5));
    assert_eq!(
        verdict.diagnostics[0].to_string(),
        "[MC006] line 5: option points \"zero\" are not numeric"
    );
}

#[test]
fn test_custom_tag_and_answer_count() {
    let settings = RuleSettings::default()
        .with_mc_tag("MCQ")
        .with_expected_answers(3);
    let engine = RuleEngine::new(settings).unwrap();

    assert!(engine.validate(&question("MCQ", &["100", "0", "0"])).is_ok());
    assert!(!engine.validate(&question("MC", &["100", "0", "0"])).is_ok());
}

const FULL_QUESTION: &str = "\
NewQuestion,MC,HTML,,,
ID,GEO-001,,,,
Title,Capitals,,,,
QuestionText,What is the capital of France?,HTML,,,
Points,1,,,,
Difficulty,2,,,,
Option,100,Paris,HTML,Correct.,HTML
Option,0,Rome,,That is Italy.,
Option,0,Madrid,,That is Spain.,
Option,25,Lyon,,Right country.,
Hint,It is on the Seine.,,,,
Feedback,Paris has been the capital since 987.,HTML,,,
";

#[test]
fn test_full_question_file_passes_strict_validation() {
    let table = parse_question(FULL_QUESTION.as_bytes(), Path::new("geo.csv")).unwrap();

    assert!(validate(&table).is_ok());
    let strict = validate_strict(&table);
    assert!(strict.is_ok(), "unexpected diagnostics: {:?}", strict.diagnostics);
}

#[test]
fn test_strict_validation_reports_format_issues_in_order() {
    let text = FULL_QUESTION
        .replace("Title,Capitals", "Title,TODO")
        .replace("Option,0,Madrid", "option,0,Madrid")
        .replace("Feedback,Paris has been the capital since 987.,HTML", "Feedback,,HTML");
    let table = parse_question(text.as_bytes(), Path::new("geo.csv")).unwrap();

    let default_verdict = validate(&table);
    assert_eq!(default_verdict.rules(), [RuleId::AnswerCount, RuleId::IncorrectCount]);

    let strict = validate_strict(&table);
    assert_eq!(
        strict.rules(),
        [
            RuleId::AnswerCount,
            RuleId::IncorrectCount,
            RuleId::EmptyFeedback,
            RuleId::Title,
            RuleId::OptionTag,
        ]
    );
}

#[test]
fn test_question_text_pattern_from_settings() {
    let settings = RuleSettings::default().with_question_text_pattern(r"^Which\b");
    let engine = RuleEngine::new(settings).unwrap();
    let table = parse_question(FULL_QUESTION.as_bytes(), Path::new("geo.csv")).unwrap();

    let verdict = engine.validate_strict(&table);
    assert_eq!(verdict.rules(), [RuleId::QuestionText]);
}

fn points_strategy() -> impl Strategy<Value = Vec<&'static str>> {
    prop::collection::vec(
        prop::sample::select(vec!["0", "100", "30", "60", "100.0", "abc", ""]),
        0..8,
    )
}

proptest! {
    #[test]
    fn prop_counts_are_additive(left in points_strategy(), right in points_strategy()) {
        let a = question("MC", &left);
        let b = question("MC", &right);
        let mut combined = left.clone();
        combined.extend(right.iter().copied());
        let ab = question("MC", &combined);

        prop_assert_eq!(count_answers(&ab), count_answers(&a) + count_answers(&b));
        prop_assert_eq!(count_correct(&ab), count_correct(&a) + count_correct(&b));
        prop_assert_eq!(count_incorrect(&ab), count_incorrect(&a) + count_incorrect(&b));
    }

    #[test]
    fn prop_verdict_status_matches_diagnostics(points in points_strategy()) {
        let verdict = validate(&question("MC", &points));
        prop_assert_eq!(verdict.is_ok(), verdict.diagnostics.is_empty());
    }
}
