//! Rendering of check results and the rule listing.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use mcq_model::{Category, Diagnostic, RuleId, Status};
use serde::Serialize;

use crate::check::{CheckResult, ValidationMode};

/// Render a check result for the terminal.
///
/// With `styled` false the table is forced to plain text, which keeps output
/// stable when piped or compared in tests.
pub fn render_text(result: &CheckResult, styled: bool) -> String {
    let verdict = &result.verdict;
    let mut out = format!(
        "Question: {}\nMode: {}\nVerdict: {}\n",
        result.source,
        mode_label(result.mode),
        verdict.status
    );
    if verdict.diagnostics.is_empty() {
        return out;
    }

    let mut table = Table::new();
    if !styled {
        table.force_no_tty();
    }
    table.set_header(vec![
        header_cell("Code"),
        header_cell("Category"),
        header_cell("Line"),
        header_cell("Message"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for diagnostic in &verdict.diagnostics {
        table.add_row(vec![
            code_cell(diagnostic),
            Cell::new(diagnostic.rule.category().label()),
            line_cell(diagnostic.line),
            Cell::new(&diagnostic.message),
        ]);
    }
    out.push_str(&format!("\n{table}\n"));
    out
}

/// Render the rule listing shown by `mcq rules`.
pub fn render_rules(styled: bool) -> String {
    let mut table = Table::new();
    if !styled {
        table.force_no_tty();
    }
    table.set_header(vec![
        header_cell("Code"),
        header_cell("Category"),
        header_cell("Default"),
        header_cell("Description"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    for rule in RuleId::ALL {
        let in_default = rule.category() == Category::Rule;
        table.add_row(vec![
            Cell::new(rule.code()).add_attribute(Attribute::Bold),
            Cell::new(rule.category().label()),
            Cell::new(if in_default { "yes" } else { "strict" }),
            Cell::new(rule.description()),
        ]);
    }
    table.to_string()
}

#[derive(Serialize)]
struct JsonReport<'a> {
    source: &'a str,
    mode: ValidationMode,
    status: Status,
    diagnostics: Vec<JsonDiagnostic<'a>>,
}

#[derive(Serialize)]
struct JsonDiagnostic<'a> {
    code: &'static str,
    rule: RuleId,
    #[serde(skip_serializing_if = "Option::is_none")]
    line: Option<usize>,
    message: &'a str,
}

/// Render a check result as pretty-printed JSON.
pub fn render_json(result: &CheckResult) -> serde_json::Result<String> {
    let report = JsonReport {
        source: &result.source,
        mode: result.mode,
        status: result.verdict.status,
        diagnostics: result
            .verdict
            .diagnostics
            .iter()
            .map(|diagnostic| JsonDiagnostic {
                code: diagnostic.rule.code(),
                rule: diagnostic.rule,
                line: diagnostic.line,
                message: &diagnostic.message,
            })
            .collect(),
    };
    serde_json::to_string_pretty(&report)
}

fn mode_label(mode: ValidationMode) -> &'static str {
    match mode {
        ValidationMode::Default => "default",
        ValidationMode::Strict => "strict",
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn code_cell(diagnostic: &Diagnostic) -> Cell {
    let color = match diagnostic.rule.category() {
        Category::Rule => Color::Red,
        Category::Format => Color::Yellow,
    };
    Cell::new(diagnostic.rule.code()).fg(color)
}

fn line_cell(line: Option<usize>) -> Cell {
    match line {
        Some(line) => Cell::new(line),
        None => Cell::new("-").fg(Color::DarkGrey),
    }
}
