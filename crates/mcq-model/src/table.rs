#![deny(unsafe_code)]

use serde::{Deserialize, Serialize};

/// Result of reading one cell of a row.
///
/// Rows carry no fixed schema, so every column access has to account for
/// rows that stop before the requested column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field<'a> {
    /// The row is shorter than the requested column.
    Missing,
    /// The cell exists (it may still be an empty string).
    Present(&'a str),
}

impl<'a> Field<'a> {
    pub fn as_str(self) -> Option<&'a str> {
        match self {
            Field::Missing => None,
            Field::Present(value) => Some(value),
        }
    }

    /// Cell text, with missing cells read as the empty string.
    pub fn text(self) -> &'a str {
        self.as_str().unwrap_or("")
    }

    /// True when the cell is missing or contains only whitespace.
    pub fn is_blank(self) -> bool {
        self.text().trim().is_empty()
    }

    pub fn numeric(self) -> NumericField<'a> {
        match self {
            Field::Missing => NumericField::Missing,
            Field::Present(value) => match value.trim().parse::<f64>() {
                Ok(number) if number.is_finite() => NumericField::Number(number),
                _ => NumericField::NotNumeric(value),
            },
        }
    }
}

/// Result of reading a cell that a rule expects to hold a number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericField<'a> {
    Number(f64),
    Missing,
    NotNumeric(&'a str),
}

impl NumericField<'_> {
    pub fn value(self) -> Option<f64> {
        match self {
            NumericField::Number(number) => Some(number),
            NumericField::Missing | NumericField::NotNumeric(_) => None,
        }
    }

    /// Numeric equality; missing and non-numeric cells never match.
    pub fn equals(self, target: f64) -> bool {
        self.value().is_some_and(|number| number == target)
    }

    pub fn exceeds(self, threshold: f64) -> bool {
        self.value().is_some_and(|number| number > threshold)
    }
}

/// One record of a question file: an ordered list of string fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    fields: Vec<String>,
    #[serde(skip)]
    line: Option<usize>,
}

impl Row {
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields, line: None }
    }

    /// Attach the one-based line the record starts on in its source file.
    #[must_use]
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Source line of the record, if the row was read from a file.
    pub fn line(&self) -> Option<usize> {
        self.line
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field(&self, index: usize) -> Field<'_> {
        self.fields
            .get(index)
            .map_or(Field::Missing, |value| Field::Present(value.as_str()))
    }

    /// Row-type tag (the first field).
    pub fn tag(&self) -> Field<'_> {
        self.field(0)
    }

    /// Exact, case-sensitive tag comparison.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tag().as_str() == Some(tag)
    }

    /// Number of fields up to and including the last non-empty one.
    ///
    /// Spreadsheet exports pad rows with trailing commas, so column-count
    /// rules look at this rather than [`Row::len`].
    pub fn significant_len(&self) -> usize {
        self.fields
            .iter()
            .rposition(|value| !value.trim().is_empty())
            .map_or(0, |last| last + 1)
    }
}

impl<S: Into<String>> FromIterator<S> for Row {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

/// A fully loaded question file.
///
/// Row 0 is the header row; its second field is the question-type code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionTable {
    rows: Vec<Row>,
}

impl QuestionTable {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// Build a table from string literals, mostly for tests and fixtures.
    pub fn from_records<R, S>(records: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        records.into_iter().map(Row::from_iter).collect()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub fn header(&self) -> Option<&Row> {
        self.row(0)
    }

    /// Question-type code from the header row (`table[0][1]`).
    pub fn question_type(&self) -> Field<'_> {
        self.header().map_or(Field::Missing, |row| row.field(1))
    }

    /// Line to report for the row at `index`: its source line when known,
    /// otherwise its one-based position in the table.
    pub fn line_of(&self, index: usize) -> usize {
        self.row(index).and_then(Row::line).unwrap_or(index + 1)
    }

    /// Rows carrying `tag`, paired with their zero-based row index.
    pub fn tagged<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = (usize, &'a Row)> + 'a {
        self.rows
            .iter()
            .enumerate()
            .filter(move |(_, row)| row.has_tag(tag))
    }
}

impl FromIterator<Row> for QuestionTable {
    fn from_iter<I: IntoIterator<Item = Row>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a QuestionTable {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
