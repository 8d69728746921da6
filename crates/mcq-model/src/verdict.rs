use std::fmt;

use serde::{Deserialize, Serialize};

use crate::rule::RuleId;

/// Overall outcome of a validation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "Not OK")]
    NotOk,
}

impl Status {
    pub fn label(&self) -> &'static str {
        match self {
            Status::Ok => "OK",
            Status::NotOk => "Not OK",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A human-readable message describing one violated rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub rule: RuleId,
    pub message: String,
    /// One-based line in the question file, for diagnostics tied to a
    /// single row.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

impl Diagnostic {
    pub fn new(rule: RuleId, message: impl Into<String>) -> Self {
        Self {
            rule,
            message: message.into(),
            line: None,
        }
    }

    #[must_use]
    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "[{}] line {}: {}", self.rule, line, self.message),
            None => write!(f, "[{}] {}", self.rule, self.message),
        }
    }
}

/// Verdict of one validation call: status plus one diagnostic per violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationVerdict {
    pub status: Status,
    pub diagnostics: Vec<Diagnostic>,
}

impl ValidationVerdict {
    /// `Ok` exactly when no diagnostics were raised.
    pub fn from_diagnostics(diagnostics: Vec<Diagnostic>) -> Self {
        let status = if diagnostics.is_empty() {
            Status::Ok
        } else {
            Status::NotOk
        };
        Self {
            status,
            diagnostics,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == Status::Ok
    }

    pub fn has_rule(&self, rule: RuleId) -> bool {
        self.diagnostics.iter().any(|d| d.rule == rule)
    }

    /// Violated rules in report order (a rule may repeat for per-row checks).
    pub fn rules(&self) -> Vec<RuleId> {
        self.diagnostics.iter().map(|d| d.rule).collect()
    }
}

impl Default for ValidationVerdict {
    fn default() -> Self {
        Self::from_diagnostics(Vec::new())
    }
}
