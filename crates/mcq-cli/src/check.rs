//! Load-then-validate for a single question file.

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use mcq_ingest::{load_question, read_question};
use mcq_model::{RuleSettings, ValidationVerdict};
use mcq_validate::RuleEngine;
use serde::Serialize;
use tracing::{info, info_span};

/// Path argument that reads the question from stdin.
pub const STDIN_PATH: &str = "-";

/// Which rule battery to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// The five content rules plus malformed option rows.
    #[default]
    Default,
    /// Everything in `Default` plus every formatting check.
    Strict,
}

#[derive(Debug, Clone)]
pub struct CheckRequest {
    pub input: PathBuf,
    pub mode: ValidationMode,
    /// Optional TOML rule settings.
    pub settings: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct CheckResult {
    /// Display name of the checked input.
    pub source: String,
    pub mode: ValidationMode,
    pub verdict: ValidationVerdict,
}

impl CheckResult {
    pub fn is_ok(&self) -> bool {
        self.verdict.is_ok()
    }
}

/// Build a rule engine from an optional settings file.
pub fn load_engine(settings: Option<&Path>) -> Result<RuleEngine> {
    let settings = match settings {
        Some(path) => RuleSettings::load(path)
            .with_context(|| format!("load rule settings: {}", path.display()))?,
        None => RuleSettings::default(),
    };
    RuleEngine::new(settings).context("check rule settings")
}

/// Load the requested question and validate it.
///
/// Errors cover unreadable input and bad settings only; rule violations are
/// reported in the returned verdict.
pub fn run_check(request: &CheckRequest) -> Result<CheckResult> {
    run_check_with_stdin(request, io::stdin().lock())
}

/// Like [`run_check`], reading `-` input from `stdin`.
pub fn run_check_with_stdin<R: Read>(request: &CheckRequest, stdin: R) -> Result<CheckResult> {
    let source = request.input.display().to_string();
    let span = info_span!("check", source = %source);
    let _guard = span.enter();

    let engine = load_engine(request.settings.as_deref())?;
    let table = if request.input.as_os_str() == STDIN_PATH {
        read_question(stdin).context("read question from stdin")?
    } else {
        load_question(&request.input).with_context(|| format!("load question: {source}"))?
    };

    let verdict = match request.mode {
        ValidationMode::Default => engine.validate(&table),
        ValidationMode::Strict => engine.validate_strict(&table),
    };
    info!(
        status = %verdict.status,
        violations = verdict.diagnostics.len(),
        "question checked"
    );

    Ok(CheckResult {
        source,
        mode: request.mode,
        verdict,
    })
}
