use std::io::{self, IsTerminal};

use anyhow::Result;
use mcq_cli::check::{CheckRequest, ValidationMode, run_check};
use mcq_cli::report::{render_json, render_rules, render_text};
use mcq_cli::{EXIT_NOT_OK, EXIT_OK};

use crate::cli::{CheckArgs, OutputFormatArg};

/// Run `mcq check` and return the exit code for the verdict.
pub fn run_check_command(args: &CheckArgs) -> Result<i32> {
    let request = CheckRequest {
        input: args.file.clone(),
        mode: if args.strict {
            ValidationMode::Strict
        } else {
            ValidationMode::Default
        },
        settings: args.config.clone(),
    };
    let result = run_check(&request)?;
    match args.output {
        OutputFormatArg::Text => print!("{}", render_text(&result, io::stdout().is_terminal())),
        OutputFormatArg::Json => println!("{}", render_json(&result)?),
    }
    Ok(if result.is_ok() { EXIT_OK } else { EXIT_NOT_OK })
}

pub fn run_rules() {
    println!("{}", render_rules(io::stdout().is_terminal()));
}
