//! Interactive prompts for values left off the command line.

use std::io::{self, BufRead, Write};

use ewaste_core::domain::WizardStep;

use crate::error::{AppError, AppResult};

/// Prints the wizard header before asking for a step's fields.
pub fn step(step: WizardStep) {
    eprintln!("\n{}", step.heading());
}

/// Returns `value`, or reads a line from stdin after printing `label`.
pub fn or_ask(value: Option<String>, label: &str) -> AppResult<String> {
    match value {
        Some(value) => Ok(value),
        None => ask(label),
    }
}

pub fn ask(label: &str) -> AppResult<String> {
    let mut stderr = io::stderr();
    write!(stderr, "{label}: ").map_err(input_error)?;
    stderr.flush().map_err(input_error)?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line).map_err(input_error)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Yes/no question, defaulting to no.
pub fn confirm(question: &str) -> AppResult<bool> {
    let answer = ask(&format!("{question} [y/N]"))?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

fn input_error(e: io::Error) -> AppError {
    AppError::Input(format!("Cannot read input: {e}"))
}
