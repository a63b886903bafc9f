use crate::cli::OutputFormat;
use anyhow::{Context, Result};
use claimcheck_checker::{ClaimChecker, DisplayState, render::View};
use std::io::Read;
use std::process::ExitCode;

/// Claim words joined by spaces, or all of stdin when none were given.
pub fn claim_text(words: &[String]) -> Result<String> {
    if !words.is_empty() {
        return Ok(words.join(" "));
    }
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("reading claim from stdin")?;
    Ok(buf)
}

/// Submit once and wait for the display region to settle.
pub async fn check_once(checker: &ClaimChecker, input: &str) -> DisplayState {
    if let Some(request) = checker.submit(input) {
        if let Err(e) = request.await {
            tracing::error!(error = %e, "check.request_task_failed");
        }
    }
    checker.snapshot().state
}

pub fn print(state: &DisplayState, output: OutputFormat) -> Result<ExitCode> {
    let view = View::from(state);
    match output {
        OutputFormat::Text => print!("{view}"),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&view)?),
    }
    Ok(exit_code(state))
}

fn exit_code(state: &DisplayState) -> ExitCode {
    match state {
        DisplayState::Verdict { .. } => ExitCode::SUCCESS,
        DisplayState::Prompt | DisplayState::Idle => ExitCode::from(2),
        DisplayState::Failed { .. } | DisplayState::Checking { .. } => ExitCode::FAILURE,
    }
}
