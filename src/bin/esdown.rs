#![allow(clippy::print_stderr)]

use anyhow::{Context, Result};
use clap::Parser;
use std::io::IsTerminal;
use std::process::ExitCode;

use esdown::cli::args::CliArgs;
use esdown::cli::driver;
use esdown::cli::reporter::Reporter;

fn main() -> Result<ExitCode> {
    // Only active when ESDOWN_LOG or RUST_LOG is set; see src/tracing_config.rs.
    esdown::tracing_config::init_tracing();

    let args = CliArgs::parse();
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;

    let result = driver::run(&args, &cwd)?;

    let color = args
        .pretty
        .unwrap_or_else(|| std::io::stderr().is_terminal());
    colored::control::set_override(color);
    let reporter = Reporter::new(color);
    for outcome in &result.outcomes {
        if outcome.diagnostics.is_empty() {
            continue;
        }
        eprintln!(
            "{}",
            reporter.render(&outcome.diagnostics, outcome.line_map.as_ref())
        );
    }
    if result.has_errors() {
        eprintln!(
            "{}",
            reporter.summary(result.succeeded_count(), result.failed_count())
        );
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
