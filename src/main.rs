//! pydiff: CLI entry point.
//!
//! Compares a validation data file with a test data file.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use colored::Colorize;

use pydiff::compare::{report, ComparisonResult, Report};
use pydiff::table::{load_table, ShapeDisplay};

#[derive(Parser)]
#[command(name = "pydiff")]
#[command(about = "Compare two numeric data files within a relative and absolute tolerance")]
#[command(version)]
struct Cli {
    /// Path to validation data file.
    valid_file: PathBuf,

    /// Path to test data file.
    test_file: PathBuf,

    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Print shapes and the worst element after the verdict.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Exit code 2 is the marginal mismatch verdict, so argument errors
    // exit 1 instead of clap's default 2.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.exit_code() == 0 {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            };
        }
    };

    match run(&cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("{} {e:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<u8> {
    let valid = load_table(&cli.valid_file).context("Failed to load validation data")?;
    let test = load_table(&cli.test_file).context("Failed to load test data")?;

    let report = report(&valid, &test);

    match cli.format {
        Format::Text => print_text(&report, cli.verbose),
        Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(report.exit_code())
}

fn print_text(report: &Report, verbose: bool) {
    if let Some(message) = report.outcome.message() {
        let line = match report.outcome {
            ComparisonResult::MarginalMismatch => message.yellow(),
            _ => message.red(),
        };
        println!("{line}");
    } else if verbose {
        println!("{}", "Validation and test data match.".green());
    }

    if !verbose {
        return;
    }

    println!(
        "  Shapes: validation {}, test {}",
        ShapeDisplay(&report.valid_shape),
        ShapeDisplay(&report.test_shape)
    );

    if report.outcome == ComparisonResult::ShapeMismatch {
        return;
    }

    println!("  Elements: {}", report.elements);
    if let Some(diff) = report.max_abs_diff {
        println!("  Max |valid - test|: {diff:.6e}");
    }
    if let Some(ref worst) = report.worst {
        println!(
            "  Worst element {}: valid={} test={} ({:.2}x strict allowance)",
            worst.index, worst.valid, worst.test, worst.ratio
        );
    }
    println!(
        "  Tolerances: strict rtol={:e} atol={:e}, loose rtol={:e} atol={:e}",
        report.strict.rtol, report.strict.atol, report.loose.rtol, report.loose.atol
    );
}
