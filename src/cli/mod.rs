//! CLI module
//!
//! ## Commands
//!
//! - `fetch <url>` - Fetch a problem's example test cases and store them
//! - `gen <solution>` - Generate the C++ test harness for a solution file
//! - `run <solution>` - Generate, compile and run the harness
//!
//! ## Design
//!
//! Argument parsing is clap derive. Commands return `CliResult<T>` and never
//! exit themselves; the top-level `run()` prints errors and sets the exit
//! status.

// No panics in command paths
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// A command failure carrying the message to print and the code to exit with.
///
/// Command functions build these instead of printing or exiting themselves;
/// the top-level `run()` does both.
#[derive(Debug)]
pub struct CliError {
    /// Message shown to the user, already formatted
    pub message: String,
    /// Shell exit code
    pub exit_code: ExitCode,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Generic failure, exit code 1.
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Competitive-programming helper
#[derive(Parser, Debug)]
#[command(name = "cph")]
#[command(version = VERSION)]
#[command(about = "Fetch example test cases and generate C++ test harnesses", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch example test cases for a problem and store them as fixtures
    Fetch {
        /// Problem URL (must contain a problems/<slug>/ segment)
        #[arg(value_name = "URL")]
        url: String,
        /// Directory to store fixtures (default: testCases/<slug>)
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,
    },

    /// Generate the C++ test harness for a solution file
    Gen {
        /// Solution source file
        #[arg(value_name = "SOLUTION")]
        solution: PathBuf,
        /// Fixture directory (default: testCases beside the solution)
        #[arg(long = "testcases", value_name = "DIR")]
        testcases: Option<PathBuf>,
        /// Output path (default: main.cpp beside the solution)
        #[arg(short = 'o', long = "out", value_name = "FILE", conflicts_with = "to_stdout")]
        out: Option<PathBuf>,
        /// Print the harness to stdout instead of writing a file
        #[arg(long = "stdout")]
        to_stdout: bool,
    },

    /// Generate, compile and run the harness against stored fixtures
    Run {
        /// Solution source file
        #[arg(value_name = "SOLUTION")]
        solution: PathBuf,
        /// Fixture directory (default: testCases beside the solution)
        #[arg(long = "testcases", value_name = "DIR")]
        testcases: Option<PathBuf>,
    },
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Parse arguments, dispatch, print any error, exit.
///
/// The sole `process::exit` site in the crate.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Command::Fetch { url, dir } => commands::fetch(&url, dir),
        Command::Gen {
            solution,
            testcases,
            out,
            to_stdout,
        } => commands::generate(&solution, testcases, out, to_stdout),
        Command::Run {
            solution,
            testcases,
        } => commands::run_harness(&solution, testcases),
    }
}

// ============================================================================
// Tests
// ============================================================================
