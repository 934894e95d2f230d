//! Command-line argument parsing for leibniz-pi
//!
//! Provides clap-based CLI with subcommands and verbosity control.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// leibniz-pi - Estimate pi with the Leibniz series
#[derive(Parser, Debug)]
#[command(name = "leibniz-pi")]
#[command(version)]
#[command(about = "Estimate pi with the Leibniz series and watch it converge", long_about = None)]
pub struct Args {
    /// Number of series terms to sum (config file value, or 20)
    #[arg(short = 'n', long, value_name = "N", allow_negative_numbers = true)]
    pub iterations: Option<i64>,

    /// Output format for the run
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Verbosity level: -q (quiet), default (normal), -v (verbose)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (print only the final estimate)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Display current configuration
    Config,

    /// Number of terms guaranteed to reach a tolerance
    Bound {
        /// Maximum acceptable absolute error
        #[arg(short, long)]
        tolerance: f64,
    },
}

/// How a run is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable diagnostic stream
    Text,
    /// JSON convergence report
    Json,
}

impl OutputFormat {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = crate::errors::EstimatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(crate::errors::EstimatorError::InvalidFormat(other.to_string())),
        }
    }
}

/// Verbosity level enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
}

impl Args {
    /// Get verbosity level based on flags
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                _ => Verbosity::Verbose,
            }
        }
    }

    /// Check that the flags make sense together
    pub fn validate(&self) -> Result<(), String> {
        if self.command.is_some() && self.iterations.is_some() {
            return Err("Cannot specify --iterations with a subcommand.".to_string());
        }

        Ok(())
    }
}

impl Verbosity {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "quiet",
            Verbosity::Normal => "normal",
            Verbosity::Verbose => "verbose",
        }
    }

    /// Check if the per-iteration stream is shown
    pub fn show_diagnostics(&self) -> bool {
        !matches!(self, Verbosity::Quiet)
    }

    /// Check if the convergence analysis block is shown
    pub fn show_analysis(&self) -> bool {
        matches!(self, Verbosity::Verbose)
    }
}
