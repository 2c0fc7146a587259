//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Careboard - employee review explorer for healthcare facilities
///
/// Browse facilities, search reviews by role, and compare ratings,
/// salaries, and recommendation rates from a dataset snapshot.
///
/// Examples:
///   careboard facility --id 0
///   careboard facility --name "Saint Michael's Medical Center"
///   careboard search "Registered Nurse"
///   careboard salary CNA --format json
///   careboard facilities --city Newark
///   careboard --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the dataset snapshot (JSON)
    ///
    /// Can also be set via CAREBOARD_DATA env var or .careboard.toml config.
    #[arg(long, value_name = "FILE", env = "CAREBOARD_DATA", global = true)]
    pub data: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .careboard.toml in the current directory
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(long, default_value = "text", value_name = "FORMAT", global = true)]
    pub format: OutputFormat,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Generate a default .careboard.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// The report to run.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Show one facility with all its reviews and average ratings
    Facility {
        /// Facility id to look up (use exactly one of --id and --name)
        #[arg(long, value_name = "ID")]
        id: Option<u32>,

        /// Facility name to look up, matched exactly
        #[arg(long, value_name = "NAME")]
        name: Option<String>,
    },

    /// Search reviews by job title across all facilities
    Search {
        /// Job title pattern, case-insensitive; regex syntax allowed
        #[arg(value_name = "TITLE")]
        title: String,
    },

    /// Compare every facility side by side
    Compare,

    /// Salary statistics for a role across facilities
    Salary {
        /// Job title pattern, case-insensitive; regex syntax allowed
        #[arg(value_name = "TITLE")]
        title: String,
    },

    /// List facilities, optionally filtered by city
    Facilities {
        /// City to filter by, matched exactly
        #[arg(long, value_name = "CITY")]
        city: Option<String>,
    },
}

/// Output format for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Console text (default)
    #[default]
    Text,
    /// JSON format
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        let command = match &self.command {
            Some(command) => command,
            None => {
                return Err(
                    "No report requested; see --help for the available commands".to_string()
                )
            }
        };

        // The engine enforces this too; checking here gives a friendlier
        // message before any dataset is loaded.
        if let Command::Facility { id, name } = command {
            match (id, name) {
                (Some(_), Some(_)) => {
                    return Err("Use either --id or --name, not both".to_string());
                }
                (None, None) => {
                    return Err("Provide either --id or --name to pick a facility".to_string());
                }
                _ => {}
            }
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
