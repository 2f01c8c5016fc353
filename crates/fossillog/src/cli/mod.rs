//! Command-line interface for fossillog.
//!
//! This module provides the CLI structure for the `fosslog` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    CollectionCommand, ConfigCommand, OutputFormat, RecordCommand, RegionCommand, ReplayCommand,
    ViewCommand,
};

use crate::logging::Verbosity;

/// fosslog - Record fossil finds and track your collection
///
/// Finds are kept for the duration of one invocation; use `replay` to run a
/// whole session from a script.
#[derive(Debug, Parser)]
#[command(name = "fosslog")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Taxonomy JSON file (overrides the configured catalog)
    #[arg(long, global = true, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List regions
    Regions(ViewCommand),

    /// Show a region's typical fossils and which are collected
    Region(RegionCommand),

    /// List every fossil in the catalog
    Fossils(ViewCommand),

    /// Show collected and still-to-collect fossils
    Collection(CollectionCommand),

    /// Record a find
    Record(RecordCommand),

    /// Run a session script and report the results
    Replay(ReplayCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.verbose)
    }
}
