//! CLI command definitions.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::form::Edit;

/// Arguments shared by read-only views.
#[derive(Debug, Args)]
pub struct ViewCommand {
    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Region detail arguments.
#[derive(Debug, Args)]
pub struct RegionCommand {
    /// Region id (see `fosslog regions`)
    pub id: String,

    /// Replay this session script first so finds are reflected
    #[arg(short, long, value_name = "FILE")]
    pub script: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Collection overview arguments.
#[derive(Debug, Args)]
pub struct CollectionCommand {
    /// Replay this session script first so finds are reflected
    #[arg(short, long, value_name = "FILE")]
    pub script: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Record a single find.
#[derive(Debug, Args)]
pub struct RecordCommand {
    /// Fossil name (catalog name or free text)
    #[arg(long)]
    pub fossil: Option<String>,

    /// Region id
    #[arg(short, long)]
    pub region: Option<String>,

    /// Existing location id; selects its region as well
    #[arg(short, long, conflicts_with = "new_location")]
    pub location: Option<String>,

    /// Name of a location not yet in the catalog
    #[arg(short = 'n', long)]
    pub new_location: Option<String>,

    /// Year of the find
    #[arg(long)]
    pub year: Option<i32>,

    /// Month of the find (1-12)
    #[arg(long)]
    pub month: Option<u32>,

    /// Day of the find
    #[arg(long)]
    pub day: Option<u32>,

    /// Free-text note, stored as given
    #[arg(long)]
    pub note: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

impl RecordCommand {
    /// The form edits these flags stand for, in form order.
    ///
    /// Date flags are only emitted when at least one is given, so a draft
    /// that starts at today keeps its date otherwise.
    #[must_use]
    pub fn edits(&self) -> Vec<Edit> {
        let mut edits = Vec::new();
        if let Some(fossil) = &self.fossil {
            edits.push(Edit::SetFossil(fossil.clone()));
        }
        if let Some(region) = &self.region {
            edits.push(Edit::SelectRegion(region.clone()));
        }
        if let Some(location) = &self.location {
            edits.push(Edit::SelectLocation(location.clone()));
        }
        if let Some(name) = &self.new_location {
            edits.push(Edit::CreateNewLocation);
            edits.push(Edit::SetNewLocationName(name.clone()));
        }
        if self.year.is_some() || self.month.is_some() || self.day.is_some() {
            edits.push(Edit::SetYear(self.year));
            edits.push(Edit::SetMonth(self.month));
            edits.push(Edit::SetDay(self.day));
        }
        if let Some(note) = &self.note {
            edits.push(Edit::SetNote(note.clone()));
        }
        edits
    }
}

/// Replay arguments.
#[derive(Debug, Args)]
pub struct ReplayCommand {
    /// JSON session script (array of prefill/edit/submit/discard steps)
    pub script: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Plain,
    /// JSON output
    Json,
}
