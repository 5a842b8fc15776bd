//! CLI command definitions.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::form::RsvpForm;

/// Submit command arguments, one flag per form field.
#[derive(Debug, Args)]
pub struct SubmitCommand {
    /// Your name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Contact email
    #[arg(short, long)]
    pub email: Option<String>,

    /// Contact phone
    #[arg(long)]
    pub phone: Option<String>,

    /// How you know the couple
    #[arg(long)]
    pub relationship: Option<String>,

    /// Names of everyone in your party
    #[arg(short, long)]
    pub party: Option<String>,

    /// Number of people attending (defaults to 1)
    #[arg(long)]
    pub headcount: Option<String>,

    /// An event you will attend (repeat for several)
    #[arg(long = "event", value_name = "EVENT")]
    pub events: Vec<String>,

    /// Dietary restrictions
    #[arg(long)]
    pub dietary: Option<String>,

    /// Accommodation needs
    #[arg(long)]
    pub accommodations: Option<String>,

    /// First song request
    #[arg(long)]
    pub song1: Option<String>,

    /// Second song request
    #[arg(long)]
    pub song2: Option<String>,

    /// Third song request
    #[arg(long)]
    pub song3: Option<String>,

    /// Notes for the couple
    #[arg(long)]
    pub notes: Option<String>,
}

impl SubmitCommand {
    /// The form these flags fill in. Missing flags leave fields blank.
    #[must_use]
    pub fn to_form(&self) -> RsvpForm {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        RsvpForm {
            primary_name: text(&self.name),
            email: text(&self.email),
            phone: text(&self.phone),
            relationship: text(&self.relationship),
            party_names: text(&self.party),
            headcount: text(&self.headcount),
            events: self.events.clone(),
            dietary: text(&self.dietary),
            accommodations: text(&self.accommodations),
            song1: text(&self.song1),
            song2: text(&self.song2),
            song3: text(&self.song3),
            notes: text(&self.notes),
        }
    }
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Export command arguments.
#[derive(Debug, Args)]
pub struct ExportCommand {
    /// Directory to write the CSV into
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,
}

/// Clear command arguments.
#[derive(Debug, Args)]
pub struct ClearCommand {
    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
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

/// Output format for the list command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Plain,
    /// HTML fragment, as shown on the site
    Html,
    /// Stored records as JSON
    Json,
}
