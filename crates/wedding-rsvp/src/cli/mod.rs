//! Command-line interface for wedding-rsvp.
//!
//! This module provides the CLI structure for the `rsvp` binary and the
//! terminal implementation of the page dialogs.

mod commands;

use std::io::{BufRead, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::export::Dialogs;

pub use commands::{
    ClearCommand, ConfigCommand, ExportCommand, ListCommand, OutputFormat, StatusCommand,
    SubmitCommand,
};

/// rsvp - Keep wedding RSVPs on this device
///
/// Collects RSVP responses into a local store, lists them, and exports
/// them as a spreadsheet-ready CSV file.
#[derive(Debug, Parser)]
#[command(name = "rsvp")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

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
    /// Submit an RSVP
    Submit(SubmitCommand),

    /// List saved RSVPs, newest first
    List(ListCommand),

    /// Export saved RSVPs as CSV
    Export(ExportCommand),

    /// Delete all saved RSVPs
    Clear(ClearCommand),

    /// Show store status
    Status(StatusCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}

/// Dialogs on a terminal: alerts print, confirmations read a y/N answer.
#[derive(Debug)]
pub struct TerminalDialogs<R, W> {
    input: R,
    output: W,
    assume_yes: bool,
}

impl TerminalDialogs<std::io::StdinLock<'static>, std::io::Stdout> {
    /// Dialogs over stdin and stdout.
    #[must_use]
    pub fn stdio(assume_yes: bool) -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout(), assume_yes)
    }
}

impl<R: BufRead, W: Write> TerminalDialogs<R, W> {
    /// Dialogs over the given streams. With `assume_yes`, every
    /// confirmation is answered yes without reading input.
    pub fn new(input: R, output: W, assume_yes: bool) -> Self {
        Self {
            input,
            output,
            assume_yes,
        }
    }
}

impl<R: BufRead, W: Write> Dialogs for TerminalDialogs<R, W> {
    fn alert(&mut self, message: &str) {
        let _ = writeln!(self.output, "{message}");
    }

    fn confirm(&mut self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        let _ = write!(self.output, "{message} [y/N] ");
        let _ = self.output.flush();

        let mut answer = String::new();
        if self.input.read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}
