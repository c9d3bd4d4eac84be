//! Command-line interface definitions for filehub.
//!
//! This module defines all CLI arguments, subcommands, and options using the clap derive API.
//! Global options (verbosity, color, config file, backend URL) apply to every
//! subcommand.
//!
//! # Example
//!
//! ```bash
//! # List everything, newest first
//! filehub list
//!
//! # Search, restrict by size and sort by size ascending
//! filehub list --search report --min-size 1 --min-unit MB --sort size --asc
//!
//! # JSON for scripting
//! filehub list --type application/pdf --output json
//!
//! # Interactive filter shell
//! filehub --api-url https://files.example.com browse
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::filters::{FilterEngine, FilterField, SizeUnit, SortDirection, SortKey};

/// Browse and filter a deduplicating file store.
///
/// filehub lists the files held by the storage backend, narrows them with
/// search, type, size and date filters, and reports how much space
/// deduplication is saving.
#[derive(Debug, Parser)]
#[command(name = "filehub")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Print errors as JSON objects on stderr
    #[arg(long, global = true)]
    pub json_errors: bool,

    /// Read configuration from this TOML file as well
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Base URL of the storage backend (overrides configuration)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Request timeout in seconds (overrides configuration)
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands for filehub.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List files matching the given filters, with summary statistics
    List(ListArgs),
    /// List the file types present in storage
    Types(TypesArgs),
    /// Delete a file record and show the updated summary
    Delete(DeleteArgs),
    /// Open an interactive filter shell
    Browse(BrowseArgs),
    /// Show or save the effective configuration
    Config(ConfigArgs),
}

/// Filter controls shared by `list` and `browse`.
///
/// Values are passed to the filter engine as raw text; a size that does not
/// parse simply contributes nothing to the query.
#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    /// Free-text search over filename and type
    #[arg(short, long, value_name = "TEXT")]
    pub search: Option<String>,

    /// Exact file type, e.g. image/png
    #[arg(short = 't', long = "type", value_name = "MIME")]
    pub file_type: Option<String>,

    /// Minimum size, in --min-unit
    #[arg(long, value_name = "N")]
    pub min_size: Option<String>,

    /// Unit for --min-size (B, KB, MB, GB; binary multiples)
    #[arg(long, value_name = "UNIT")]
    pub min_unit: Option<SizeUnit>,

    /// Maximum size, in --max-unit
    #[arg(long, value_name = "N")]
    pub max_size: Option<String>,

    /// Unit for --max-size (B, KB, MB, GB; binary multiples)
    #[arg(long, value_name = "UNIT")]
    pub max_unit: Option<SizeUnit>,

    /// Only files uploaded on or after this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub after: Option<String>,

    /// Only files uploaded on or before this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub before: Option<String>,

    /// Field to order by: name, size, date or type
    #[arg(long, value_name = "KEY")]
    pub sort: Option<SortKey>,

    /// Sort ascending instead of descending
    #[arg(long)]
    pub asc: bool,
}

impl FilterArgs {
    /// Copy every given control into the engine without submitting.
    pub fn apply_to(&self, engine: &mut FilterEngine) {
        let text_fields = [
            (FilterField::Search, &self.search),
            (FilterField::FileType, &self.file_type),
            (FilterField::MinSize, &self.min_size),
            (FilterField::MaxSize, &self.max_size),
            (FilterField::UploadedAfter, &self.after),
            (FilterField::UploadedBefore, &self.before),
        ];
        for (field, value) in text_fields {
            if let Some(value) = value {
                engine.update_field(field, value.as_str());
            }
        }

        if let Some(unit) = self.min_unit {
            engine.update_field(FilterField::MinSizeUnit, unit.as_str());
        }
        if let Some(unit) = self.max_unit {
            engine.update_field(FilterField::MaxSizeUnit, unit.as_str());
        }
        if let Some(key) = self.sort {
            engine.update_field(FilterField::SortField, key.name());
        }
        if self.asc {
            engine.update_field(FilterField::SortDirection, SortDirection::Asc.as_str());
        }
    }
}

/// Arguments for the list subcommand.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Filter controls
    #[command(flatten)]
    pub filters: FilterArgs,

    /// Output format (defaults to the configured format)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Print JSON on a single line
    #[arg(long)]
    pub compact: bool,
}

/// Arguments for the types subcommand.
#[derive(Debug, Args)]
pub struct TypesArgs {
    /// Print the types as a JSON array
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the delete subcommand.
#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Identifier of the record to delete
    #[arg(value_name = "ID")]
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,
}

/// Arguments for the browse subcommand.
#[derive(Debug, Args)]
pub struct BrowseArgs {
    /// Initial filter controls
    #[command(flatten)]
    pub filters: FilterArgs,
}

/// Arguments for the config subcommand.
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Write the effective configuration to the platform config file
    #[arg(long)]
    pub save: bool,
}

/// Output format for listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Summary block and aligned table for terminals
    #[default]
    Table,
    /// JSON output for scripting
    Json,
    /// CSV output for spreadsheets
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}
