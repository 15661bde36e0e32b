//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// tgkit - text helpers for chat exports and media downloads
#[derive(Debug, Parser)]
#[command(name = "tgkit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "TGKIT_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v', global = true)]
    pub debug: bool,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Rewrite every date/time in the text into one format
    Dates {
        /// chrono output format (defaults to the configured one)
        #[arg(long, short)]
        format: Option<String>,

        /// Show only the first match and the text around it
        #[arg(long)]
        first: bool,

        /// Text to normalize (words are joined with spaces)
        #[arg(required = true)]
        text: Vec<String>,
    },

    /// Decode a message link into chat, topic, post and comment ids
    Link {
        /// Link such as https://t.me/c/123456789/42, or `me`
        link: String,
    },

    /// Format or parse byte sizes
    Bytes {
        #[command(subcommand)]
        action: BytesAction,
    },

    /// Shorten a file name to a UTF-8 byte limit
    Filename {
        /// Maximum byte length of the file name
        #[arg(long, short)]
        limit: Option<usize>,

        /// Path whose file name should be shortened
        path: PathBuf,
    },

    /// Replace characters that are invalid in file names
    Title {
        /// Collapse runs of underscores into one
        #[arg(long)]
        collapse: bool,

        /// Title to sanitize
        title: String,
    },

    /// Render a progress bar
    Progress {
        /// Number of glyphs in the bar
        #[arg(long, short)]
        width: Option<usize>,

        /// Completion percentage (0-100)
        percent: f64,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Byte size actions.
#[derive(Debug, Subcommand)]
pub enum BytesAction {
    /// Format a byte count, e.g. 1536 -> 1.5KB
    Format {
        /// Decimals to keep
        #[arg(long, short)]
        precision: Option<u32>,

        /// Size in bytes
        size: f64,
    },

    /// Parse a leading size token, e.g. 10MB -> 10485760
    Parse {
        /// Text starting with <digits><B|KB|MB|GB|TB>
        text: String,
    },
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump current configuration
    Dump,

    /// Validate configuration
    Validate,

    /// Show configuration file path
    Path,
}
