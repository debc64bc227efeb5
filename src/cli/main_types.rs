use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "botmeta-cli")]
#[command(about = "Command line interface for the BOTMETA validation service")]
#[command(version)]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    #[arg(long, global = true)]
    pub config_dir: Option<String>,

    #[arg(long, global = true, env = "BOTMETA_SERVER_URL")]
    pub server_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Preview how the component matcher resolves file paths
    Render {
        /// File paths to resolve, one argument per path
        #[arg(required = true)]
        files: Vec<String>,
        /// Local metadata file to send instead of the server's current copy
        #[arg(long)]
        meta_file: Option<PathBuf>,
        /// Ruleset tag to render against
        #[arg(long, default_value = "latest")]
        tag: String,
    },
    /// Fetch the current metadata document
    Current {
        /// Write the document to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Browse a metareport data file as a sortable, filterable table
    Report {
        /// Path or URL of the report JSON (an array of row objects)
        source: String,
        /// Case-insensitive substring filter across all fields
        #[arg(long)]
        filter: Option<String>,
        /// Sort column; repeat the same column to flip its direction
        #[arg(long, action = clap::ArgAction::Append)]
        sort: Vec<String>,
        /// Comma-separated columns to display (defaults to the first row's keys)
        #[arg(long, value_delimiter = ',')]
        columns: Vec<String>,
        /// Limit the number of rows displayed
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the current configuration
    Show,
    /// Set configuration value
    Set {
        /// Configuration key (default_profile, server_url, timeout_seconds)
        key: String,
        /// Configuration value
        value: String,
    },
}
