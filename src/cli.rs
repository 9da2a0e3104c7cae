//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Mirror blog posts into GitHub Gists every time they are saved.
#[derive(Parser, Debug)]
#[command(name = "gistpress", version, about, long_about = None)]
pub struct Args {
    /// Configuration file (defaults to the usual search locations)
    #[arg(short, long, value_name = "FILE", global = true, env = "GISTPRESS_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Mirror a saved post into its gist
    Sync {
        /// JSON file holding the post record
        #[arg(value_name = "POST_JSON")]
        post: PathBuf,

        /// JSON file holding the parent record when the post is a revision
        #[arg(long, value_name = "PARENT_JSON")]
        parent: Option<PathBuf>,

        /// The save was an autosave (never synced)
        #[arg(long)]
        autosave: bool,
    },

    /// Show the stored gist state of a post
    Status {
        /// The post ID
        #[arg(value_name = "POST_ID")]
        post_id: u64,
    },

    /// Verify the configured GitHub username and access token
    CheckToken,

    /// Write settings to a configuration file
    Configure {
        /// GitHub username
        #[arg(long)]
        username: Option<String>,

        /// GitHub personal access token
        #[arg(long)]
        token: Option<String>,

        /// Post types to sync (comma-separated, replaces the current list)
        #[arg(long, value_name = "TYPES", value_delimiter = ',')]
        post_types: Option<Vec<String>>,

        /// File to write (defaults to the --config file, then the user config file)
        #[arg(long, value_name = "FILE")]
        path: Option<PathBuf>,
    },
}
