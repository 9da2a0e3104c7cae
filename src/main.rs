//! gistpress - mirror blog posts into GitHub Gists.
//!
//! This is the main binary, invoked by the blog engine after every save.

mod cli;
mod commands;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Args, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries command output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let load_config = || commands::load_config(args.config.as_deref());

    match args.command {
        Command::Sync {
            post,
            parent,
            autosave,
        } => commands::sync(&load_config()?, &post, parent.as_deref(), autosave).await,
        Command::Status { post_id } => commands::status(&load_config()?, post_id),
        Command::CheckToken => commands::check_token(&load_config()?).await,
        Command::Configure {
            username,
            token,
            post_types,
            path,
        } => {
            let update = commands::ConfigUpdate {
                username,
                token,
                post_types,
            };
            commands::configure(path.or_else(|| args.config.clone()), update)
        }
    }
}
