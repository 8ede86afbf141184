//! CLI for the Waypoint link resolution client.
//!
//! One invocation is one cold start: the flow only runs when a command asks for it.

mod commands;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::sync::Arc;
use waypoint_core::config;
use waypoint_core::http::{CurlTransport, HttpClient};
use waypoint_core::prefs::PrefsDb;

use commands::{run_completions, run_open, run_push_token, run_resolve, run_state};

/// Top-level CLI for Waypoint.
#[derive(Debug, Parser)]
#[command(name = "waypoint")]
#[command(about = "Waypoint: resolve, cache and probe the shell's target link", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    #[command(flatten)]
    Store(StoreCommand),

    /// Print shell completions to stdout.
    Completions {
        /// Target shell.
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Commands that open the prefs store and share one HTTP client.
#[derive(Debug, Subcommand)]
pub enum StoreCommand {
    /// Run the link resolution flow once and print the end state.
    Resolve,

    /// Resolve, then probe the target link and report whether it may be displayed.
    Open,

    /// Show all persisted keys.
    State,

    /// Store the externally supplied push token.
    PushToken {
        /// Token sent as `firebase_push_token` on later calls.
        token: String,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        let command = match cli.command {
            CliCommand::Completions { shell } => {
                run_completions(shell, &mut Cli::command());
                return Ok(());
            }
            CliCommand::Store(command) => command,
        };

        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);
        let prefs = PrefsDb::open_default(&cfg.namespace).await?;
        // Captured once; every call of this run shares it.
        let client = HttpClient::new(
            Arc::new(CurlTransport::new(&cfg.http())),
            &cfg.user_agent(),
        );

        match command {
            StoreCommand::Resolve => run_resolve(&prefs, &client, &cfg).await?,
            StoreCommand::Open => run_open(&prefs, &client, &cfg).await?,
            StoreCommand::State => run_state(&prefs).await?,
            StoreCommand::PushToken { token } => run_push_token(&prefs, &token).await?,
        }

        prefs.close().await;
        Ok(())
    }
}

#[cfg(test)]
mod tests;
