//! Pisces CLI: prompt, chat and image reasoning against Gemini.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt};
pub use {
    cmd::{ChatCmd, PromptCmd, ReasonCmd},
    config::Config,
};

pub mod cmd;
pub mod config;
pub mod output;
pub mod utils;

/// Pisces, a Gemini relay for the terminal
#[derive(Debug, Parser)]
#[command(name = "pisces", version, about)]
pub struct App {
    /// Verbosity level (use -v, -vv, -vvv, etc.)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to the config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Send one prompt and stream the reply
    Prompt(PromptCmd),

    /// Chat with the model
    Chat(ChatCmd),

    /// Ask a question about one or more images
    Reason(ReasonCmd),

    /// Show the configuration file, generating it if missing
    Config,
}

impl App {
    /// Initialize tracing subscriber based on verbosity
    pub fn init_tracing(&self) {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let directive = match self.verbose {
                0 => "info",
                1 => "pisces=debug",
                2 => "pisces=trace",
                3 => "debug",
                _ => "trace",
            };
            EnvFilter::new(directive)
        });

        fmt()
            .without_time()
            .with_env_filter(filter)
            .with_target(self.verbose != 0)
            .init();
    }

    /// Run the selected command.
    pub async fn run(&self) -> Result<()> {
        let (config, path) = config::resolve(self.config.as_deref())?;
        tracing::debug!("using config at {}", path.display());
        match &self.command {
            Command::Prompt(cmd) => cmd.run(&config).await,
            Command::Chat(cmd) => cmd.run(&config).await,
            Command::Reason(cmd) => cmd.run(&config).await,
            Command::Config => cmd::show_config(&path),
        }
    }
}
