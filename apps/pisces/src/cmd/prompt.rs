//! Prompt command

use crate::{Config, output};
use anyhow::{Result, bail};
use clap::Args;
use relay::{PromptRelay, TextTask};
use reqwest::Client;

/// Prompt command arguments
#[derive(Debug, Args)]
pub struct PromptCmd {
    /// Task preset (summary, speech, story, code, slogan, promote, joke, free)
    #[arg(short, long, default_value = "free")]
    pub task: String,

    /// The text to send
    pub text: String,
}

impl PromptCmd {
    /// Run the prompt command
    pub async fn run(&self, config: &Config) -> Result<()> {
        let task = TextTask::from_name(&self.task);
        if task == TextTask::Other {
            tracing::warn!("unknown task {:?}, using the generic prompt", self.task);
        }

        let relay = PromptRelay::new(config.provider(Client::new())?, config.generation());
        let rx = relay.subscribe();
        let task = relay.spawn_submit(task.prefix(), self.text.as_str());
        match output::follow(rx, task).await? {
            Some(outcome) => match outcome.error() {
                Some(message) => bail!("{message}"),
                None => Ok(()),
            },
            None => {
                relay.reset();
                Ok(())
            }
        }
    }
}
