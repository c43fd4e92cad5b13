//! Reason command

use crate::{Config, output};
use anyhow::{Result, bail};
use clap::Args;
use pimage::ImageRef;
use relay::{ImageTask, MultimodalRelay};
use reqwest::Client;

/// Reason command arguments
#[derive(Debug, Args)]
pub struct ReasonCmd {
    /// Task preset (reason, caption, info, task)
    #[arg(short, long, default_value = "reason")]
    pub task: String,

    /// Image file path or http(s) URL, repeatable
    #[arg(short, long = "image", required = true)]
    pub images: Vec<String>,

    /// The question about the images
    pub question: String,
}

impl ReasonCmd {
    /// Run the reason command
    pub async fn run(&self, config: &Config) -> Result<()> {
        let task = ImageTask::from_name(&self.task);
        if task == ImageTask::Other {
            tracing::warn!("unknown task {:?}, using the generic prompt", self.task);
        }

        let client = Client::new();
        let relay = MultimodalRelay::new(
            config.provider(client.clone())?,
            config.generation(),
            config.loader(client),
        );
        let images = self
            .images
            .iter()
            .map(|image| ImageRef::from(image.as_str()))
            .collect();

        let rx = relay.subscribe();
        let task = relay.spawn_reason(task.preamble(), self.question.as_str(), images);
        match output::follow(rx, task).await? {
            Some(outcome) => match outcome.error() {
                Some(message) => bail!("{message}"),
                None => Ok(()),
            },
            None => {
                relay.clear();
                Ok(())
            }
        }
    }
}
