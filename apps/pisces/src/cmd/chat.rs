//! Chat command

use crate::Config;
use anyhow::Result;
use clap::Args;
use relay::{Author, ChatRelay, History};
use reqwest::Client;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Chat command arguments
#[derive(Debug, Args)]
pub struct ChatCmd {
    /// The message to send (if empty, starts interactive mode)
    pub message: Option<String>,
}

impl ChatCmd {
    /// Run the chat command
    pub async fn run(&self, config: &Config) -> Result<()> {
        let relay = ChatRelay::new(config.provider(Client::new())?, config.generation());
        let mut shown = 0;

        if let Some(message) = &self.message {
            relay.send(message).await;
            print_new(&relay.history(), &mut shown, 1);
            return Ok(());
        }

        print_new(&relay.history(), &mut shown, 0);
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            print!("> ");
            std::io::stdout().flush()?;

            let Some(line) = lines.next_line().await? else {
                break;
            };
            let input = line.trim();
            match input {
                "" => continue,
                "/quit" | "/exit" => break,
                "/clear" => {
                    relay.clear();
                    shown = 0;
                    print_new(&relay.history(), &mut shown, 0);
                }
                _ => {
                    relay.send(input).await;
                    print_new(&relay.history(), &mut shown, 0);
                }
            }
        }

        Ok(())
    }
}

/// Print the turns after `shown`, skipping the user's own and the first
/// `skip` turns.
fn print_new(history: &History, shown: &mut usize, skip: usize) {
    for turn in history.iter().skip((*shown).max(skip)) {
        match turn.author {
            Author::User => {}
            Author::Model => println!("{}", turn.text),
            Author::Error => eprintln!("Error: {}", turn.text),
        }
    }
    *shown = history.len();
}
