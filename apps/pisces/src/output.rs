//! Terminal rendering of relay outcomes.

use anyhow::Result;
use relay::Outcome;
use std::io::Write;
use tokio::{sync::watch, task::JoinHandle};

/// Tracks how much of a growing reply was already printed.
#[derive(Debug, Default)]
pub struct Suffix {
    printed: usize,
}

impl Suffix {
    /// The part of `text` not printed yet.
    ///
    /// A text shorter than what was printed starts a new reply.
    pub fn next<'a>(&mut self, text: &'a str) -> &'a str {
        let delta = text.get(self.printed..).unwrap_or(text);
        self.printed = text.len();
        delta
    }

    /// Forget what was printed.
    pub fn reset(&mut self) {
        self.printed = 0;
    }
}

/// Print outcome changes until `task` finishes or Ctrl+C is pressed.
///
/// Returns the final outcome, or `None` when interrupted.
pub async fn follow(
    mut rx: watch::Receiver<Outcome>,
    mut task: JoinHandle<()>,
) -> Result<Option<Outcome>> {
    let mut suffix = Suffix::default();
    let mut shown = Outcome::Idle;
    loop {
        tokio::select! {
            changed = rx.changed() => {
                changed?;
                let outcome = rx.borrow_and_update().clone();
                render(&mut suffix, &mut shown, outcome);
            }
            joined = &mut task => {
                joined?;
                let outcome = rx.borrow_and_update().clone();
                render(&mut suffix, &mut shown, outcome.clone());
                if outcome.text().is_some() {
                    println!();
                }
                return Ok(Some(outcome));
            }
            _ = tokio::signal::ctrl_c() => {
                println!();
                return Ok(None);
            }
        }
    }
}

fn render(suffix: &mut Suffix, shown: &mut Outcome, outcome: Outcome) {
    if *shown == outcome {
        return;
    }
    match &outcome {
        Outcome::Success(text) => {
            print!("{}", suffix.next(text));
            std::io::stdout().flush().ok();
        }
        Outcome::Failure(message) => eprintln!("Error: {message}"),
        Outcome::Idle | Outcome::InProgress => suffix.reset(),
    }
    *shown = outcome;
}
