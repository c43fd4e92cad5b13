//! Subcommand handlers.

use anyhow::{Context, Result};
use std::path::Path;
pub use {chat::ChatCmd, prompt::PromptCmd, reason::ReasonCmd};

mod chat;
mod prompt;
mod reason;

/// Print the config path and its contents.
pub fn show_config(path: &Path) -> Result<()> {
    let contents =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    println!("# {}", path.display());
    print!("{contents}");
    Ok(())
}
