//! Configuration for the CLI.
//!
//! Resolves `pisces.toml` in priority order:
//! 1. `--config <path>` flag
//! 2. `{cwd}/.pisces/pisces.toml` (workspace config)
//! 3. `{config_dir}/pisces/pisces.toml` (global default)
//!
//! If none exists, the global default is generated.

use crate::utils::expand_env_vars;
use anyhow::{Context, Result, bail};
use compact_str::CompactString;
use gemini::Gemini;
use pcore::{DEFAULT_MODEL, DEFAULT_TEMPERATURE, GenerationConfig};
use pimage::{Loader, MAX_DIMENSION};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config template written when no config exists.
pub const DEFAULT_CONFIG: &str = r#"[model]
name = "gemini-1.5-flash-latest"
temperature = 0.7
api_key = "${GEMINI_API_KEY}"

[image]
max_dimension = 768
"#;

/// CLI configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// Model settings.
    #[serde(default)]
    pub model: ModelConfig,

    /// Image settings.
    #[serde(default)]
    pub image: ImageConfig,
}

/// The `[model]` section.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModelConfig {
    /// Model name.
    #[serde(default = "default_model")]
    pub name: CompactString,

    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Gemini API key.
    #[serde(default)]
    pub api_key: String,

    /// Alternative API base URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// The `[image]` section.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ImageConfig {
    /// Longest edge of an attached image, in pixels.
    #[serde(default = "default_max_dimension")]
    pub max_dimension: u32,
}

fn default_model() -> CompactString {
    DEFAULT_MODEL.into()
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

fn default_max_dimension() -> u32 {
    MAX_DIMENSION
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: default_model(),
            temperature: default_temperature(),
            api_key: String::new(),
            base_url: None,
        }
    }
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            max_dimension: default_max_dimension(),
        }
    }
}

impl Config {
    /// Parse a config, expanding `${VAR}` references first.
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(&expand_env_vars(contents)).context("invalid config")
    }

    /// Load a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_toml(&contents).with_context(|| format!("parsing {}", path.display()))
    }

    /// Generation settings for the model.
    pub fn generation(&self) -> GenerationConfig {
        GenerationConfig::new(self.model.name.clone()).with_temperature(self.model.temperature)
    }

    /// The Gemini provider.
    pub fn provider(&self, client: Client) -> Result<Gemini> {
        let key = self.model.api_key.trim();
        if key.is_empty() {
            bail!("missing api key: set GEMINI_API_KEY or [model].api_key in pisces.toml");
        }
        match &self.model.base_url {
            Some(base) => Gemini::custom(client, key, base),
            None => Gemini::api(client, key),
        }
    }

    /// The image loader.
    pub fn loader(&self, client: Client) -> Loader {
        Loader::new(client).with_max_dimension(self.image.max_dimension)
    }
}

/// Resolve the config following the priority chain, returning it along
/// with the path it was read from.
pub fn resolve(flag: Option<&Path>) -> Result<(Config, PathBuf)> {
    if let Some(path) = flag {
        let config = Config::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?;
        return Ok((config, path.to_owned()));
    }

    let workspace = workspace_config_path();
    if workspace.exists() {
        let config = Config::load(&workspace).context("failed to load workspace config")?;
        return Ok((config, workspace));
    }

    let global = global_config_path();
    if !global.exists() {
        generate_default_config(&global)?;
        tracing::info!("generated default config at {}", global.display());
    }
    let config = Config::load(&global).context("failed to load global config")?;
    Ok((config, global))
}

/// Path to the workspace config.
pub fn workspace_config_path() -> PathBuf {
    PathBuf::from(".pisces").join("pisces.toml")
}

/// Path to the global config.
pub fn global_config_path() -> PathBuf {
    dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
        .unwrap_or_else(|| PathBuf::from(".config"))
        .join("pisces")
        .join("pisces.toml")
}

/// Write [`DEFAULT_CONFIG`] to `path`, creating parent directories.
pub fn generate_default_config(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create config directory {}", parent.display()))?;
    }
    std::fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("failed to write default config to {}", path.display()))
}
