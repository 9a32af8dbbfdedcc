use std::collections::HashMap;

use anyhow::{bail, Context, Result};
use config::{Config, Environment};
use serde::Deserialize;

const DEFAULT_API_URL: &str = "https://api.notion.com/v1";
const DEFAULT_NOTION_VERSION: &str = "2022-06-28";

/// Runtime settings, read from `NOTION_*` environment variables.
#[derive(Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub token: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_version")]
    pub version: String,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_version() -> String {
    DEFAULT_NOTION_VERSION.to_string()
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_source(None)
    }

    /// Load from an explicit variable map instead of the process environment.
    pub fn from_source(source: Option<HashMap<String, String>>) -> Result<Self> {
        let settings: Settings = Config::builder()
            .add_source(Environment::with_prefix("NOTION").source(source))
            .build()
            .context("failed to read NOTION_* environment")?
            .try_deserialize()
            .context("invalid NOTION_* settings")?;

        if settings.token.trim().is_empty() {
            bail!("NOTION_TOKEN environment variable must be set");
        }
        Ok(settings)
    }
}
