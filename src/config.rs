use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::models::Facets;

/// Root configuration structure, deserialized from `.harvest-summarizer/config.toml`.
///
/// ```toml
/// [facets]
/// tests = ["test/**", "tests/**"]
/// doc = ["docs/**"]
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Facet name → glob patterns, in declaration order. Files matching no
    /// facet fall into `core`, which cannot be configured.
    #[serde(default)]
    pub facets: Facets,
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("parsing config {}", path.display()))
}

/// Load the summarizer configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `<base_path>/.harvest-summarizer/config.toml`
/// 3. `~/.config/harvest-summarizer/config.toml`
/// 4. Built-in [`Config::default`] (no facets; every file is `core`)
pub fn load_config(base_path: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let project_config = base_path.join(".harvest-summarizer").join("config.toml");
    if project_config.exists() {
        return read_config(&project_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home
            .join(".config")
            .join("harvest-summarizer")
            .join("config.toml");
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    Ok(Config::default())
}
