// Configuration loader
// Loads training defaults from ~/.perceptron/config.toml or an explicit path

use anyhow::{anyhow, bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::settings::Config;
use crate::errors::config_parse_error;

/// Environment variable naming an alternative config file
pub const CONFIG_ENV: &str = "PERCEPTRON_CONFIG";

/// Default config location
pub fn default_config_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".perceptron/config.toml"))
}

/// Load configuration
///
/// An explicit `path` (or `PERCEPTRON_CONFIG`) must exist. The default file
/// is optional; without it an empty config is returned.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        return load_config_from(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV) {
        if !env_path.is_empty() {
            return load_config_from(Path::new(&env_path));
        }
    }

    let default_path = match default_config_path() {
        Ok(path) => path,
        Err(e) => {
            tracing::debug!(error = %e, "No home directory, skipping default config");
            return Ok(Config::default());
        }
    };

    if !default_path.exists() {
        tracing::debug!(path = %default_path.display(), "No config file found");
        return Ok(Config::default());
    }

    load_config_from(&default_path)
}

/// Load configuration from a specific file
pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        bail!("Config file not found: {}", path.display());
    }

    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let config: Config =
        toml::from_str(&contents).map_err(|e| anyhow!(config_parse_error(&e.to_string())))?;

    tracing::debug!(path = %path.display(), "Loaded config file");

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_path_under_home() {
        if let Ok(path) = default_config_path() {
            assert!(path.ends_with(".perceptron/config.toml"));
        }
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let err = load_config(Some(Path::new("/nonexistent/perceptron.toml"))).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }
}
