mod types;

pub use types::*;

use crate::{Error, Result};
use std::{env, path::Path};
use tracing::debug;

pub async fn load() -> Result<Config> {
    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());
    load_from(&config_path).await
}

/// Reads a YAML config file. A missing file means "all defaults".
pub async fn load_from(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();
    debug!("Loading configuration from: {}", path.display());

    let config = match tokio::fs::read_to_string(path).await {
        Ok(config_str) => serde_yaml::from_str::<Config>(&config_str)?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("No configuration file at {}, using defaults", path.display());
            Config::default()
        }
        Err(e) => return Err(e.into()),
    };

    config.validate()?;
    Ok(config)
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        let ollama = &self.ollama;

        if ollama.base_url.trim().is_empty() {
            return Err(Error::config("ollama.base_url must not be empty"));
        }
        if !ollama.temperature.is_finite() || !(0.0..=1.0).contains(&ollama.temperature) {
            return Err(Error::config(format!(
                "ollama.temperature must be between 0.0 and 1.0, got {}",
                ollama.temperature
            )));
        }
        if ollama.max_tokens == 0 {
            return Err(Error::config("ollama.max_tokens must be positive"));
        }

        Ok(())
    }
}
