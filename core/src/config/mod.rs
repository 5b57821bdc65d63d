use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const SKILLAGENT_DIR: &str = ".skillagent";

/// Process-wide settings, resolved once at startup and then only borrowed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_url: String,
    pub model: String,
    pub api_token: String,
    pub skills_dir: PathBuf,
    pub max_turns: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: "https://api.deepseek.com/v1/chat/completions".to_string(),
            model: "deepseek-v3.2".to_string(),
            api_token: String::new(),
            skills_dir: PathBuf::from("./skills"),
            max_turns: 8,
        }
    }
}

pub fn get_skillagent_dir() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(SKILLAGENT_DIR)
}

pub fn get_config_path() -> PathBuf {
    get_skillagent_dir().join("config.toml")
}

impl Config {
    /// Defaults, then the TOML file, then the process environment.
    ///
    /// An explicit `path` must exist; the default location is optional. The
    /// result is not validated here: callers layer their own overrides on top
    /// and call [`Config::validate`] once they are done.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(p) => load_config(p)?,
            None => {
                let default_path = get_config_path();
                if default_path.exists() {
                    load_config(&default_path)?
                } else {
                    Config::default()
                }
            }
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(url) = lookup("OPENAI_URL") {
            self.api_url = url;
        }
        if let Some(model) = lookup("OPENAI_MODEL") {
            self.model = model;
        }
        if let Some(token) = lookup("OPENAI_TOKEN") {
            self.api_token = token;
        }
        if let Some(dir) = lookup("SKILLS_DIR") {
            self.skills_dir = PathBuf::from(dir);
        }
        if let Some(turns) = lookup("MAX_TURNS") {
            self.max_turns = turns
                .trim()
                .parse()
                .with_context(|| format!("MAX_TURNS must be a positive integer, got '{turns}'"))?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_turns == 0 {
            bail!("max_turns must be at least 1");
        }
        if self.api_url.trim().is_empty() {
            bail!("api_url must not be empty");
        }
        Ok(())
    }
}

pub fn load_config(config_path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(config_path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            anyhow::anyhow!("Config file not found: {}", config_path.display())
        } else {
            anyhow::anyhow!("Failed to read config from {}: {}", config_path.display(), e)
        }
    })?;

    toml::from_str(&content)
        .with_context(|| format!("Failed to parse config from {}", config_path.display()))
}
