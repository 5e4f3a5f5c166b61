use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::core::SplitRatio;

const DEFAULT_TOOL: &str = "xrandr";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Display tool invoked for every command.
    pub tool: String,
    pub default_percent: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tool: DEFAULT_TOOL.to_string(),
            default_percent: SplitRatio::default().percent(),
        }
    }
}

impl Config {
    /// Load from `path`, or from the default location when `None`. A missing
    /// default file yields the defaults; an explicitly given path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match default_path() {
                Some(p) if p.exists() => p,
                Some(p) => {
                    tracing::info!("No config file found at {:?}, using defaults", p);
                    return Ok(Self::default());
                }
                None => return Ok(Self::default()),
            },
        };

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::parse(&contents)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn default_ratio(&self) -> Result<SplitRatio> {
        Ok(SplitRatio::new(self.default_percent)?)
    }

    fn validate(&self) -> Result<()> {
        if self.tool.trim().is_empty() {
            anyhow::bail!("tool must not be empty");
        }
        self.default_ratio()?;
        Ok(())
    }
}

pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("xplit").join("config.toml"))
}
