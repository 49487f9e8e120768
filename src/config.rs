use std::path::{Path, PathBuf};

use serde::Deserialize;

pub const CONFIG_FILE: &str = "verdict.toml";

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub run: RunConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Deserialize)]
pub struct RunConfig {
    /// Shown in the banner before the first suite.
    #[serde(default = "default_title")]
    pub title: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
        }
    }
}

/// Where the structured outcome goes besides the console report.
#[derive(Debug, Default, Deserialize)]
pub struct ReportConfig {
    /// Write the run outcome as JSON to this path.
    /// Example: "target/verdict.json"
    pub json: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
pub struct LogConfig {
    /// Default tracing filter when `RUST_LOG` is unset.
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

fn default_title() -> String {
    "Integration Tests".to_string()
}

fn default_level() -> String {
    "warn".to_string()
}

impl Config {
    /// Load `verdict.toml` from the workspace root, falling back to defaults if absent or invalid.
    pub fn load(workspace: &Path) -> Self {
        Self::load_file(&workspace.join(CONFIG_FILE))
    }

    pub fn load_file(path: &Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        toml::from_str(&content).unwrap_or_default()
    }
}
