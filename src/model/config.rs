use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::tag::TagSpec;

/// Default scaffold created under every new project root
pub const DEFAULT_SCAFFOLD: &[&str] = &[
    "Design/Drawings",
    "Design/Specs",
    "PLC/Programs",
    "PLC/HMI",
    "PLC/Symbols",
    "PLC/Configs",
    "BOM/exports",
    "Docs/Notes",
    "Tests/Simulations",
    "Tests/Logs",
    "Tags",
    "Tools",
    "Archive",
];

/// Directory under the base dir holding tool-owned files (config, presets, log)
pub const TOOL_DIR: &str = ".projman";

/// Application configuration. Built once at startup and handed to the
/// CLI handlers and the TUI; nothing reads it from global state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Root directory containing one subdirectory per project
    #[serde(skip)]
    pub base_dir: PathBuf,
    #[serde(default)]
    pub sound: SoundConfig,
    #[serde(default)]
    pub tagging: TagSpec,
    #[serde(default)]
    pub project: ProjectDefaults,
    #[serde(default)]
    pub ui: UiConfig,
}

impl AppConfig {
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        AppConfig {
            base_dir: base_dir.into(),
            sound: SoundConfig::default(),
            tagging: TagSpec::default(),
            project: ProjectDefaults::default(),
            ui: UiConfig::default(),
        }
    }

    pub fn tool_dir(&self) -> PathBuf {
        tool_dir(&self.base_dir)
    }

    pub fn config_path(&self) -> PathBuf {
        self.tool_dir().join("config.toml")
    }

    pub fn presets_dir(&self) -> PathBuf {
        self.tool_dir().join("presets")
    }
}

pub fn tool_dir(base_dir: &Path) -> PathBuf {
    base_dir.join(TOOL_DIR)
}

/// Audio cue settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoundConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_nav_up")]
    pub nav_up: String,
    #[serde(default = "default_nav_down")]
    pub nav_down: String,
    #[serde(default = "default_select")]
    pub select: String,
    #[serde(default = "default_confirm")]
    pub confirm: String,
    #[serde(default = "default_error")]
    pub error: String,
}

impl Default for SoundConfig {
    fn default() -> Self {
        SoundConfig {
            enabled: false,
            nav_up: default_nav_up(),
            nav_down: default_nav_down(),
            select: default_select(),
            confirm: default_confirm(),
            error: default_error(),
        }
    }
}

fn default_nav_up() -> String {
    "sounds/nav_up.wav".into()
}

fn default_nav_down() -> String {
    "sounds/nav_down.wav".into()
}

fn default_select() -> String {
    "sounds/select.wav".into()
}

fn default_confirm() -> String {
    "sounds/confirm.wav".into()
}

fn default_error() -> String {
    "sounds/error.wav".into()
}

/// Defaults applied when creating projects
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDefaults {
    /// Subdirectories created under every new project, relative to its root
    #[serde(default = "default_scaffold")]
    pub scaffold: Vec<String>,
    #[serde(default = "default_status")]
    pub default_status: String,
}

impl Default for ProjectDefaults {
    fn default() -> Self {
        ProjectDefaults {
            scaffold: default_scaffold(),
            default_status: default_status(),
        }
    }
}

fn default_scaffold() -> Vec<String> {
    DEFAULT_SCAFFOLD.iter().map(|s| s.to_string()).collect()
}

fn default_status() -> String {
    super::project::STATUS_ACTIVE.into()
}

/// TUI appearance overrides
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Theme color name -> `#RRGGBB`
    #[serde(default)]
    pub colors: HashMap<String, String>,
}
