use super::keymap::KeyConfig;
use crate::theme::PaletteType;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EditorConfig {
    /// WHATWG encoding label used to read and write documents.
    pub encoding: String,
    pub line_numbers: bool,
    pub tab_width: u8,
    pub theme: PaletteType,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            encoding: "utf-8".to_string(),
            line_numbers: true,
            tab_width: 4,
            theme: PaletteType::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub keys: KeyConfig,
    pub editor: EditorConfig,
}

pub fn get_config_path() -> Option<PathBuf> {
    home::home_dir().map(|mut path| {
        path.push(".config");
        path.push("scrivo");
        path.push("config.toml");
        path
    })
}

impl Config {
    /// Loads `path` or the default location. A missing file yields the
    /// defaults; an unreadable or invalid one is logged and also yields the
    /// defaults.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path.map(Path::to_path_buf).or_else(get_config_path) else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => Self::parse(&content).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "invalid config, using defaults");
                Self::default()
            }),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "cannot read config, using defaults");
                Self::default()
            }
        }
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
