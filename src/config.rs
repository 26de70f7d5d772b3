use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::Result;

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub html: HtmlConfig,
    pub page: PageConfig,
    pub font: FontConfig,
    pub layout: LayoutConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct HtmlConfig {
    /// Glyph placed in front of every list item.
    pub bullet: String,
    /// Show a header bar with the language label above code blocks.
    pub code_header: bool,
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self {
            bullet: "•".to_string(),
            code_header: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct PageConfig {
    pub numbers: bool,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct FontConfig {
    pub sans: bool,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LayoutConfig {
    /// Keep a section heading on the same page as the node after it.
    pub keep_heading_with_next: bool,
    /// Runs of list items up to this length are never split across pages.
    pub unbreakable_list_items: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            keep_heading_with_next: true,
            unbreakable_list_items: 5,
        }
    }
}

impl Config {
    /// The configuration bundled with the crate.
    pub fn compiled_default() -> Self {
        // build.rs validates the bundled file, so this only falls back if
        // the file and the structs drift apart.
        Self::from_toml_str(DEFAULT_CONFIG).unwrap_or_else(|e| {
            log::warn!("bundled default config rejected: {e}");
            Self::default()
        })
    }

    /// Parse a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load config from a TOML file, or return the bundled defaults if the
    /// file is missing or invalid.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => Self::from_toml_str(&content).unwrap_or_else(|e| {
                log::warn!("ignoring {}: {e}", path.display());
                Self::compiled_default()
            }),
            Err(e) => {
                log::debug!("no config at {}: {e}", path.display());
                Self::compiled_default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_default_matches_struct_defaults() {
        assert_eq!(Config::compiled_default(), Config::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = Config::from_toml_str("[page]\nnumbers = true\n[html]\nbullet = \"-\"\n").unwrap();
        assert!(config.page.numbers);
        assert_eq!(config.html.bullet, "-");
        assert!(config.html.code_header);
        assert_eq!(config.layout, LayoutConfig::default());
    }

    #[test]
    fn invalid_toml_is_an_error() {
        assert!(Config::from_toml_str("[page\nnumbers = 1").is_err());
    }

    #[test]
    fn missing_file_falls_back() {
        let config = Config::load(Path::new("/nonexistent/mentor.toml"));
        assert_eq!(config, Config::compiled_default());
    }
}
