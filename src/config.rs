//! Configuration loading for the CLI and embedding applications.
//!
//! A `hilite.toml` file can set the default mode, palette, and density,
//! override the code-promotion keyword heuristic, and define custom
//! palettes. The engine itself never reads configuration; everything is
//! resolved here and handed to it as plain values.

use crate::annotation::{AnnotationCode, Density, RenderMode};
use crate::palette::{Palette, PaletteRegistry};
use crate::sanitize::ResponseSanitizer;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::Path;

/// Config file names probed in the working directory, in order.
pub const CONFIG_FILE_NAMES: &[&str] = &["hilite.toml", ".hilite.toml"];

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {source}")]
    IoError {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse config: {0}")]
    ParseError(String),
}

fn default_mode() -> String {
    "highlights".to_string()
}

fn default_palette() -> String {
    "vibrant".to_string()
}

fn default_density() -> String {
    "auto".to_string()
}

/// `[global]` section: the defaults applied when the CLI flags are absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct GlobalConfig {
    pub mode: String,
    pub palette: String,
    pub density: String,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        GlobalConfig {
            mode: default_mode(),
            palette: default_palette(),
            density: default_density(),
        }
    }
}

impl GlobalConfig {
    /// Mode names are resolved leniently; unknown names fall back to
    /// highlights rather than failing the load.
    pub fn render_mode(&self) -> RenderMode {
        RenderMode::from_name(&self.mode)
    }

    pub fn density(&self) -> Density {
        Density::from_name(&self.density)
    }
}

/// `[promote]` section: the multi-line code classification heuristic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PromoteConfig {
    /// Replaces the built-in keyword list when non-empty.
    pub keywords: Vec<String>,
}

/// One `[palettes.<name>]` section: color tables keyed by marker letters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PaletteConfig {
    pub background: BTreeMap<String, String>,
    pub underline: BTreeMap<String, String>,
}

impl PaletteConfig {
    fn to_palette(&self, name: &str) -> Result<Palette, ConfigError> {
        let convert = |table: &BTreeMap<String, String>,
                       which: &str|
         -> Result<HashMap<AnnotationCode, String>, ConfigError> {
            table
                .iter()
                .map(|(marker, color)| {
                    let code = AnnotationCode::from_marker(marker).ok_or_else(|| {
                        ConfigError::ParseError(format!(
                            "palette '{name}' {which} table uses unknown annotation code '{marker}'"
                        ))
                    })?;
                    Ok((code, color.clone()))
                })
                .collect()
        };
        Ok(Palette {
            name: name.to_string(),
            background: convert(&self.background, "background")?,
            underline: convert(&self.underline, "underline")?,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    pub global: GlobalConfig,
    pub promote: PromoteConfig,
    pub palettes: BTreeMap<String, PaletteConfig>,
}

impl Config {
    /// Parse a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Load a config file from an explicit path.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::IoError {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Probe the working directory for a config file. Absence is not an
    /// error; a present-but-invalid file is.
    pub fn discover() -> Result<Option<Self>, ConfigError> {
        for name in CONFIG_FILE_NAMES {
            let path = Path::new(name);
            if path.is_file() {
                log::debug!("loading config from {name}");
                return Self::load(path).map(Some);
            }
        }
        Ok(None)
    }

    /// Registry of built-in palettes plus the config-defined ones.
    pub fn palette_registry(&self) -> Result<PaletteRegistry, ConfigError> {
        let custom: Vec<Palette> = self
            .palettes
            .iter()
            .map(|(name, palette)| palette.to_palette(name))
            .collect::<Result<_, _>>()?;
        Ok(PaletteRegistry::with_custom(custom))
    }

    /// Sanitizer with the configured promotion heuristic.
    pub fn sanitizer(&self) -> ResponseSanitizer {
        ResponseSanitizer::with_keywords(self.promote.keywords.iter().cloned())
    }
}
