use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::table::{LEVEL_COUNT, UnmatchedPolicy};

/// When a visibility toggle reaches the darkness buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefreshPolicy {
    /// Re-evaluate every buffered cell at the end of the next frame.
    #[default]
    Immediate,
    /// Leave the buffer alone until the host repaints tiles.
    Lazy,
}

/// Region lights settings, read once at startup.
///
/// ```toml
/// level_1 = "1-4,8"
/// level_7 = "60-63"
/// darkness_color = [16, 8, 32]
/// unmatched = "lit"
/// refresh_on_toggle = "immediate"
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RegionLightsConfig {
    pub level_1: String,
    pub level_2: String,
    pub level_3: String,
    pub level_4: String,
    pub level_5: String,
    pub level_6: String,
    pub level_7: String,
    pub darkness_color: [u8; 3],
    pub unmatched: UnmatchedPolicy,
    pub refresh_on_toggle: RefreshPolicy,
}

impl Default for RegionLightsConfig {
    fn default() -> Self {
        Self {
            level_1: stock_regions(1),
            level_2: stock_regions(2),
            level_3: stock_regions(3),
            level_4: stock_regions(4),
            level_5: stock_regions(5),
            level_6: stock_regions(6),
            level_7: stock_regions(7),
            darkness_color: [0, 0, 0],
            unmatched: UnmatchedPolicy::default(),
            refresh_on_toggle: RefreshPolicy::default(),
        }
    }
}

// Level n owns n, n+8, ..., n+56.
fn stock_regions(level: u32) -> String {
    (0..8)
        .map(|k| (level + 8 * k).to_string())
        .collect::<Vec<_>>()
        .join(",")
}

impl RegionLightsConfig {
    /// Config with the given level lists and every other field at its default.
    pub fn from_level_texts(texts: [&str; LEVEL_COUNT]) -> Self {
        let [l1, l2, l3, l4, l5, l6, l7] = texts.map(str::to_owned);
        Self {
            level_1: l1,
            level_2: l2,
            level_3: l3,
            level_4: l4,
            level_5: l5,
            level_6: l6,
            level_7: l7,
            ..Self::default()
        }
    }

    pub fn level_texts(&self) -> [&str; LEVEL_COUNT] {
        [
            self.level_1.as_str(),
            self.level_2.as_str(),
            self.level_3.as_str(),
            self.level_4.as_str(),
            self.level_5.as_str(),
            self.level_6.as_str(),
            self.level_7.as_str(),
        ]
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(ConfigError::Parse)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let s = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg = Self::from_toml_str(&s)?;
        log::debug!("region lights config loaded from {}", path.display());
        Ok(cfg)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Read { path: PathBuf, source: std::io::Error },
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read { path, source } => {
                write!(f, "read error for {}: {}", path.display(), source)
            }
            ConfigError::Parse(e) => write!(f, "parse error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Read { source, .. } => Some(source),
            ConfigError::Parse(e) => Some(e),
        }
    }
}
