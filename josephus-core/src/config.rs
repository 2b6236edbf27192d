use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::clock::DEFAULT_VELOCITY;

pub const DEFAULT_SOLDIERS: usize = 41;
pub const DEFAULT_STEP: usize = 2;
pub const SETTINGS_FILE: &str = "josephus.json";

/// Bad command-line values. Never fatal: the default is used instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigWarning {
    #[error("invalid number of soldiers {0:?}, using default value of {fallback}", fallback = DEFAULT_SOLDIERS)]
    InvalidSoldiers(String),
    #[error("invalid K {0:?}, using default value of {fallback}", fallback = DEFAULT_STEP)]
    InvalidStep(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse settings: {0}")]
    Json(#[from] serde_json::Error),
}

/// Circle size N and step K.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircleConfig {
    pub soldiers: usize,
    pub step: usize,
}

impl Default for CircleConfig {
    fn default() -> Self {
        Self {
            soldiers: DEFAULT_SOLDIERS,
            step: DEFAULT_STEP,
        }
    }
}

impl CircleConfig {
    /// Reads `N` and `K` from positional arguments (program name already
    /// stripped). N must be above 1; K must be in `(1, N]`.
    pub fn from_args<I>(args: I) -> (Self, Vec<ConfigWarning>)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut config = Self::default();
        let mut warnings = Vec::new();
        let mut args = args.into_iter();

        if let Some(raw) = args.next() {
            let raw = raw.as_ref();
            match parse_count(raw) {
                Some(soldiers) if soldiers > 1 => config.soldiers = soldiers,
                _ => warnings.push(ConfigWarning::InvalidSoldiers(raw.to_string())),
            }
        }

        if let Some(raw) = args.next() {
            let raw = raw.as_ref();
            match parse_count(raw) {
                Some(step) if step > 1 && step <= config.soldiers => config.step = step,
                _ => warnings.push(ConfigWarning::InvalidStep(raw.to_string())),
            }
        }

        (config, warnings)
    }
}

/// Whole-string parse: `"12abc"` is rejected rather than read as 12.
fn parse_count(raw: &str) -> Option<usize> {
    raw.trim().parse::<i64>().ok().and_then(|value| usize::try_from(value).ok())
}

/// Viewer preferences, read from `josephus.json` when present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerSettings {
    pub velocity: i32,
    /// The last soldier standing keeps its life instead of playing the finale.
    pub spare_survivor: bool,
    pub window_size: u32,
    pub asset_root: String,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            velocity: DEFAULT_VELOCITY,
            spare_survivor: true,
            window_size: 900,
            asset_root: "res".to_string(),
        }
    }
}

impl ViewerSettings {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// `Ok(None)` when the file does not exist.
    pub fn load(path: &Path) -> Result<Option<Self>, ConfigError> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        Self::from_json(&raw).map(Some)
    }
}
