use dicebag_lib::solver::Options;
use dicebag_lib::solver::DEFAULT_MAX_COUNT;
use serde::Deserialize;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::info;
use tracing::warn;

const HISTORY_FILE: &str = "history";

/// REPL settings, read from a RON file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Config {
    pub(crate) max_count: u64,
    pub(crate) history_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_count: DEFAULT_MAX_COUNT,
            history_file: HISTORY_FILE.to_owned(),
        }
    }
}

impl Config {
    /// Read the file at `path`, or fall back to defaults when it is missing
    pub(crate) fn load(path: &Path) -> Result<Self, String> {
        match fs::read_to_string(path) {
            Ok(content) => {
                let config = ron::de::from_str(&content)
                    .map_err(|e| format!("invalid config `{}`: {}", path.display(), e))?;
                info!("Config loaded from `{:?}`", path);
                Ok(config)
            }
            Err(error) => {
                warn!("Could not read config `{:?}`: {}", path, error);
                Ok(Self::default())
            }
        }
    }

    pub(crate) fn options(&self) -> Options {
        Options {
            max_count: self.max_count,
        }
    }
}
