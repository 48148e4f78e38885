//! Pipeline configuration.
//!
//! Values come from the environment (optionally via a `.env` file), then
//! command line flags override them.

use std::ffi::OsString;
use std::path::PathBuf;

use crate::error::{ConfigError, ConfigResult};

pub const ENV_CSV: &str = "HAPPYHOUR_CSV";
pub const ENV_OUTPUT_DIR: &str = "HAPPYHOUR_OUTPUT_DIR";
pub const ENV_STATIC_DIR: &str = "HAPPYHOUR_STATIC_DIR";

const DEFAULT_CSV: &str = "bars.csv";
const DEFAULT_OUTPUT_DIR: &str = "public";
const DEFAULT_STATIC_DIR: &str = "static";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Spreadsheet export to read.
    pub csv_path: PathBuf,
    /// Root of the generated site.
    pub output_dir: PathBuf,
    /// Assets copied verbatim into `output_dir`.
    pub static_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from(DEFAULT_CSV),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
        }
    }
}

impl Config {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> ConfigResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var_os(key))
    }

    /// Build from any key lookup. Unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let read = |key: &str, default: &str| -> ConfigResult<PathBuf> {
            match lookup(key) {
                None => Ok(PathBuf::from(default)),
                Some(value) => {
                    let value = value
                        .into_string()
                        .map_err(|_| ConfigError::NotUnicode(key.to_string()))?;
                    if value.trim().is_empty() {
                        Err(ConfigError::Empty(key.to_string()))
                    } else {
                        Ok(PathBuf::from(value))
                    }
                }
            }
        };

        Ok(Self {
            csv_path: read(ENV_CSV, DEFAULT_CSV)?,
            output_dir: read(ENV_OUTPUT_DIR, DEFAULT_OUTPUT_DIR)?,
            static_dir: read(ENV_STATIC_DIR, DEFAULT_STATIC_DIR)?,
        })
    }

    pub fn with_csv(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.csv_path = path;
        }
        self
    }

    pub fn with_output_dir(mut self, dir: Option<PathBuf>) -> Self {
        if let Some(dir) = dir {
            self.output_dir = dir;
        }
        self
    }

    pub fn with_static_dir(mut self, dir: Option<PathBuf>) -> Self {
        if let Some(dir) = dir {
            self.static_dir = dir;
        }
        self
    }

    /// `<output>/data`
    pub fn data_dir(&self) -> PathBuf {
        self.output_dir.join("data")
    }

    /// `<output>/errors`
    pub fn errors_dir(&self) -> PathBuf {
        self.output_dir.join("errors")
    }
}
