use crate::utils::error::{EtlError, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

pub const DEFAULT_SETTINGS_FILE: &str = "toll-etl.toml";
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Optional local settings file. Every key may be omitted; the environment fills or overrides them.
///
/// ```toml
/// api_key = "..."
/// api_url = "https://apis.tollguru.com"
/// vehicle_type = "5AxlesTruck"
/// concurrency = 8
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    pub api_key: Option<String>,
    pub api_url: Option<String>,
    pub map_provider: Option<String>,
    pub vehicle_type: Option<String>,
    pub concurrency: Option<usize>,
    pub timeout_seconds: Option<u64>,
}

impl Settings {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Loads `explicit` if given (it must exist), otherwise the default file when present.
    pub fn discover(explicit: Option<&Path>) -> Result<Option<Self>> {
        match explicit {
            Some(path) => {
                tracing::debug!("Loading settings from {}", path.display());
                Self::from_file(path).map(Some)
            }
            None => {
                let default_path = Path::new(DEFAULT_SETTINGS_FILE);
                if default_path.is_file() {
                    tracing::debug!("Loading settings from {}", DEFAULT_SETTINGS_FILE);
                    Self::from_file(default_path).map(Some)
                } else {
                    Ok(None)
                }
            }
        }
    }
}

/// Variables from a dotenv file (`TOLLGURU_API_KEY=...`). Nothing is written into the process environment.
pub fn read_env_file<P: AsRef<Path>>(path: P) -> Result<HashMap<String, String>> {
    let mut vars = HashMap::new();
    for item in dotenvy::from_path_iter(path.as_ref())? {
        let (key, value) = item?;
        vars.insert(key, value);
    }
    Ok(vars)
}

/// Reads `.env` from the working directory when present.
pub fn discover_env_file() -> Result<HashMap<String, String>> {
    let path = Path::new(DEFAULT_ENV_FILE);
    if path.is_file() {
        tracing::debug!("Loading environment from {}", DEFAULT_ENV_FILE);
        read_env_file(path)
    } else {
        Ok(HashMap::new())
    }
}
