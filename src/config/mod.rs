#[cfg(feature = "cli")]
pub mod cli;
pub mod settings;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_required_field, validate_url,
    Validate,
};
use settings::Settings;
use std::collections::HashMap;

pub const API_KEY_VAR: &str = "TOLLGURU_API_KEY";
pub const API_URL_VAR: &str = "TOLLGURU_API_URL";
pub const DEFAULT_MAP_PROVIDER: &str = "osrm";
pub const DEFAULT_VEHICLE_TYPE: &str = "5AxlesTruck";

/// Pool size used when nothing is configured: `min(32, cpus + 4)`.
pub fn default_concurrency() -> usize {
    (num_cpus::get() + 4).min(32)
}

/// Everything the uploader needs to talk to the tolling API. Built once at startup and passed down.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub api_key: String,
    pub api_url: String,
    pub map_provider: String,
    pub vehicle_type: String,
    pub concurrency: usize,
    pub timeout_seconds: Option<u64>,
}

impl ApiConfig {
    pub fn new(api_key: impl Into<String>, api_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_url: api_url.into(),
            map_provider: DEFAULT_MAP_PROVIDER.to_string(),
            vehicle_type: DEFAULT_VEHICLE_TYPE.to_string(),
            concurrency: default_concurrency(),
            timeout_seconds: None,
        }
    }

    /// Process environment first, then the parsed `.env` variables, then the optional settings file.
    pub fn from_env(
        settings: Option<Settings>,
        env_file: HashMap<String, String>,
    ) -> Result<Self> {
        Self::resolve(
            settings,
            layered_env(|name| std::env::var(name).ok(), env_file),
        )
    }

    /// Merges `settings` with values from `env`; non-empty environment values win.
    /// Fails when the API key or URL is missing from both.
    pub fn resolve<F>(settings: Option<Settings>, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let settings = settings.unwrap_or_default();
        let from_env = |name: &str| env(name).filter(|v| !v.trim().is_empty());

        let api_key = from_env(API_KEY_VAR).or(settings.api_key);
        let api_url = from_env(API_URL_VAR).or(settings.api_url);

        let api_key = validate_required_field(API_KEY_VAR, &api_key)?.clone();
        let api_url = validate_required_field(API_URL_VAR, &api_url)?.clone();

        let config = Self {
            api_key,
            api_url,
            map_provider: settings
                .map_provider
                .unwrap_or_else(|| DEFAULT_MAP_PROVIDER.to_string()),
            vehicle_type: settings
                .vehicle_type
                .unwrap_or_else(|| DEFAULT_VEHICLE_TYPE.to_string()),
            concurrency: settings.concurrency.unwrap_or_else(default_concurrency),
            timeout_seconds: settings.timeout_seconds,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_concurrency(mut self, concurrency: Option<usize>) -> Self {
        if let Some(concurrency) = concurrency {
            self.concurrency = concurrency;
        }
        self
    }

    pub fn with_timeout(mut self, timeout_seconds: Option<u64>) -> Self {
        if timeout_seconds.is_some() {
            self.timeout_seconds = timeout_seconds;
        }
        self
    }
}

/// Looks `name` up in `primary` first; blank or missing values fall through to `fallback`.
pub fn layered_env<F>(
    primary: F,
    fallback: HashMap<String, String>,
) -> impl Fn(&str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    move |name: &str| {
        primary(name)
            .filter(|v| !v.trim().is_empty())
            .or_else(|| fallback.get(name).cloned())
    }
}

impl Validate for ApiConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string(API_KEY_VAR, &self.api_key)?;
        validate_url(API_URL_VAR, &self.api_url)?;
        validate_non_empty_string("map_provider", &self.map_provider)?;
        validate_non_empty_string("vehicle_type", &self.vehicle_type)?;
        validate_positive_number("concurrency", self.concurrency, 1)?;
        if let Some(timeout) = self.timeout_seconds {
            validate_positive_number("timeout_seconds", timeout as usize, 1)?;
        }
        Ok(())
    }
}

impl ConfigProvider for ApiConfig {
    fn api_key(&self) -> &str {
        &self.api_key
    }

    fn api_url(&self) -> &str {
        &self.api_url
    }

    fn map_provider(&self) -> &str {
        &self.map_provider
    }

    fn vehicle_type(&self) -> &str {
        &self.vehicle_type
    }

    fn concurrency(&self) -> usize {
        self.concurrency
    }

    fn timeout_seconds(&self) -> Option<u64> {
        self.timeout_seconds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::EtlError;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn test_resolve_from_environment() {
        let config = ApiConfig::resolve(
            None,
            env_of(&[(API_KEY_VAR, "k"), (API_URL_VAR, "https://apis.tollguru.com")]),
        )
        .unwrap();

        assert_eq!(config.api_key, "k");
        assert_eq!(config.api_url, "https://apis.tollguru.com");
        assert_eq!(config.map_provider, "osrm");
        assert_eq!(config.vehicle_type, "5AxlesTruck");
        assert_eq!(config.concurrency, default_concurrency());
        assert_eq!(config.timeout_seconds, None);
    }

    #[test]
    fn test_environment_overrides_settings_file() {
        let settings = Settings {
            api_key: Some("file-key".to_string()),
            api_url: Some("https://file.example.com".to_string()),
            concurrency: Some(3),
            ..Settings::default()
        };

        let config =
            ApiConfig::resolve(Some(settings), env_of(&[(API_KEY_VAR, "env-key")])).unwrap();

        assert_eq!(config.api_key, "env-key");
        assert_eq!(config.api_url, "https://file.example.com");
        assert_eq!(config.concurrency, 3);
    }

    #[test]
    fn test_blank_environment_value_falls_back_to_settings() {
        let settings = Settings {
            api_key: Some("file-key".to_string()),
            api_url: Some("https://file.example.com".to_string()),
            ..Settings::default()
        };

        let config = ApiConfig::resolve(Some(settings), env_of(&[(API_KEY_VAR, "  ")])).unwrap();
        assert_eq!(config.api_key, "file-key");
    }

    #[test]
    fn test_missing_api_key_is_fatal() {
        let err = ApiConfig::resolve(None, env_of(&[(API_URL_VAR, "https://x.example.com")]))
            .unwrap_err();
        assert!(matches!(err, EtlError::MissingConfigError { ref field } if field == API_KEY_VAR));
    }

    #[test]
    fn test_missing_api_url_is_fatal() {
        let err = ApiConfig::resolve(None, env_of(&[(API_KEY_VAR, "k")])).unwrap_err();
        assert!(matches!(err, EtlError::MissingConfigError { ref field } if field == API_URL_VAR));
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        let err = ApiConfig::resolve(
            None,
            env_of(&[(API_KEY_VAR, "k"), (API_URL_VAR, "apis.tollguru.com")]),
        )
        .unwrap_err();
        assert!(matches!(err, EtlError::InvalidConfigValueError { .. }));
    }

    #[test]
    fn test_zero_concurrency_is_rejected() {
        let config = ApiConfig::new("k", "https://apis.tollguru.com").with_concurrency(Some(0));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_resolve_from_env_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "TOLLGURU_API_KEY=abc").unwrap();
        writeln!(file, "TOLLGURU_API_URL=https://apis.tollguru.com").unwrap();
        let file_vars = settings::read_env_file(file.path()).unwrap();

        let config = ApiConfig::resolve(None, layered_env(env_of(&[]), file_vars)).unwrap();

        assert_eq!(config.api_key, "abc");
        assert_eq!(config.api_url, "https://apis.tollguru.com");
    }

    #[test]
    fn test_process_environment_wins_over_env_file() {
        let file_vars = HashMap::from([
            (API_KEY_VAR.to_string(), "file-key".to_string()),
            (API_URL_VAR.to_string(), "https://file.example.com".to_string()),
        ]);

        let env = layered_env(
            env_of(&[(API_KEY_VAR, "process-key"), (API_URL_VAR, "")]),
            file_vars,
        );
        let config = ApiConfig::resolve(None, env).unwrap();

        assert_eq!(config.api_key, "process-key");
        assert_eq!(config.api_url, "https://file.example.com");
    }

    #[test]
    fn test_env_file_wins_over_settings_file() {
        let settings = Settings {
            api_key: Some("toml-key".to_string()),
            api_url: Some("https://toml.example.com".to_string()),
            ..Settings::default()
        };
        let file_vars = HashMap::from([(API_KEY_VAR.to_string(), "dotenv-key".to_string())]);

        let config =
            ApiConfig::resolve(Some(settings), layered_env(env_of(&[]), file_vars)).unwrap();

        assert_eq!(config.api_key, "dotenv-key");
        assert_eq!(config.api_url, "https://toml.example.com");
    }
}
