use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::error::{HubspotError, Result};
use crate::models::{FuzzySearchOptions, PropertyMatchOptions};
use crate::services::client::{Auth, HubspotClient, DEFAULT_BASE_URL};

/// Client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub api: ApiSettings,
    #[serde(default)]
    pub search: SearchSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub access_token: Option<String>,
    /// Whole-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchSettings {
    #[serde(default = "default_search_limit")]
    pub default_limit: usize,
    #[serde(default = "default_recursive")]
    pub recursive: bool,
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            default_limit: default_search_limit(),
            recursive: default_recursive(),
            max_pages: default_max_pages(),
            similarity_threshold: default_similarity_threshold(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    5
}

fn default_search_limit() -> usize {
    5
}

fn default_recursive() -> bool {
    true
}

fn default_max_pages() -> usize {
    100
}

fn default_similarity_threshold() -> f64 {
    0.70
}

impl Settings {
    /// Load configuration from files and environment variables
    ///
    /// Sources, later overriding earlier:
    /// 1. Configuration file (config/default.toml)
    /// 2. Local overrides (config/local.toml)
    /// 3. Environment variables, e.g. HUBSPOT__API__API_KEY -> api.api_key
    /// 4. The conventional HUBSPOT_API_KEY / HUBSPOT_ACCESS_TOKEN names
    pub fn load() -> std::result::Result<Self, ConfigError> {
        // Pick up a .env file when there is one
        dotenv::dotenv().ok();

        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(
                Environment::with_prefix("HUBSPOT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = apply_conventional_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> std::result::Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("HUBSPOT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Build a client from these settings.
    pub fn client(&self) -> Result<HubspotClient> {
        HubspotClient::with_timeouts(
            self.api.base_url.clone(),
            self.api.auth()?,
            Duration::from_secs(self.api.timeout_secs),
            Duration::from_secs(self.api.connect_timeout_secs),
        )
    }
}

impl ApiSettings {
    /// Credentials for the client. An access token wins over an API key
    /// when both are configured.
    pub fn auth(&self) -> Result<Auth> {
        if let Some(token) = &self.access_token {
            return Ok(Auth::AccessToken(token.clone()));
        }

        if let Some(key) = &self.api_key {
            return Ok(Auth::ApiKey(key.clone()));
        }

        Err(HubspotError::Config(
            "neither api_key nor access_token is configured".to_string(),
        ))
    }
}

impl From<&SearchSettings> for PropertyMatchOptions {
    fn from(settings: &SearchSettings) -> Self {
        Self {
            limit: settings.default_limit,
            recursive: settings.recursive,
            max_pages: settings.max_pages,
            ..Default::default()
        }
    }
}

impl From<&SearchSettings> for FuzzySearchOptions {
    fn from(settings: &SearchSettings) -> Self {
        Self {
            limit: settings.default_limit,
            threshold: settings.similarity_threshold,
            max_pages: settings.max_pages,
            ..Default::default()
        }
    }
}

/// Accept the conventional credential variable names on top of the
/// prefixed ones the Environment source already handles
fn apply_conventional_env_vars(settings: Config) -> std::result::Result<Config, ConfigError> {
    use std::env;

    let api_key = env::var("HUBSPOT_API_KEY").ok();
    let access_token = env::var("HUBSPOT_ACCESS_TOKEN").ok();

    let mut builder = Config::builder().add_source(settings);

    if let Some(api_key) = api_key {
        builder = builder.set_override("api.api_key", api_key)?;
    }
    if let Some(access_token) = access_token {
        builder = builder.set_override("api.access_token", access_token)?;
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_search_settings() {
        let search = SearchSettings::default();
        assert_eq!(search.default_limit, 5);
        assert!(search.recursive);
        assert_eq!(search.max_pages, 100);
        assert_eq!(search.similarity_threshold, 0.70);
    }

    #[test]
    fn test_default_base_url() {
        assert_eq!(default_base_url(), "https://api.hubapi.com");
    }

    fn create_api_settings(
        api_key: Option<&str>,
        access_token: Option<&str>,
    ) -> ApiSettings {
        ApiSettings {
            base_url: default_base_url(),
            api_key: api_key.map(str::to_string),
            access_token: access_token.map(str::to_string),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }

    #[test]
    fn test_auth_prefers_access_token() {
        let api = create_api_settings(Some("key"), Some("token"));

        assert!(matches!(api.auth(), Ok(Auth::AccessToken(t)) if t == "token"));
    }

    #[test]
    fn test_auth_requires_some_credential() {
        let api = create_api_settings(None, None);

        assert!(matches!(api.auth(), Err(HubspotError::Config(_))));
    }

    #[test]
    fn test_search_settings_feed_match_options() {
        let search = SearchSettings {
            default_limit: 12,
            recursive: false,
            max_pages: 9,
            similarity_threshold: 0.9,
        };

        let property: PropertyMatchOptions = (&search).into();
        assert_eq!(property.limit, 12);
        assert!(!property.recursive);
        assert_eq!(property.max_pages, 9);

        let fuzzy: FuzzySearchOptions = (&search).into();
        assert_eq!(fuzzy.limit, 12);
        assert_eq!(fuzzy.threshold, 0.9);
        assert_eq!(fuzzy.max_pages, 9);
    }
}
