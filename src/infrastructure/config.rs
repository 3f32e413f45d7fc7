//! Configuration infrastructure
//!
//! Settings are layered with the `config` crate:
//! 1. Built-in defaults (the `defaults` module)
//! 2. An optional JSON file (`{config_dir}/doozie-search/config.json`)
//! 3. Environment variables, e.g. `DOOZIE__API__BASE_URL`

#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "DOOZIE";

/// Separator between nested keys in environment overrides
pub const ENV_SEPARATOR: &str = "__";

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Backend search service connection
    pub api: ApiConfig,

    /// Search behavior
    pub search: SearchConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Backend search service connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL including the version segment, e.g. `https://api.doozie.shop/v1`
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_seconds: u64,

    /// User agent sent with every request
    pub user_agent: String,

    /// Client-side request quota
    pub max_requests_per_second: u32,
}

/// Search behavior settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Keyword used to populate the first page
    pub initial_keyword: String,

    /// Items requested from each marketplace per page
    pub hits_per_platform: u32,
}

/// Logging configuration settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "error", "warn", "info", "debug", "trace"
    pub level: String,

    /// Enable JSON formatted logs
    pub json_format: bool,

    /// Enable console output
    pub console_output: bool,

    /// Enable file output
    pub file_output: bool,

    /// Directory for log files; relative to the executable when unset
    pub directory: Option<PathBuf>,

    /// Module-specific log level filters (e.g., "reqwest": "info")
    pub module_filters: HashMap<String, String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::API_BASE_URL.to_string(),
            timeout_seconds: defaults::REQUEST_TIMEOUT_SECONDS,
            user_agent: defaults::USER_AGENT.to_string(),
            max_requests_per_second: defaults::MAX_REQUESTS_PER_SECOND,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            initial_keyword: defaults::INITIAL_KEYWORD.to_string(),
            hits_per_platform: defaults::HITS_PER_PLATFORM,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::LOG_LEVEL.to_string(),
            json_format: defaults::LOG_JSON_FORMAT,
            // Console logs would interleave with the interactive shell
            console_output: defaults::LOG_CONSOLE_OUTPUT,
            file_output: defaults::LOG_FILE_OUTPUT,
            directory: None,
            module_filters: {
                let mut filters = HashMap::new();
                filters.insert("reqwest".to_string(), "info".to_string());
                filters.insert("hyper".to_string(), "warn".to_string());
                filters.insert("h2".to_string(), "warn".to_string());
                filters
            },
        }
    }
}

impl AppConfig {
    /// Load defaults, then the file at `path` if it exists, then `DOOZIE__*`
    /// environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, None)
    }

    /// Same as [`AppConfig::load`] with an explicit environment map
    ///
    /// `env == None` reads the process environment.
    pub fn load_with_env(path: Option<&Path>, env: Option<HashMap<String, String>>) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(
                config::File::from(path)
                    .format(config::FileFormat::Json)
                    .required(false),
            );
        }

        let environment = config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator(ENV_SEPARATOR)
            .separator(ENV_SEPARATOR)
            .try_parsing(true)
            .source(env);

        let settings = builder
            .add_source(environment)
            .build()
            .context("Failed to assemble configuration sources")?;

        let config: Self = settings
            .try_deserialize()
            .context("Failed to parse configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the HTTP client cannot work with
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.api.base_url)
            .with_context(|| format!("Invalid api.base_url: {}", self.api.base_url))?;
        anyhow::ensure!(
            self.api.max_requests_per_second > 0,
            "api.max_requests_per_second must be greater than 0"
        );
        anyhow::ensure!(
            self.search.hits_per_platform > 0,
            "search.hits_per_platform must be greater than 0"
        );
        anyhow::ensure!(
            !self.search.initial_keyword.trim().is_empty(),
            "search.initial_keyword must not be blank"
        );
        Ok(())
    }
}

/// Configuration manager for locating and writing the settings file
pub struct ConfigManager {
    pub config_path: PathBuf,
}

impl ConfigManager {
    /// Get the application configuration directory
    pub fn get_config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get user config directory")?
            .join(defaults::APP_DIR_NAME);

        Ok(config_dir)
    }

    /// Manager for the default settings file location
    pub fn new() -> Result<Self> {
        let config_path = Self::get_config_dir()?.join(defaults::CONFIG_FILE_NAME);
        Ok(Self { config_path })
    }

    /// Manager for an explicit settings file
    pub fn with_path(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    /// Load the layered configuration rooted at this manager's file
    pub fn load_config(&self) -> Result<AppConfig> {
        let config = AppConfig::load(Some(&self.config_path))?;
        if self.config_path.exists() {
            info!("Loaded configuration from: {:?}", self.config_path);
        }
        Ok(config)
    }

    /// Write defaults unless a file already exists; returns true when written
    pub async fn initialize(&self) -> Result<bool> {
        if self.config_path.exists() {
            info!("Configuration already present: {:?}", self.config_path);
            return Ok(false);
        }

        self.save_config(&AppConfig::default()).await?;
        info!("✅ Initial configuration written");
        Ok(true)
    }

    /// Save configuration to file
    pub async fn save_config(&self, config: &AppConfig) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)
                .await
                .context("Failed to create config directory")?;
        }

        let content =
            serde_json::to_string_pretty(config).context("Failed to serialize configuration")?;

        fs::write(&self.config_path, content)
            .await
            .context("Failed to write configuration file")?;

        info!("Saved configuration to: {:?}", self.config_path);
        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }
}

/// Backend endpoint paths, relative to `api.base_url`
pub mod endpoints {
    /// Combined Rakuten + Yahoo search
    pub const SEARCH_ITEMS: &str = "items/search";

    /// Keyword log used for recommender training
    pub const SAVE_KEYWORDS: &str = "search/save-keywords";

    /// Item detail prefix, followed by `{platform}/{item_id}`
    pub const ITEM_DETAILS: &str = "items";
}

/// Default configuration values
pub mod defaults {
    /// Production search service
    pub const API_BASE_URL: &str = "https://api.doozie.shop/v1";

    /// Default request timeout in seconds
    pub const REQUEST_TIMEOUT_SECONDS: u64 = 30;

    pub const USER_AGENT: &str = concat!("doozie-search/", env!("CARGO_PKG_VERSION"));

    /// Default client-side request quota
    pub const MAX_REQUESTS_PER_SECOND: u32 = 5;

    /// Keyword shown on first load
    pub const INITIAL_KEYWORD: &str = "shirt";

    /// Items requested from each marketplace
    pub const HITS_PER_PLATFORM: u32 = 20;

    pub const APP_DIR_NAME: &str = "doozie-search";

    pub const CONFIG_FILE_NAME: &str = "config.json";

    // Log configuration defaults
    pub const LOG_LEVEL: &str = "info";

    pub const LOG_JSON_FORMAT: bool = false;

    pub const LOG_CONSOLE_OUTPUT: bool = false;

    pub const LOG_FILE_OUTPUT: bool = true;

    pub const LOG_FILE_NAME: &str = "doozie-search.log";
}

/// URL building helper functions
pub mod utils {
    use url::Url;

    /// Join `path` onto `base_url`, keeping any path segment already in the base
    ///
    /// `endpoint_url("https://api.doozie.shop/v1", "items/search")` gives
    /// `https://api.doozie.shop/v1/items/search`.
    pub fn endpoint_url(base_url: &str, path: &str) -> Result<Url, url::ParseError> {
        let mut base = Url::parse(base_url)?;
        if !base.path().ends_with('/') {
            let with_slash = format!("{}/", base.path());
            base.set_path(&with_slash);
        }
        base.join(path.trim_start_matches('/'))
    }

    /// `{base}/items/{platform}/{item_id}` with the item id percent-encoded
    pub fn item_details_url(
        base_url: &str,
        platform: &str,
        item_id: &str,
    ) -> Result<Url, url::ParseError> {
        let mut url = endpoint_url(base_url, super::endpoints::ITEM_DETAILS)?;
        url.path_segments_mut()
            .map_err(|()| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .push(platform)
            .push(item_id);
        Ok(url)
    }
}
