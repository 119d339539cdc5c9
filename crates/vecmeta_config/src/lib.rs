use config::{Config, Environment, File};
use serde::Deserialize;
use std::{
    fmt,
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::debug;
use vecmeta_core::{ReturnMetadata, MAX_LIST_COUNT, MAX_TOP_K};

pub const DEFAULT_BASE_URL: &str = "https://api.cloudflare.com/client/v4";
pub const DEFAULT_DIMENSIONS: usize = 768;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_PAGE_SIZE: usize = 100;
pub const ENV_PREFIX: &str = "VECMETA";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config could not be loaded: {0}")]
    Load(#[from] config::ConfigError),

    #[error("{field} must not be empty or whitespace")]
    EmptyField { field: &'static str },

    #[error("query.dimensions must be greater than zero")]
    InvalidDimensions,

    #[error("query.top_k must be in range [1, 100], got {0}")]
    InvalidTopK(usize),

    #[error("cloudflare.timeout_secs must be greater than zero")]
    InvalidTimeout,

    #[error("query.page_size must be in range [1, 1000], got {0}")]
    InvalidPageSize(usize),
}

#[derive(Deserialize, Clone)]
#[serde(rename_all = "snake_case")]
pub enum Auth {
    ApiToken { token: String },
    GlobalKey { email: String, key: String },
}

impl fmt::Debug for Auth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Auth::ApiToken { .. } => f.debug_struct("ApiToken").field("token", &"***").finish(),
            Auth::GlobalKey { email, .. } => f
                .debug_struct("GlobalKey")
                .field("email", email)
                .field("key", &"***")
                .finish(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct Cloudflare {
    pub account_id: String,
    pub index_name: String,
    pub auth: Auth,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct QuerySettings {
    #[serde(default = "default_dimensions")]
    pub dimensions: usize,
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    #[serde(default)]
    pub return_metadata: ReturnMetadata,
    #[serde(default)]
    pub return_values: bool,
    /// Ids requested per call when listing the whole index.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl Default for QuerySettings {
    fn default() -> Self {
        Self {
            dimensions: DEFAULT_DIMENSIONS,
            top_k: MAX_TOP_K,
            return_metadata: ReturnMetadata::None,
            return_values: false,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub enum VectorIndex {
    #[serde(rename = "cloudflare")]
    Cloudflare(Cloudflare),
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub cloudflare: Cloudflare,
    #[serde(default)]
    pub query: QuerySettings,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_dimensions() -> usize {
    DEFAULT_DIMENSIONS
}

fn default_top_k() -> usize {
    MAX_TOP_K
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

/// `~/.config/vecmeta/vecmeta.toml`, when a home directory is known.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config/vecmeta/vecmeta.toml"))
}

impl AppConfig {
    /// Loads the user config file (if present), then `explicit` (which must
    /// exist when given), then `VECMETA__*` environment variables.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        Self::from_sources(
            default_config_path().as_deref(),
            explicit,
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
    }

    pub fn from_sources(
        user_file: Option<&Path>,
        explicit: Option<&Path>,
        environment: Environment,
    ) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        if let Some(path) = user_file {
            debug!("reading optional config file {}", path.display());
            builder = builder.add_source(File::from(path).required(false));
        }

        if let Some(path) = explicit {
            debug!("reading config file {}", path.display());
            builder = builder.add_source(File::from(path).required(true));
        }

        let config = builder
            .add_source(environment)
            .build()?
            .try_deserialize::<Self>()?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        non_empty("cloudflare.account_id", &self.cloudflare.account_id)?;
        non_empty("cloudflare.index_name", &self.cloudflare.index_name)?;
        non_empty("cloudflare.base_url", &self.cloudflare.base_url)?;

        match &self.cloudflare.auth {
            Auth::ApiToken { token } => non_empty("cloudflare.auth.api_token.token", token)?,
            Auth::GlobalKey { email, key } => {
                non_empty("cloudflare.auth.global_key.email", email)?;
                non_empty("cloudflare.auth.global_key.key", key)?;
            }
        }

        if self.cloudflare.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout);
        }

        if self.query.dimensions == 0 {
            return Err(ConfigError::InvalidDimensions);
        }

        if !(1..=MAX_TOP_K).contains(&self.query.top_k) {
            return Err(ConfigError::InvalidTopK(self.query.top_k));
        }

        if !(1..=MAX_LIST_COUNT).contains(&self.query.page_size) {
            return Err(ConfigError::InvalidPageSize(self.query.page_size));
        }

        Ok(())
    }

    pub fn vector_index(&self) -> VectorIndex {
        VectorIndex::Cloudflare(self.cloudflare.clone())
    }
}

fn non_empty(field: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::EmptyField { field });
    }
    Ok(())
}
