use std::env;
use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::domain::user::policy::UsernamePolicy;
use crate::domain::user::policy::DEFAULT_USERNAME_ALLOWED_PATTERN;
use crate::domain::user::policy::DEFAULT_USERNAME_RESERVED_PATTERN;

/// Default advertised token lifetime: one day.
pub const DEFAULT_TOKEN_LIFETIME_SECONDS: i64 = 24 * 60 * 60;

/// Longest accepted token lifetime (100 years).
pub const MAX_TOKEN_LIFETIME_SECONDS: i64 = 100 * 365 * 24 * 60 * 60;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub keys: KeysConfig,
    pub policy: PolicyFileConfig,
    #[serde(default)]
    pub database: Option<DatabaseConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct KeysConfig {
    /// Directory holding `private.pem` and `public.pem`
    pub directory: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PolicyFileConfig {
    /// JSON file with username rules and token lifetime (optional)
    pub file: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (APP_SERVER__HTTP_PORT, APP_KEYS__DIRECTORY, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    /// 4. Built-in defaults
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .set_default("server.http_port", 8888)?
            .set_default("keys.directory", "keys")?
            .set_default("policy.file", "config/policy.json")?
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: APP_DATABASE__URL=postgres://... overrides database.url
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = configuration.try_deserialize()?;

        Ok(config)
    }
}

/// Error loading the username and token policy file.
#[derive(Debug, Error)]
pub enum PolicyConfigError {
    #[error("Failed to read policy file {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("Policy file {} is not valid JSON: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid username pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Username rules and token lifetime, immutable after startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyConfig {
    pub username_allowed_regex: String,
    pub username_reserved_regex: String,
    pub token_lifetime: i64,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            username_allowed_regex: DEFAULT_USERNAME_ALLOWED_PATTERN.to_string(),
            username_reserved_regex: DEFAULT_USERNAME_RESERVED_PATTERN.to_string(),
            token_lifetime: DEFAULT_TOKEN_LIFETIME_SECONDS,
        }
    }
}

impl PolicyConfig {
    /// Load the policy from a JSON file.
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    /// * `Read` - File exists but could not be read
    /// * `Parse` - File is not valid JSON
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PolicyConfigError> {
        let path = path.as_ref();

        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "No policy file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(PolicyConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let value: Value =
            serde_json::from_str(&contents).map_err(|source| PolicyConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self::from_json(&value))
    }

    /// Read policy fields from a JSON document.
    ///
    /// Each field falls back to its default when absent or of the wrong type.
    /// `tokenLifetime` also falls back when outside `1..=MAX_TOKEN_LIFETIME_SECONDS`.
    pub fn from_json(value: &Value) -> Self {
        let defaults = Self::default();

        let username_allowed_regex = value
            .get("usernameAllowedRegEx")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or(defaults.username_allowed_regex);

        let username_reserved_regex = value
            .get("usernameReservedRegEx")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or(defaults.username_reserved_regex);

        let token_lifetime = value
            .get("tokenLifetime")
            .and_then(Value::as_i64)
            .filter(|seconds| (1..=MAX_TOKEN_LIFETIME_SECONDS).contains(seconds))
            .unwrap_or(defaults.token_lifetime);

        Self {
            username_allowed_regex,
            username_reserved_regex,
            token_lifetime,
        }
    }

    /// Compile the username rules.
    pub fn username_policy(&self) -> Result<UsernamePolicy, PolicyConfigError> {
        Ok(UsernamePolicy::new(
            &self.username_allowed_regex,
            &self.username_reserved_regex,
        )?)
    }
}
