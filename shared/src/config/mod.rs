//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `environment` - Environment detection and logging configuration
//! - `verification` - User-facing strings of the phone verification flow

pub mod environment;
pub mod verification;

use serde::{Deserialize, Serialize};
use std::path::Path;

// Re-export commonly used types
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use verification::VerificationConfig;

/// Prefix of environment variables overriding configuration values,
/// e.g. `THREEPID__LOGGING__LEVEL=trace`
pub const ENV_PREFIX: &str = "THREEPID";

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    #[serde(default)]
    pub environment: Environment,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Verification flow configuration
    #[serde(default)]
    pub verification: VerificationConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            logging: LoggingConfig::for_environment(env),
            verification: VerificationConfig::default(),
        }
    }
}

impl AppConfig {
    /// Create configuration for a given environment
    pub fn for_environment(env: Environment) -> Self {
        Self {
            environment: env,
            logging: LoggingConfig::for_environment(env),
            verification: VerificationConfig::default(),
        }
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        Self::for_environment(Environment::from_env())
    }

    /// Load layered configuration
    ///
    /// Layers, lowest priority first:
    /// 1. Defaults for the detected environment
    /// 2. The environment's `.env` file, if present
    /// 3. The environment's TOML file (e.g. `config.development.toml`), if present
    /// 4. `path`, when given (must exist)
    /// 5. `THREEPID__*` environment variables
    pub fn load(path: Option<&Path>) -> Result<Self, ::config::ConfigError> {
        let env = Environment::from_env();
        // Missing .env files are fine
        let _ = dotenvy::from_filename(env.env_file());

        let defaults = ::config::Config::try_from(&Self::for_environment(env))?;
        let mut builder = ::config::Config::builder()
            .add_source(defaults)
            .add_source(::config::File::with_name(env.config_file()).required(false));

        if let Some(path) = path {
            builder = builder.add_source(::config::File::from(path).required(true));
        }

        builder
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }
}
