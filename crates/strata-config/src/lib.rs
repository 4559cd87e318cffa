//! # strata-config
//!
//! Layered configuration for the strata process boundaries using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`STRATA_*` prefix, `__` as separator)
//! 2. Project-level `.strata/config.toml`
//! 3. User-level `~/.config/strata/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! `STRATA_BOUNDARY__FAILURE_EXIT_CODE` -> `boundary.failure_exit_code`,
//! `STRATA_BOUNDARY__KIND_EXIT_CODES__CANCELLED` -> `boundary.kind_exit_codes.cancelled`,
//! `STRATA_DIAGNOSTICS__INCLUDE_LAYER` -> `diagnostics.include_layer`.
//!
//! # Usage
//!
//! ```no_run
//! use strata_config::StrataConfig;
//! use strata_core::{FailureKind, Layer, ResultState};
//!
//! let config = StrataConfig::load().expect("config");
//! let policy = config.boundary.exit_policy().expect("valid exit codes");
//!
//! let result = ResultState::failure(FailureKind::Cancelled, Layer::Web);
//! eprintln!("{}", config.diagnostics.render(&result));
//! std::process::exit(i32::from(policy.code_for(&result)));
//! ```

mod boundary;
mod diagnostics;
mod error;

pub use boundary::BoundaryConfig;
pub use diagnostics::DiagnosticsConfig;
pub use error::ConfigError;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StrataConfig {
    #[serde(default)]
    pub boundary: BoundaryConfig,
    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
}

impl StrataConfig {
    /// Load configuration from all sources (TOML files + environment variables)
    /// and validate it.
    ///
    /// Does NOT call `dotenvy` -- use [`load_with_dotenv`](Self::load_with_dotenv)
    /// if you need `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source cannot be parsed or a value is
    /// invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load configuration with `.env` file support from the current directory.
    ///
    /// # Errors
    ///
    /// See [`load`](Self::load).
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        if let Err(error) = dotenvy::dotenv() {
            tracing::debug!(%error, "no .env file loaded");
        }
        Self::load()
    }

    /// Extract and validate from an arbitrary figment.
    ///
    /// # Errors
    ///
    /// See [`load`](Self::load).
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Check values figment cannot type-check.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a zero exit code or an
    /// unknown failure kind key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.boundary.exit_policy().map(|_| ())
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".strata/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("STRATA_").split("__"))
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("strata").join("config.toml"))
    }
}
