//! Exit-code configuration for process boundaries.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::num::NonZeroU8;
use strata_core::{ExitPolicy, FailureKind};

use crate::error::ConfigError;

const fn default_failure_exit_code() -> u8 {
    1
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BoundaryConfig {
    /// Exit code for a failed result when no per-kind code applies.
    #[serde(default = "default_failure_exit_code")]
    pub failure_exit_code: u8,

    /// Per-kind exit codes, keyed by failure kind tag (e.g. `cancelled`).
    #[serde(default)]
    pub kind_exit_codes: BTreeMap<String, u8>,
}

impl Default for BoundaryConfig {
    fn default() -> Self {
        Self {
            failure_exit_code: default_failure_exit_code(),
            kind_exit_codes: BTreeMap::new(),
        }
    }
}

impl BoundaryConfig {
    /// Build the exit policy described by this section.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a code is `0` (reserved for
    /// success) or a key is not a failure kind.
    pub fn exit_policy(&self) -> Result<ExitPolicy, ConfigError> {
        let mut policy = ExitPolicy::new(nonzero(
            "boundary.failure_exit_code",
            self.failure_exit_code,
        )?);

        for (name, code) in &self.kind_exit_codes {
            let field = format!("boundary.kind_exit_codes.{name}");
            let kind: FailureKind = name.parse().map_err(|e| ConfigError::InvalidValue {
                field: field.clone(),
                reason: format!("{e}"),
            })?;
            policy = policy.with_kind_code(kind, nonzero(&field, *code)?);
        }

        Ok(policy)
    }
}

fn nonzero(field: &str, code: u8) -> Result<NonZeroU8, ConfigError> {
    NonZeroU8::new(code).ok_or_else(|| ConfigError::InvalidValue {
        field: field.to_string(),
        reason: "exit code 0 is reserved for success".to_string(),
    })
}
