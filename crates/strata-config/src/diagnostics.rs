//! Rendering of failure details for an external logger.

use serde::{Deserialize, Serialize};
use strata_core::{ResultError, ResultState};

fn default_separator() -> String {
    strata_core::state::DEFAULT_MESSAGE_SEPARATOR.to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DiagnosticsConfig {
    /// Separator placed between error messages.
    #[serde(default = "default_separator")]
    pub separator: String,

    /// Prefix each message with its kind and owning layer.
    #[serde(default)]
    pub include_layer: bool,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            separator: default_separator(),
            include_layer: false,
        }
    }
}

impl DiagnosticsConfig {
    /// Join the error messages of `state` as configured.
    #[must_use]
    pub fn render(&self, state: &ResultState) -> String {
        if self.include_layer {
            state
                .errors()
                .iter()
                .map(ResultError::to_string)
                .collect::<Vec<_>>()
                .join(&self.separator)
        } else {
            state.error_messages_joined(&self.separator)
        }
    }
}
