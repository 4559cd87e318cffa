//! A single recorded failure.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ContractViolation;
use crate::layer::Layer;
use crate::status::{FailureKind, StatusKind, short_type_name, type_tag};

/// One failure occurrence: what went wrong, where, and optionally why.
///
/// Records are immutable. Promotion produces retagged copies rather than
/// editing the layer in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ResultError {
    kind: FailureKind,
    layer: Layer,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    /// Fully qualified name of the output type the failed operation was
    /// expected to produce.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    expected_output: Option<String>,
}

impl ResultError {
    #[must_use]
    pub const fn new(kind: FailureKind, layer: Layer, message: Option<String>) -> Self {
        Self {
            kind,
            layer,
            message,
            expected_output: None,
        }
    }

    /// A failure tagged with the output type `T`.
    #[must_use]
    pub fn typed<T: ?Sized>(kind: FailureKind, layer: Layer, message: Option<String>) -> Self {
        Self {
            kind,
            layer,
            message,
            expected_output: Some(type_tag::<T>().to_string()),
        }
    }

    /// Build from a raw status, rejecting `Success`.
    ///
    /// # Errors
    ///
    /// Returns [`ContractViolation::SuccessIsNotAFailure`] when `status` is
    /// `StatusKind::Success`.
    pub fn try_new(
        status: StatusKind,
        layer: Layer,
        message: Option<String>,
    ) -> Result<Self, ContractViolation> {
        status
            .failure_kind()
            .map(|kind| Self::new(kind, layer, message))
            .ok_or_else(|| ContractViolation::SuccessIsNotAFailure.logged())
    }

    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        self.kind
    }

    #[must_use]
    pub const fn layer(&self) -> Layer {
        self.layer
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    #[must_use]
    pub fn expected_output(&self) -> Option<&str> {
        self.expected_output.as_deref()
    }

    /// The explicit message, or the kind's (typed) default when absent.
    #[must_use]
    pub fn describe(&self) -> String {
        match (&self.message, &self.expected_output) {
            (Some(message), _) => message.clone(),
            (None, Some(type_name)) => self.kind.typed_message(&short_type_name(type_name)),
            (None, None) => self.kind.default_message().to_string(),
        }
    }

    /// Copy of this record owned by `layer`.
    #[must_use]
    pub fn retagged(&self, layer: Layer) -> Self {
        Self {
            layer,
            ..self.clone()
        }
    }

    // -- filters ---------------------------------------------------------

    #[must_use]
    pub fn is_kind(&self, kind: FailureKind) -> bool {
        self.kind == kind
    }

    #[must_use]
    pub fn is_at_layer(&self, layer: Layer) -> bool {
        self.layer == layer
    }

    #[must_use]
    pub fn is_for_type<T: ?Sized>(&self) -> bool {
        self.expected_output.as_deref() == Some(type_tag::<T>())
    }
}

impl fmt::Display for ResultError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}: {}", self.kind, self.layer, self.describe())
    }
}
