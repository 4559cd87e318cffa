//! Error types raised at the edges of the result model.
//!
//! [`ContractViolation`] signals programmer misuse of a result (reading the
//! output of a failure, forcing success over recorded errors). These are
//! fail-fast: they are returned immediately and never replaced by defaults.
//!
//! [`StatusError`] is what a failed result turns into at an explicit throw
//! boundary. It has exactly one variant per [`FailureKind`].

use thiserror::Error;

use crate::status::FailureKind;

/// Misuse of the result API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractViolation {
    /// `Success` was passed where a failure kind is required.
    #[error("success is not a failure kind; use a success constructor instead")]
    SuccessIsNotAFailure,

    /// The primary status was set to success while errors are recorded.
    #[error("cannot set the primary status to success while {errors} error(s) are recorded")]
    SuccessWithErrors { errors: usize },

    /// A typed result was marked successful but has no output to carry.
    #[error("cannot mark a typed result successful without an output value")]
    SuccessWithoutOutput,

    /// The output of a failed result was read.
    #[error("cannot read the output of a failed result: {summary}")]
    OutputOfFailedResult { summary: String },

    /// A typed success was requested from an untyped successful state.
    #[error("cannot build a typed success from an untyped successful state: no value to attach")]
    TypedSuccessFromUntyped,

    /// A successful typed result was reinterpreted as another output type.
    #[error("cannot reparameterize a successful result from {from} to {to}")]
    ReparameterizeSuccess { from: String, to: String },
}

impl ContractViolation {
    /// Record the violation before handing it back to the caller.
    pub(crate) fn logged(self) -> Self {
        tracing::warn!(violation = %self, "result contract violated");
        self
    }
}

/// A failed result surfaced at a throw boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatusError {
    #[error("{0}")]
    Failure(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    AlreadyExists(String),
    #[error("{0}")]
    InvalidInput(String),
    #[error("{0}")]
    InvalidRequest(String),
    #[error("{0}")]
    DomainViolation(String),
    #[error("{0}")]
    InvariantViolation(String),
    #[error("{0}")]
    NotAllowed(String),
    #[error("{0}")]
    ConcurrencyViolation(String),
    #[error("{0}")]
    Cancelled(String),
    #[error("{0}")]
    TimedOut(String),
}

impl StatusError {
    /// Build the error mapped from `kind`.
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        let message = message.into();
        match kind {
            FailureKind::Failure => Self::Failure(message),
            FailureKind::NotFound => Self::NotFound(message),
            FailureKind::AlreadyExists => Self::AlreadyExists(message),
            FailureKind::InvalidInput => Self::InvalidInput(message),
            FailureKind::InvalidRequest => Self::InvalidRequest(message),
            FailureKind::DomainViolation => Self::DomainViolation(message),
            FailureKind::InvariantViolation => Self::InvariantViolation(message),
            FailureKind::NotAllowed => Self::NotAllowed(message),
            FailureKind::ConcurrencyViolation => Self::ConcurrencyViolation(message),
            FailureKind::Cancelled => Self::Cancelled(message),
            FailureKind::TimedOut => Self::TimedOut(message),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::Failure(_) => FailureKind::Failure,
            Self::NotFound(_) => FailureKind::NotFound,
            Self::AlreadyExists(_) => FailureKind::AlreadyExists,
            Self::InvalidInput(_) => FailureKind::InvalidInput,
            Self::InvalidRequest(_) => FailureKind::InvalidRequest,
            Self::DomainViolation(_) => FailureKind::DomainViolation,
            Self::InvariantViolation(_) => FailureKind::InvariantViolation,
            Self::NotAllowed(_) => FailureKind::NotAllowed,
            Self::ConcurrencyViolation(_) => FailureKind::ConcurrencyViolation,
            Self::Cancelled(_) => FailureKind::Cancelled,
            Self::TimedOut(_) => FailureKind::TimedOut,
        }
    }

    /// Name of the mapped error kind, e.g. `NotFound`.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Failure(_) => "Failure",
            Self::NotFound(_) => "NotFound",
            Self::AlreadyExists(_) => "AlreadyExists",
            Self::InvalidInput(_) => "InvalidInput",
            Self::InvalidRequest(_) => "InvalidRequest",
            Self::DomainViolation(_) => "DomainViolation",
            Self::InvariantViolation(_) => "InvariantViolation",
            Self::NotAllowed(_) => "NotAllowed",
            Self::ConcurrencyViolation(_) => "ConcurrencyViolation",
            Self::Cancelled(_) => "Cancelled",
            Self::TimedOut(_) => "TimedOut",
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Failure(m)
            | Self::NotFound(m)
            | Self::AlreadyExists(m)
            | Self::InvalidInput(m)
            | Self::InvalidRequest(m)
            | Self::DomainViolation(m)
            | Self::InvariantViolation(m)
            | Self::NotAllowed(m)
            | Self::ConcurrencyViolation(m)
            | Self::Cancelled(m)
            | Self::TimedOut(m) => m,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_maps_each_kind_one_to_one() {
        for kind in FailureKind::ALL {
            let err = StatusError::new(kind, "boom");
            assert_eq!(err.kind(), kind);
            assert_eq!(err.message(), "boom");
            assert_eq!(err.to_string(), "boom");
        }
        assert_eq!(StatusError::new(FailureKind::TimedOut, "").name(), "TimedOut");
    }

    #[test]
    fn contract_violation_display() {
        let err = ContractViolation::SuccessWithErrors { errors: 2 };
        assert_eq!(
            err.to_string(),
            "cannot set the primary status to success while 2 error(s) are recorded"
        );

        let err = ContractViolation::ReparameterizeSuccess {
            from: "i32".into(),
            to: "String".into(),
        };
        assert!(err.to_string().contains("from i32 to String"));
    }
}
