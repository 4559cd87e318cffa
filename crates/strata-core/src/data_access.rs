//! Translation table for data-access collaborators.
//!
//! Storage adapters report their own failure modes; this module is the only
//! place they are mapped onto [`FailureKind`]. An adapter hands the core a
//! `(kind, layer, message)` triple and nothing else.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::layer::Layer;
use crate::state::ResultState;
use crate::status::FailureKind;

/// Failure modes a data-access adapter can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DataAccessFailure {
    /// Optimistic concurrency check failed (stale row version, etc.).
    ConcurrencyConflict,
    /// The caller observed cancellation while the operation was in flight.
    Cancelled,
    Other,
}

impl DataAccessFailure {
    #[must_use]
    pub const fn failure_kind(self) -> FailureKind {
        match self {
            Self::ConcurrencyConflict => FailureKind::ConcurrencyViolation,
            Self::Cancelled => FailureKind::Cancelled,
            Self::Other => FailureKind::Failure,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ConcurrencyConflict => "concurrency_conflict",
            Self::Cancelled => "cancelled",
            Self::Other => "other",
        }
    }

    /// The failed state reported by an adapter at `layer`.
    #[must_use]
    pub fn into_state(self, layer: Layer, message: impl Into<String>) -> ResultState {
        ResultState::from_data_access(self, layer, message)
    }
}

impl fmt::Display for DataAccessFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<DataAccessFailure> for FailureKind {
    fn from(failure: DataAccessFailure) -> Self {
        failure.failure_kind()
    }
}

impl ResultState {
    #[must_use]
    pub fn from_data_access(
        failure: DataAccessFailure,
        layer: Layer,
        message: impl Into<String>,
    ) -> Self {
        let kind = failure.failure_kind();
        tracing::debug!(
            failure = failure.as_str(),
            kind = kind.as_str(),
            %layer,
            "translated data-access failure"
        );
        Self::failure_with(kind, layer, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::StatusKind;
    use rstest::rstest;

    #[rstest]
    #[case(DataAccessFailure::ConcurrencyConflict, FailureKind::ConcurrencyViolation)]
    #[case(DataAccessFailure::Cancelled, FailureKind::Cancelled)]
    #[case(DataAccessFailure::Other, FailureKind::Failure)]
    fn translation_table(#[case] failure: DataAccessFailure, #[case] kind: FailureKind) {
        assert_eq!(failure.failure_kind(), kind);
        assert_eq!(FailureKind::from(failure), kind);
    }

    #[test]
    fn into_state_records_the_message_at_layer() {
        let state = DataAccessFailure::ConcurrencyConflict
            .into_state(Layer::Infrastructure, "row version 3 is stale");
        assert_eq!(
            state.status(),
            StatusKind::Failed(FailureKind::ConcurrencyViolation)
        );
        assert_eq!(state.layer(), Layer::Infrastructure);
        assert_eq!(state.errors()[0].message(), Some("row version 3 is stale"));
    }
}
