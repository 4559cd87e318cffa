//! Folding independent results into one.
//!
//! Callers that fan out sub-operations let each one finish on its own, then
//! build a fresh [`Aggregate`] and feed it every result exactly once. The
//! inputs are only read; the aggregate owns the only state it mutates.

use crate::layer::Layer;
use crate::state::ResultState;
use crate::status::FailureKind;

/// Builder that merges sibling results into a fresh [`ResultState`].
///
/// ```
/// use strata_core::{Aggregate, FailureKind, Layer, Output, ResultState};
///
/// let loaded = Output::success(5, Layer::Repository);
/// let missing = ResultState::failure_with(FailureKind::NotFound, Layer::Repository, "user 7");
///
/// let merged = Aggregate::new(Layer::Service)
///     .include(&loaded)
///     .include(&missing)
///     .finish();
///
/// assert!(merged.is_failure());
/// assert_eq!(merged.error_count(), 1);
/// ```
#[derive(Debug, Clone)]
#[must_use = "an aggregate does nothing until `finish` is called"]
pub struct Aggregate {
    state: ResultState,
    override_kind: FailureKind,
    inputs: usize,
    failed: usize,
}

impl Aggregate {
    /// Start from a success owned by `layer`.
    pub const fn new(layer: Layer) -> Self {
        Self {
            state: ResultState::success(layer),
            override_kind: FailureKind::Failure,
            inputs: 0,
            failed: 0,
        }
    }

    /// Primary status to report when any input failed. Defaults to
    /// [`FailureKind::Failure`].
    pub const fn with_override(mut self, kind: FailureKind) -> Self {
        self.override_kind = kind;
        self
    }

    pub fn include<R>(mut self, result: &R) -> Self
    where
        R: AsRef<ResultState> + ?Sized,
    {
        self.push(result.as_ref());
        self
    }

    pub fn extend<'a, I>(mut self, results: I) -> Self
    where
        I: IntoIterator<Item = &'a ResultState>,
    {
        for result in results {
            self.push(result);
        }
        self
    }

    fn push(&mut self, result: &ResultState) {
        self.inputs += 1;
        if self.state.absorb(result, self.override_kind) {
            self.failed += 1;
        }
    }

    /// Number of inputs seen so far.
    #[must_use]
    pub const fn inputs(&self) -> usize {
        self.inputs
    }

    /// Number of failing inputs seen so far.
    #[must_use]
    pub const fn failed(&self) -> usize {
        self.failed
    }

    #[must_use]
    pub fn finish(self) -> ResultState {
        tracing::debug!(
            layer = %self.state.layer(),
            inputs = self.inputs,
            failed = self.failed,
            errors = self.state.error_count(),
            "aggregated results"
        );
        self.state
    }
}
