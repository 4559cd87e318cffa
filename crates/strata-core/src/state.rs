//! The result state machine.
//!
//! ```text
//! success ──add_error / set_primary_status(kind)──▶ failed
//! failed  ──set_primary_status(success)──▶ failed   (rejected while errors exist)
//! ```
//!
//! Invariants held by [`ResultState`]:
//! - `is_failure() == !is_successful()`, and failure means the primary
//!   status is not `Success`.
//! - The error list is append-only for the lifetime of a state.
//! - The owning layer is fixed at construction; [`ResultState::promote`] and
//!   [`ResultState::copy`] produce new states rather than retagging in place.

use schemars::JsonSchema;
use serde::Serialize;
use std::fmt;

use crate::aggregate::Aggregate;
use crate::error::{ContractViolation, StatusError};
use crate::layer::Layer;
use crate::result_error::ResultError;
use crate::status::{FailureKind, StatusKind, type_tag};

/// Separator used by [`ResultState::error_messages_to_string`].
pub const DEFAULT_MESSAGE_SEPARATOR: &str = "\n";

/// Outcome of an operation: a primary status, the owning layer, and every
/// recorded failure in order of occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct ResultState {
    status: StatusKind,
    layer: Layer,
    errors: Vec<ResultError>,
}

impl ResultState {
    // =========================================================================
    // Constructors
    // =========================================================================

    #[must_use]
    pub const fn success(layer: Layer) -> Self {
        Self {
            status: StatusKind::Success,
            layer,
            errors: Vec::new(),
        }
    }

    /// A failure with no explicit message.
    #[must_use]
    pub fn failure(kind: FailureKind, layer: Layer) -> Self {
        Self::from_error(ResultError::new(kind, layer, None))
    }

    /// A failure explained by `because`.
    #[must_use]
    pub fn failure_with(kind: FailureKind, layer: Layer, because: impl Into<String>) -> Self {
        Self::from_error(ResultError::new(kind, layer, Some(because.into())))
    }

    /// A failure of an operation that was expected to produce a `T`.
    #[must_use]
    pub fn failure_typed<T: ?Sized>(
        kind: FailureKind,
        layer: Layer,
        because: Option<String>,
    ) -> Self {
        Self::from_error(ResultError::typed::<T>(kind, layer, because))
    }

    /// A failure from a raw status.
    ///
    /// # Errors
    ///
    /// Returns [`ContractViolation::SuccessIsNotAFailure`] when `status` is
    /// `StatusKind::Success`.
    pub fn try_failure(
        status: StatusKind,
        layer: Layer,
        because: Option<String>,
    ) -> Result<Self, ContractViolation> {
        ResultError::try_new(status, layer, because).map(Self::from_error)
    }

    /// A failed state holding exactly `error`, owned by the error's layer.
    #[must_use]
    pub fn from_error(error: ResultError) -> Self {
        Self {
            status: StatusKind::Failed(error.kind()),
            layer: error.layer(),
            errors: vec![error],
        }
    }

    /// Copy `source`. When `new_layer` is given, the copy and every copied
    /// error are owned by that layer. `source` is untouched.
    #[must_use]
    pub fn copy(source: &Self, new_layer: Option<Layer>) -> Self {
        match new_layer {
            None => source.clone(),
            Some(layer) => Self {
                status: source.status,
                layer,
                errors: source.errors.iter().map(|e| e.retagged(layer)).collect(),
            },
        }
    }

    /// Copy this state into `layer`, retagging every error.
    #[must_use]
    pub fn promote(&self, layer: Layer) -> Self {
        tracing::trace!(
            from = %self.layer,
            to = %layer,
            errors = self.errors.len(),
            upward = self.layer.is_promotion_to(layer),
            "promoting result"
        );
        Self::copy(self, Some(layer))
    }

    /// Merge independent results into a fresh state owned by `layer`.
    ///
    /// Successful iff every input is successful. Otherwise the primary status
    /// is [`FailureKind::Failure`] and the errors are the in-order
    /// concatenation of every failing input's errors.
    #[must_use]
    pub fn merge<'a, I>(results: I, layer: Layer) -> Self
    where
        I: IntoIterator<Item = &'a Self>,
    {
        Aggregate::new(layer).extend(results).finish()
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Replace the primary status.
    ///
    /// # Errors
    ///
    /// Returns [`ContractViolation::SuccessWithErrors`] when `status` is
    /// success and errors are recorded. The state is left unchanged.
    pub fn set_primary_status(
        &mut self,
        status: impl Into<StatusKind>,
    ) -> Result<(), ContractViolation> {
        let status = status.into();
        if status.is_success() && !self.errors.is_empty() {
            return Err(ContractViolation::SuccessWithErrors {
                errors: self.errors.len(),
            }
            .logged());
        }
        self.status = status;
        Ok(())
    }

    /// Set the primary status to `kind` and record one error per message,
    /// each owned by this state's layer. With no messages only the status
    /// changes.
    pub fn add_error<I, S>(&mut self, kind: FailureKind, messages: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let layer = self.layer;
        self.add_errors_with(kind, messages, |message| {
            ResultError::new(kind, layer, Some(message))
        });
    }

    pub(crate) fn add_errors_with<I, S, F>(&mut self, kind: FailureKind, messages: I, make: F)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(String) -> ResultError,
    {
        self.status = StatusKind::Failed(kind);
        self.errors
            .extend(messages.into_iter().map(|m| make(m.into())));
    }

    /// Fold `others` into this state.
    ///
    /// Successful inputs are ignored. A failing input forces the primary
    /// status to `override_kind` and contributes its errors, retagged to this
    /// state's layer. A failing input with no recorded errors still forces
    /// failure but contributes nothing.
    pub fn combine_with<'a, I>(&mut self, others: I, override_kind: FailureKind)
    where
        I: IntoIterator<Item = &'a Self>,
    {
        for other in others {
            self.absorb(other, override_kind);
        }
    }

    /// [`combine_with`](Self::combine_with) using [`FailureKind::Failure`].
    pub fn combine<'a, I>(&mut self, others: I)
    where
        I: IntoIterator<Item = &'a Self>,
    {
        self.combine_with(others, FailureKind::Failure);
    }

    /// Returns whether `other` failed.
    pub(crate) fn absorb(&mut self, other: &Self, override_kind: FailureKind) -> bool {
        if other.is_successful() {
            return false;
        }
        let layer = self.layer;
        self.errors
            .extend(other.errors.iter().map(|e| e.retagged(layer)));
        self.status = StatusKind::Failed(override_kind);
        true
    }

    // =========================================================================
    // Queries
    // =========================================================================

    #[must_use]
    pub const fn status(&self) -> StatusKind {
        self.status
    }

    #[must_use]
    pub const fn layer(&self) -> Layer {
        self.layer
    }

    #[must_use]
    pub fn errors(&self) -> &[ResultError] {
        &self.errors
    }

    #[must_use]
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    #[must_use]
    pub fn first_error(&self) -> Option<&ResultError> {
        self.errors.first()
    }

    #[must_use]
    pub const fn is_successful(&self) -> bool {
        self.status.is_success()
    }

    #[must_use]
    pub const fn is_failure(&self) -> bool {
        self.status.is_failure()
    }

    #[must_use]
    pub fn contains_error_of_kind(&self, kind: FailureKind) -> bool {
        self.errors.iter().any(|e| e.is_kind(kind))
    }

    #[must_use]
    pub fn contains_error_at_layer(&self, layer: Layer) -> bool {
        self.errors.iter().any(|e| e.is_at_layer(layer))
    }

    pub fn errors_of_kind(&self, kind: FailureKind) -> impl Iterator<Item = &ResultError> {
        self.errors.iter().filter(move |e| e.is_kind(kind))
    }

    pub fn errors_at_layer(&self, layer: Layer) -> impl Iterator<Item = &ResultError> {
        self.errors.iter().filter(move |e| e.is_at_layer(layer))
    }

    pub fn errors_of_type<T: ?Sized>(&self) -> impl Iterator<Item = &ResultError> {
        let tag = type_tag::<T>();
        self.errors
            .iter()
            .filter(move |e| e.expected_output() == Some(tag))
    }

    /// "{primary status message} on the {layer name}".
    #[must_use]
    pub fn main_error_summary(&self) -> String {
        format!(
            "{} on the {}",
            self.status.default_message(),
            self.layer.display_name()
        )
    }

    /// Every error message joined with newlines, for an external logger.
    #[must_use]
    pub fn error_messages_to_string(&self) -> String {
        self.error_messages_joined(DEFAULT_MESSAGE_SEPARATOR)
    }

    #[must_use]
    pub fn error_messages_joined(&self, separator: &str) -> String {
        self.errors
            .iter()
            .map(ResultError::describe)
            .collect::<Vec<_>>()
            .join(separator)
    }

    // =========================================================================
    // Throw boundary
    // =========================================================================

    /// The mapped [`StatusError`] for a failed state, with
    /// [`main_error_summary`](Self::main_error_summary) as its message.
    #[must_use]
    pub fn status_error(&self) -> Option<StatusError> {
        self.status
            .failure_kind()
            .map(|kind| StatusError::new(kind, self.main_error_summary()))
    }

    /// # Errors
    ///
    /// Returns the [`StatusError`] mapped from the primary status when this
    /// state failed.
    pub fn throw_if_failure(&self) -> Result<(), StatusError> {
        self.status_error().map_or(Ok(()), Err)
    }

    /// Like [`throw_if_failure`](Self::throw_if_failure) with a caller-chosen
    /// message.
    ///
    /// # Errors
    ///
    /// Returns the [`StatusError`] mapped from the primary status when this
    /// state failed.
    pub fn throw_if_failure_with(&self, message: impl Into<String>) -> Result<(), StatusError> {
        match self.status.failure_kind() {
            Some(kind) => Err(StatusError::new(kind, message)),
            None => Ok(()),
        }
    }
}

impl Default for ResultState {
    fn default() -> Self {
        Self::success(Layer::Unknown)
    }
}

impl AsRef<Self> for ResultState {
    fn as_ref(&self) -> &Self {
        self
    }
}

impl fmt::Display for ResultState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.main_error_summary())
    }
}
