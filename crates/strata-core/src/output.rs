//! Payload-bearing results.
//!
//! An [`Output<T>`] is a [`ResultState`] plus a value that exists exactly
//! when the state is successful. Every operation here keeps that pairing:
//! recording an error drops the value, and a carrier can never become
//! successful without one.

use schemars::JsonSchema;
use serde::Serialize;
use std::fmt;

use crate::aggregate::Aggregate;
use crate::error::{ContractViolation, StatusError};
use crate::layer::Layer;
use crate::result_error::ResultError;
use crate::state::ResultState;
use crate::status::{FailureKind, StatusKind, short_type_name, type_tag};

/// A result that carries a `T` on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct Output<T> {
    #[serde(flatten)]
    state: ResultState,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<T>,
}

impl<T> Output<T> {
    // =========================================================================
    // Constructors
    // =========================================================================

    pub fn success(value: T, layer: Layer) -> Self {
        Self {
            state: ResultState::success(layer),
            value: Some(value),
        }
    }

    /// A failure of an operation that was expected to produce a `T`.
    #[must_use]
    pub fn failure(kind: FailureKind, layer: Layer) -> Self {
        Self::failed(ResultState::failure_typed::<T>(kind, layer, None))
    }

    #[must_use]
    pub fn failure_with(kind: FailureKind, layer: Layer, because: impl Into<String>) -> Self {
        Self::failed(ResultState::failure_typed::<T>(
            kind,
            layer,
            Some(because.into()),
        ))
    }

    /// Carry a failed untyped state as a typed result.
    ///
    /// # Errors
    ///
    /// Returns [`ContractViolation::TypedSuccessFromUntyped`] when `state`
    /// is successful: there is no value to attach.
    pub fn from_failed_state(state: ResultState) -> Result<Self, ContractViolation> {
        if state.is_successful() {
            return Err(ContractViolation::TypedSuccessFromUntyped.logged());
        }
        Ok(Self::failed(state))
    }

    const fn failed(state: ResultState) -> Self {
        Self { state, value: None }
    }

    /// Success with `value` iff every input succeeded; otherwise a failed
    /// carrier holding the merged errors.
    pub fn merge_with_value<'a, I>(results: I, value: T, layer: Layer) -> Self
    where
        I: IntoIterator<Item = &'a ResultState>,
    {
        let state = Aggregate::new(layer).extend(results).finish();
        if state.is_successful() {
            Self::success(value, layer)
        } else {
            Self::failed(state)
        }
    }

    // =========================================================================
    // State
    // =========================================================================

    #[must_use]
    pub const fn state(&self) -> &ResultState {
        &self.state
    }

    #[must_use]
    pub const fn status(&self) -> StatusKind {
        self.state.status()
    }

    #[must_use]
    pub const fn layer(&self) -> Layer {
        self.state.layer()
    }

    #[must_use]
    pub fn errors(&self) -> &[ResultError] {
        self.state.errors()
    }

    #[must_use]
    pub const fn is_successful(&self) -> bool {
        self.state.is_successful()
    }

    #[must_use]
    pub const fn is_failure(&self) -> bool {
        self.state.is_failure()
    }

    #[must_use]
    pub const fn has_output(&self) -> bool {
        self.value.is_some()
    }

    // =========================================================================
    // Output access
    // =========================================================================

    /// The carried value.
    ///
    /// # Errors
    ///
    /// Returns [`ContractViolation::OutputOfFailedResult`] when this result
    /// failed.
    pub fn output(&self) -> Result<&T, ContractViolation> {
        self.value.as_ref().ok_or_else(|| self.access_violation())
    }

    /// Consume the carrier and return its value.
    ///
    /// # Errors
    ///
    /// Returns [`ContractViolation::OutputOfFailedResult`] when this result
    /// failed.
    pub fn into_output(self) -> Result<T, ContractViolation> {
        match self.value {
            Some(value) => Ok(value),
            None => Err(access_violation(&self.state)),
        }
    }

    fn access_violation(&self) -> ContractViolation {
        access_violation(&self.state)
    }

    #[must_use]
    pub const fn try_output(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn output_or(self, fallback: T) -> T {
        self.value.unwrap_or(fallback)
    }

    pub fn output_or_default(self) -> T
    where
        T: Default,
    {
        self.value.unwrap_or_default()
    }

    pub fn into_option(self) -> Option<T> {
        self.value
    }

    /// Convert at a throw boundary.
    ///
    /// # Errors
    ///
    /// Returns the [`StatusError`] mapped from the primary status when this
    /// result failed.
    pub fn into_result(self) -> Result<T, StatusError> {
        let error = self.state.status_error();
        match (self.value, error) {
            (Some(value), None) => Ok(value),
            (_, Some(error)) => Err(error),
            (None, None) => Err(StatusError::new(
                FailureKind::InvariantViolation,
                self.state.main_error_summary(),
            )),
        }
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Record a failure against this carrier. The value is dropped.
    pub fn add_error<I, S>(&mut self, kind: FailureKind, messages: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let layer = self.state.layer();
        self.state.add_errors_with(kind, messages, |message| {
            ResultError::typed::<T>(kind, layer, Some(message))
        });
        self.value = None;
    }

    /// Replace the primary status. A failure status drops the value.
    ///
    /// # Errors
    ///
    /// Returns [`ContractViolation::SuccessWithErrors`] when errors are
    /// recorded, or [`ContractViolation::SuccessWithoutOutput`] when `status`
    /// is success and no value is carried. The carrier is left unchanged.
    pub fn set_primary_status(
        &mut self,
        status: impl Into<StatusKind>,
    ) -> Result<(), ContractViolation> {
        let status = status.into();
        if status.is_success() && self.state.error_count() == 0 && self.value.is_none() {
            return Err(ContractViolation::SuccessWithoutOutput.logged());
        }
        self.state.set_primary_status(status)?;
        if status.is_failure() {
            self.value = None;
        }
        Ok(())
    }

    /// Fold `others` into this carrier; see [`ResultState::combine_with`].
    /// The value is dropped if any input failed.
    pub fn combine_with<'a, I>(&mut self, others: I, override_kind: FailureKind)
    where
        I: IntoIterator<Item = &'a ResultState>,
    {
        self.state.combine_with(others, override_kind);
        if self.state.is_failure() {
            self.value = None;
        }
    }

    // =========================================================================
    // Conversion
    // =========================================================================

    /// Copy `source`, optionally into `new_layer`.
    #[must_use]
    pub fn copy(source: &Self, new_layer: Option<Layer>) -> Self
    where
        T: Clone,
    {
        Self {
            state: ResultState::copy(&source.state, new_layer),
            value: source.value.clone(),
        }
    }

    /// Copy another typed result: the value when it succeeded, nothing
    /// otherwise.
    #[must_use]
    pub fn from_typed(source: &Self) -> Self
    where
        T: Clone,
    {
        Self::copy(source, None)
    }

    /// Copy into `layer`, retagging every error.
    #[must_use]
    pub fn promote(&self, layer: Layer) -> Self
    where
        T: Clone,
    {
        Self {
            state: self.state.promote(layer),
            value: self.value.clone(),
        }
    }

    /// Consuming counterpart of [`promote`](Self::promote).
    #[must_use]
    pub fn into_layer(self, layer: Layer) -> Self {
        Self {
            state: self.state.promote(layer),
            value: self.value,
        }
    }

    /// Transform the value of a success. Failures keep their errors.
    pub fn map<U, F>(self, f: F) -> Output<U>
    where
        F: FnOnce(T) -> U,
    {
        Output {
            state: self.state,
            value: self.value.map(f),
        }
    }

    /// Drop the payload type, keeping status, layer, and errors.
    #[must_use]
    pub fn without_output(self) -> ResultState {
        self.state
    }

    /// Reinterpret a failure as a failure of another output type.
    ///
    /// # Errors
    ///
    /// Returns [`ContractViolation::ReparameterizeSuccess`] when this result
    /// succeeded: its value cannot be reinterpreted.
    pub fn reparameterize<U>(self) -> Result<Output<U>, ContractViolation> {
        if self.is_successful() {
            return Err(ContractViolation::ReparameterizeSuccess {
                from: short_type_name(type_tag::<T>()),
                to: short_type_name(type_tag::<U>()),
            }
            .logged());
        }
        Ok(Output::failed(self.state))
    }
}

fn access_violation(state: &ResultState) -> ContractViolation {
    ContractViolation::OutputOfFailedResult {
        summary: state.main_error_summary(),
    }
    .logged()
}

impl<T> AsRef<ResultState> for Output<T> {
    fn as_ref(&self) -> &ResultState {
        &self.state
    }
}

impl<T> From<Output<T>> for ResultState {
    fn from(output: Output<T>) -> Self {
        output.state
    }
}

impl<T> fmt::Display for Output<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.state, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn success_carries_value() {
        let out = Output::success(10, Layer::Service);
        assert!(out.has_output());
        assert_eq!(out.output(), Ok(&10));
        assert_eq!(out.try_output(), Some(&10));
        assert_eq!(out.into_output(), Ok(10));
    }

    #[test]
    fn failure_output_access_is_rejected() {
        let out = Output::<i32>::failure_with(FailureKind::Failure, Layer::Service, "x");
        assert!(!out.has_output());
        let err = out.output().unwrap_err();
        assert!(matches!(err, ContractViolation::OutputOfFailedResult { .. }));
        assert!(out.clone().into_output().is_err());
        assert_eq!(out.try_output(), None);
        assert_eq!(out.clone().output_or(7), 7);
        assert_eq!(out.clone().output_or_default(), 0);
        assert_eq!(out.into_option(), None);
    }

    #[test]
    fn typed_failure_tags_the_output_type() {
        let out = Output::<String>::failure(FailureKind::NotFound, Layer::Repository);
        assert!(out.errors()[0].is_for_type::<String>());
        assert_eq!(
            out.state().error_messages_to_string(),
            "The requested String was not found"
        );
    }

    #[test]
    fn from_failed_state_requires_failure() {
        let ok = ResultState::success(Layer::Service);
        assert_eq!(
            Output::<i32>::from_failed_state(ok),
            Err(ContractViolation::TypedSuccessFromUntyped)
        );

        let bad = ResultState::failure(FailureKind::NotAllowed, Layer::Service);
        let out = Output::<i32>::from_failed_state(bad).unwrap();
        assert!(out.is_failure());
        assert!(!out.has_output());
    }

    #[test]
    fn add_error_drops_value() {
        let mut out = Output::success("draft".to_string(), Layer::Service);
        out.add_error(FailureKind::InvalidInput, ["title missing"]);
        assert!(out.is_failure());
        assert!(!out.has_output());
        assert!(out.errors()[0].is_for_type::<String>());
    }

    #[test]
    fn set_primary_status_keeps_output_pairing() {
        let mut out = Output::success(1u8, Layer::Service);
        out.set_primary_status(FailureKind::Cancelled).unwrap();
        assert!(out.is_failure());
        assert!(!out.has_output());

        let before = out.clone();
        assert_eq!(
            out.set_primary_status(StatusKind::Success),
            Err(ContractViolation::SuccessWithoutOutput)
        );
        assert_eq!(out, before);
    }

    #[test]
    fn combine_with_failure_drops_value() {
        let mut out = Output::success(3, Layer::Service);
        let ok = ResultState::success(Layer::Service);
        out.combine_with([&ok], FailureKind::Failure);
        assert_eq!(out.output(), Ok(&3));

        let bad = ResultState::failure(FailureKind::NotFound, Layer::Repository);
        out.combine_with([&bad], FailureKind::Failure);
        assert!(!out.has_output());
        assert_eq!(out.errors()[0].layer(), Layer::Service);
    }

    #[test]
    fn reparameterize_only_on_failure() {
        let ok = Output::success(1, Layer::Service);
        let err = ok.reparameterize::<String>().unwrap_err();
        assert_eq!(
            err,
            ContractViolation::ReparameterizeSuccess {
                from: "i32".into(),
                to: "String".into(),
            }
        );

        let bad = Output::<i32>::failure_with(FailureKind::NotFound, Layer::Service, "n");
        let moved: Output<String> = bad.reparameterize().unwrap();
        assert!(moved.is_failure());
        assert_eq!(moved.errors()[0].message(), Some("n"));
    }

    #[test]
    fn map_transforms_success_only() {
        let doubled = Output::success(4, Layer::Service).map(|v| v * 2);
        assert_eq!(doubled.output(), Ok(&8));

        let failed = Output::<i32>::failure(FailureKind::Failure, Layer::Service).map(|v| v * 2);
        assert!(failed.is_failure());
    }

    #[test]
    fn from_typed_copies_value_when_successful() {
        let ok = Output::success(vec![1, 2], Layer::Repository);
        assert_eq!(Output::from_typed(&ok).output(), Ok(&vec![1, 2]));

        let bad = Output::<Vec<i32>>::failure(FailureKind::Failure, Layer::Repository);
        assert!(!Output::from_typed(&bad).has_output());
    }

    #[test]
    fn merge_with_value() {
        let ok = ResultState::success(Layer::Repository);
        let merged = Output::merge_with_value([&ok, &ok], "done", Layer::Service);
        assert_eq!(merged.output(), Ok(&"done"));

        let bad = ResultState::failure_with(FailureKind::Failure, Layer::Repository, "a");
        let merged = Output::merge_with_value([&ok, &bad], "done", Layer::Service);
        assert!(merged.is_failure());
        assert_eq!(merged.errors().len(), 1);
    }

    #[test]
    fn into_result_maps_status() {
        assert_eq!(Output::success(2, Layer::Web).into_result(), Ok(2));
        let err = Output::<i32>::failure(FailureKind::TimedOut, Layer::Web)
            .into_result()
            .unwrap_err();
        assert_eq!(err.kind(), FailureKind::TimedOut);
    }
}
