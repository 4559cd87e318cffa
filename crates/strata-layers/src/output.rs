//! Typed results bound to one layer.

use std::marker::PhantomData;
use std::ops::Deref;

use strata_core::{ContractViolation, FailureKind, Output, ResultState, StatusError, StatusKind};

use crate::result::LayerResult;
use crate::tags::{
    EntityLayer, InfraLayer, LayerTag, MapperLayer, RepoLayer, ServiceLayer, UseCaseLayer,
    WebLayer,
};

/// An [`Output<T>`] owned by the layer `L`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerOutput<L: LayerTag, T> {
    inner: Output<T>,
    layer: PhantomData<L>,
}

impl<L: LayerTag, T> LayerOutput<L, T> {
    const fn wrap(inner: Output<T>) -> Self {
        Self {
            inner,
            layer: PhantomData,
        }
    }

    // =========================================================================
    // Factories
    // =========================================================================

    pub fn pass(value: T) -> Self {
        Self::wrap(Output::success(value, L::LAYER))
    }

    #[must_use]
    pub fn fail() -> Self {
        Self::wrap(Output::failure(FailureKind::Failure, L::LAYER))
    }

    #[must_use]
    pub fn fail_with(because: impl Into<String>) -> Self {
        Self::fail_of(FailureKind::Failure, because)
    }

    #[must_use]
    pub fn fail_of(kind: FailureKind, because: impl Into<String>) -> Self {
        Self::wrap(Output::failure_with(kind, L::LAYER, because))
    }

    named_failures!();

    /// Carry a failed state as a typed result of this layer.
    ///
    /// # Errors
    ///
    /// Returns [`ContractViolation::TypedSuccessFromUntyped`] when `source`
    /// is successful.
    pub fn from_failed_state<R>(source: &R) -> Result<Self, ContractViolation>
    where
        R: AsRef<ResultState> + ?Sized,
    {
        Output::from_failed_state(source.as_ref().promote(L::LAYER)).map(Self::wrap)
    }

    /// Copy a typed result from any layer into this one.
    #[must_use]
    pub fn copy<M: LayerTag>(source: &LayerOutput<M, T>) -> Self
    where
        T: Clone,
    {
        Self::wrap(source.inner.promote(L::LAYER))
    }

    /// Copy a bare [`Output<T>`] into this layer.
    #[must_use]
    pub fn from_output(source: Output<T>) -> Self {
        Self::wrap(source.into_layer(L::LAYER))
    }

    /// `value` if every input succeeded, else the merged failure.
    pub fn merge_with_value<'a, I>(results: I, value: T) -> Self
    where
        I: IntoIterator<Item = &'a ResultState>,
    {
        Self::wrap(Output::merge_with_value(results, value, L::LAYER))
    }

    // =========================================================================
    // Output access
    // =========================================================================

    /// See [`Output::into_output`].
    ///
    /// # Errors
    ///
    /// Returns [`ContractViolation::OutputOfFailedResult`] when this result
    /// failed.
    pub fn into_output(self) -> Result<T, ContractViolation> {
        self.inner.into_output()
    }

    pub fn output_or(self, fallback: T) -> T {
        self.inner.output_or(fallback)
    }

    pub fn into_option(self) -> Option<T> {
        self.inner.into_option()
    }

    /// See [`Output::into_result`].
    ///
    /// # Errors
    ///
    /// Returns the mapped [`StatusError`] when this result failed.
    pub fn into_result(self) -> Result<T, StatusError> {
        self.inner.into_result()
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// See [`Output::add_error`].
    pub fn add_error<I, S>(&mut self, kind: FailureKind, messages: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inner.add_error(kind, messages);
    }

    /// See [`Output::set_primary_status`].
    ///
    /// # Errors
    ///
    /// Returns a [`ContractViolation`] when the status would become success
    /// over recorded errors or without a value.
    pub fn set_primary_status(
        &mut self,
        status: impl Into<StatusKind>,
    ) -> Result<(), ContractViolation> {
        self.inner.set_primary_status(status)
    }

    /// See [`Output::combine_with`].
    pub fn combine_with<'a, I>(&mut self, others: I, override_kind: FailureKind)
    where
        I: IntoIterator<Item = &'a ResultState>,
    {
        self.inner.combine_with(others, override_kind);
    }

    // =========================================================================
    // Conversion
    // =========================================================================

    #[must_use]
    pub fn into_inner(self) -> Output<T> {
        self.inner
    }

    /// Drop the payload type; the same layer's untyped result.
    #[must_use]
    pub fn without_output(self) -> LayerResult<L> {
        LayerResult::copy(&self.inner.without_output())
    }

    /// Reinterpret a failure as a failure producing `U`.
    ///
    /// # Errors
    ///
    /// Returns [`ContractViolation::ReparameterizeSuccess`] when this result
    /// succeeded.
    pub fn reparameterize<U>(self) -> Result<LayerOutput<L, U>, ContractViolation> {
        self.inner.reparameterize().map(LayerOutput::wrap)
    }

    pub fn map<U, F>(self, f: F) -> LayerOutput<L, U>
    where
        F: FnOnce(T) -> U,
    {
        LayerOutput::wrap(self.inner.map(f))
    }

    /// Move into layer `M`, in any direction.
    #[must_use]
    pub fn retag<M: LayerTag>(self) -> LayerOutput<M, T> {
        LayerOutput::wrap(self.inner.into_layer(M::LAYER))
    }
}

impl<L: LayerTag, T: Clone> LayerOutput<L, T> {
    #[must_use]
    pub fn to_entity_result(&self) -> LayerOutput<EntityLayer, T> {
        LayerOutput::copy(self)
    }

    #[must_use]
    pub fn to_mapper_result(&self) -> LayerOutput<MapperLayer, T> {
        LayerOutput::copy(self)
    }

    #[must_use]
    pub fn to_infra_result(&self) -> LayerOutput<InfraLayer, T> {
        LayerOutput::copy(self)
    }

    #[must_use]
    pub fn to_repo_result(&self) -> LayerOutput<RepoLayer, T> {
        LayerOutput::copy(self)
    }

    #[must_use]
    pub fn to_service_result(&self) -> LayerOutput<ServiceLayer, T> {
        LayerOutput::copy(self)
    }

    #[must_use]
    pub fn to_use_case_result(&self) -> LayerOutput<UseCaseLayer, T> {
        LayerOutput::copy(self)
    }

    #[must_use]
    pub fn to_outcome(&self) -> LayerOutput<WebLayer, T> {
        LayerOutput::copy(self)
    }
}

impl<L: LayerTag, T> Deref for LayerOutput<L, T> {
    type Target = Output<T>;

    fn deref(&self) -> &Output<T> {
        &self.inner
    }
}

impl<L: LayerTag, T> AsRef<ResultState> for LayerOutput<L, T> {
    fn as_ref(&self) -> &ResultState {
        self.inner.state()
    }
}

impl<L: LayerTag, T> From<LayerOutput<L, T>> for LayerResult<L> {
    fn from(output: LayerOutput<L, T>) -> Self {
        output.without_output()
    }
}
