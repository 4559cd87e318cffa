//! Untyped results bound to one layer.

use std::marker::PhantomData;
use std::ops::Deref;

use strata_core::{ContractViolation, FailureKind, ResultState, StatusKind};

use crate::tags::{
    EntityLayer, InfraLayer, LayerTag, MapperLayer, RepoLayer, ServiceLayer, UseCaseLayer,
    WebLayer,
};

/// A [`ResultState`] owned by the layer `L`.
///
/// Reads go through [`Deref`]; mutation is limited to operations that keep
/// the state owned by `L`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerResult<L: LayerTag> {
    state: ResultState,
    layer: PhantomData<L>,
}

impl<L: LayerTag> LayerResult<L> {
    /// Wrap a state already owned by `L`.
    const fn wrap(state: ResultState) -> Self {
        Self {
            state,
            layer: PhantomData,
        }
    }

    // =========================================================================
    // Factories
    // =========================================================================

    #[must_use]
    pub const fn pass() -> Self {
        Self::wrap(ResultState::success(L::LAYER))
    }

    /// Generic failure with no message.
    #[must_use]
    pub fn fail() -> Self {
        Self::wrap(ResultState::failure(FailureKind::Failure, L::LAYER))
    }

    #[must_use]
    pub fn fail_with(because: impl Into<String>) -> Self {
        Self::fail_of(FailureKind::Failure, because)
    }

    /// Failure of `kind` explained by `because`.
    #[must_use]
    pub fn fail_of(kind: FailureKind, because: impl Into<String>) -> Self {
        Self::wrap(ResultState::failure_with(kind, L::LAYER, because))
    }

    named_failures!();

    /// Copy `source` into this layer, retagging its errors.
    #[must_use]
    pub fn copy<R>(source: &R) -> Self
    where
        R: AsRef<ResultState> + ?Sized,
    {
        Self::wrap(source.as_ref().promote(L::LAYER))
    }

    /// Merge sibling results into a fresh result owned by this layer.
    #[must_use]
    pub fn merge<'a, I>(results: I) -> Self
    where
        I: IntoIterator<Item = &'a ResultState>,
    {
        Self::wrap(ResultState::merge(results, L::LAYER))
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// See [`ResultState::add_error`].
    pub fn add_error<I, S>(&mut self, kind: FailureKind, messages: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.state.add_error(kind, messages);
    }

    /// See [`ResultState::set_primary_status`].
    ///
    /// # Errors
    ///
    /// Returns [`ContractViolation::SuccessWithErrors`] when `status` is
    /// success and errors are recorded.
    pub fn set_primary_status(
        &mut self,
        status: impl Into<StatusKind>,
    ) -> Result<(), ContractViolation> {
        self.state.set_primary_status(status)
    }

    /// See [`ResultState::combine_with`].
    pub fn combine_with<'a, I>(&mut self, others: I, override_kind: FailureKind)
    where
        I: IntoIterator<Item = &'a ResultState>,
    {
        self.state.combine_with(others, override_kind);
    }

    // =========================================================================
    // Conversion
    // =========================================================================

    #[must_use]
    pub const fn state(&self) -> &ResultState {
        &self.state
    }

    #[must_use]
    pub fn into_state(self) -> ResultState {
        self.state
    }

    /// Move into layer `M`, in any direction. Prefer the named conversions
    /// or `From` (upward only) at call sites.
    #[must_use]
    pub fn retag<M: LayerTag>(self) -> LayerResult<M> {
        LayerResult::wrap(self.state.promote(M::LAYER))
    }

    #[must_use]
    pub fn to_entity_result(&self) -> LayerResult<EntityLayer> {
        LayerResult::copy(self)
    }

    #[must_use]
    pub fn to_mapper_result(&self) -> LayerResult<MapperLayer> {
        LayerResult::copy(self)
    }

    #[must_use]
    pub fn to_infra_result(&self) -> LayerResult<InfraLayer> {
        LayerResult::copy(self)
    }

    #[must_use]
    pub fn to_repo_result(&self) -> LayerResult<RepoLayer> {
        LayerResult::copy(self)
    }

    #[must_use]
    pub fn to_service_result(&self) -> LayerResult<ServiceLayer> {
        LayerResult::copy(self)
    }

    #[must_use]
    pub fn to_use_case_result(&self) -> LayerResult<UseCaseLayer> {
        LayerResult::copy(self)
    }

    #[must_use]
    pub fn to_outcome(&self) -> LayerResult<WebLayer> {
        LayerResult::copy(self)
    }
}

impl<L: LayerTag> Default for LayerResult<L> {
    fn default() -> Self {
        Self::pass()
    }
}

impl<L: LayerTag> Deref for LayerResult<L> {
    type Target = ResultState;

    fn deref(&self) -> &ResultState {
        &self.state
    }
}

impl<L: LayerTag> AsRef<ResultState> for LayerResult<L> {
    fn as_ref(&self) -> &ResultState {
        &self.state
    }
}

impl<L: LayerTag> From<LayerResult<L>> for ResultState {
    fn from(result: LayerResult<L>) -> Self {
        result.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use strata_core::Layer;

    type RepoResult = LayerResult<RepoLayer>;

    #[test]
    fn factories_bind_the_layer() {
        assert_eq!(RepoResult::pass().layer(), Layer::Repository);
        assert!(RepoResult::pass().is_successful());

        let failed = RepoResult::fail();
        assert_eq!(failed.status(), StatusKind::Failed(FailureKind::Failure));
        assert_eq!(failed.errors()[0].layer(), Layer::Repository);
    }

    #[test]
    fn named_failures_set_their_kind() {
        let cases = [
            (RepoResult::not_found("x"), FailureKind::NotFound),
            (RepoResult::already_exists("x"), FailureKind::AlreadyExists),
            (RepoResult::invalid_input("x"), FailureKind::InvalidInput),
            (RepoResult::invalid_request("x"), FailureKind::InvalidRequest),
            (RepoResult::domain_violation("x"), FailureKind::DomainViolation),
            (
                RepoResult::invariant_violation("x"),
                FailureKind::InvariantViolation,
            ),
            (RepoResult::not_allowed("x"), FailureKind::NotAllowed),
            (
                RepoResult::concurrency_violation("x"),
                FailureKind::ConcurrencyViolation,
            ),
            (RepoResult::cancelled("x"), FailureKind::Cancelled),
            (RepoResult::timed_out("x"), FailureKind::TimedOut),
        ];
        for (result, kind) in cases {
            assert_eq!(result.status(), StatusKind::Failed(kind));
            assert_eq!(result.errors()[0].message(), Some("x"));
        }
    }

    #[test]
    fn copy_retags_any_source() {
        let raw = ResultState::failure_with(FailureKind::NotFound, Layer::Unknown, "raw");
        let copied = RepoResult::copy(&raw);
        assert_eq!(copied.layer(), Layer::Repository);
        assert_eq!(copied.errors()[0].layer(), Layer::Repository);
        assert_eq!(raw.errors()[0].layer(), Layer::Unknown);
    }

    #[test]
    fn merge_uses_this_layer() {
        let a = ResultState::failure_with(FailureKind::Failure, Layer::Infrastructure, "a");
        let merged = LayerResult::<ServiceLayer>::merge([&a]);
        assert_eq!(merged.layer(), Layer::Service);
        assert_eq!(merged.errors()[0].layer(), Layer::Service);
    }

    #[test]
    fn mutation_keeps_the_layer() {
        let mut result = RepoResult::pass();
        result.add_error(FailureKind::InvalidInput, ["qty"]);
        assert_eq!(result.layer(), Layer::Repository);
        assert_eq!(result.errors()[0].layer(), Layer::Repository);
        assert!(result.set_primary_status(StatusKind::Success).is_err());
    }
}
