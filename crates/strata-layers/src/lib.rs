//! # strata-layers
//!
//! Layer-bound result types for strata.
//!
//! Every layer of the canonical chain gets an untyped result and a typed
//! output, each with the same closed factory surface:
//!
//! | layer          | untyped         | typed              |
//! |----------------|-----------------|--------------------|
//! | entity         | `EntityResult`  | `EntityOutput<T>`  |
//! | mapper         | `MapperResult`  | `MapperOutput<T>`  |
//! | infrastructure | `InfraResult`   | `InfraOutput<T>`   |
//! | repository     | `RepoResult`    | `RepoOutput<T>`    |
//! | service        | `ServiceResult` | `ServiceOutput<T>` |
//! | use case       | `UseCaseResult` | `UseCaseOutput<T>` |
//! | boundary (web) | `Outcome`       | `OutcomeOf<T>`     |
//!
//! ## Promotion
//!
//! Moving a result to a higher layer copies it and retags every error to the
//! new layer; status and messages are preserved. Upward moves are available
//! through `From`/`Into`. Downward or sideways moves do not compile through
//! `Into` and need a named conversion (`to_repo_result`, `to_outcome`, ...),
//! which performs the same copy but makes the direction explicit.
//!
//! ```
//! use strata_layers::{RepoResult, ServiceResult, UseCaseResult};
//!
//! let repo = RepoResult::not_found("user 7");
//! let service: ServiceResult = repo.into();
//! let use_case: UseCaseResult = service.into();
//!
//! assert!(use_case.is_failure());
//! assert_eq!(use_case.errors()[0].message(), Some("user 7"));
//!
//! // Downward needs an explicit call.
//! let back = use_case.to_repo_result();
//! assert_eq!(back.errors()[0].message(), Some("user 7"));
//! ```

/// Expand to one factory per named failure kind. The surrounding impl must
/// provide `fail_of(kind, because)`.
macro_rules! named_failures {
    () => {
        named_failures!(
            not_found => NotFound,
            already_exists => AlreadyExists,
            invalid_input => InvalidInput,
            invalid_request => InvalidRequest,
            domain_violation => DomainViolation,
            invariant_violation => InvariantViolation,
            not_allowed => NotAllowed,
            concurrency_violation => ConcurrencyViolation,
            cancelled => Cancelled,
            timed_out => TimedOut,
        );
    };
    ($($name:ident => $kind:ident),+ $(,)?) => {
        $(
            #[must_use]
            pub fn $name(because: impl Into<String>) -> Self {
                Self::fail_of(::strata_core::FailureKind::$kind, because)
            }
        )+
    };
}

pub mod output;
mod promotion;
pub mod result;
pub mod tags;

pub use output::LayerOutput;
pub use result::LayerResult;
pub use tags::{
    EntityLayer, InfraLayer, LayerTag, MapperLayer, RepoLayer, ServiceLayer, UseCaseLayer,
    WebLayer,
};

pub type EntityResult = LayerResult<EntityLayer>;
pub type MapperResult = LayerResult<MapperLayer>;
pub type InfraResult = LayerResult<InfraLayer>;
pub type RepoResult = LayerResult<RepoLayer>;
pub type ServiceResult = LayerResult<ServiceLayer>;
pub type UseCaseResult = LayerResult<UseCaseLayer>;
/// Boundary result returned to the process edge.
pub type Outcome = LayerResult<WebLayer>;

pub type EntityOutput<T> = LayerOutput<EntityLayer, T>;
pub type MapperOutput<T> = LayerOutput<MapperLayer, T>;
pub type InfraOutput<T> = LayerOutput<InfraLayer, T>;
pub type RepoOutput<T> = LayerOutput<RepoLayer, T>;
pub type ServiceOutput<T> = LayerOutput<ServiceLayer, T>;
pub type UseCaseOutput<T> = LayerOutput<UseCaseLayer, T>;
pub type OutcomeOf<T> = LayerOutput<WebLayer, T>;
