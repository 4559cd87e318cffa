//! # strata-core
//!
//! Status and result propagation for layered applications.
//!
//! An operation reports its outcome as a [`ResultState`] (or an
//! [`Output<T>`] when it produces a value) instead of raising. Callers
//! return it as-is, promote it to their own [`Layer`], or fold sibling
//! results together with [`Aggregate`].
//!
//! This crate provides:
//! - [`FailureKind`] / [`StatusKind`]: the closed outcome taxonomy
//! - [`ResultError`]: one recorded failure occurrence
//! - [`ResultState`]: the status state machine with its append-only error list
//! - [`Output<T>`]: a result carrying a value exactly when successful
//! - [`Aggregate`]: merging independent results
//! - Boundaries: [`StatusError`] for explicit throws, [`ExitPolicy`] for
//!   process exit codes, [`DataAccessFailure`] for storage adapters
//!
//! Misuse (reading the output of a failure, forcing success over recorded
//! errors) is reported as [`ContractViolation`] and never defaulted.
//!
//! ```
//! use strata_core::{FailureKind, Layer, ResultState};
//!
//! let found = ResultState::failure_with(FailureKind::NotFound, Layer::Repository, "user 7");
//! let promoted = found.promote(Layer::Service);
//!
//! assert!(promoted.is_failure());
//! assert_eq!(promoted.errors()[0].layer(), Layer::Service);
//! assert_eq!(promoted.errors()[0].message(), Some("user 7"));
//! ```

pub mod aggregate;
pub mod boundary;
pub mod data_access;
pub mod error;
pub mod layer;
pub mod output;
pub mod result_error;
pub mod state;
pub mod status;

pub use aggregate::Aggregate;
pub use boundary::ExitPolicy;
pub use data_access::DataAccessFailure;
pub use error::{ContractViolation, StatusError};
pub use layer::Layer;
pub use output::Output;
pub use result_error::ResultError;
pub use state::ResultState;
pub use status::{FailureKind, StatusKind};
