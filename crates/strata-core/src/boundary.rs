//! Exit-code boundary.
//!
//! Only process entry points translate a result into an exit status. Success
//! is always `0`; failures map to a nonzero code, optionally per kind.

use std::collections::BTreeMap;
use std::num::NonZeroU8;
use std::process::ExitCode;

use crate::state::ResultState;
use crate::status::FailureKind;

/// Exit code reported for a failure when no per-kind code applies.
pub const DEFAULT_FAILURE_EXIT_CODE: NonZeroU8 = NonZeroU8::MIN;

/// How failed results map to process exit codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExitPolicy {
    failure_code: NonZeroU8,
    kind_codes: BTreeMap<FailureKind, NonZeroU8>,
}

impl ExitPolicy {
    #[must_use]
    pub fn new(failure_code: NonZeroU8) -> Self {
        Self {
            failure_code,
            kind_codes: BTreeMap::new(),
        }
    }

    /// Report `code` for failures whose primary status is `kind`.
    #[must_use]
    pub fn with_kind_code(mut self, kind: FailureKind, code: NonZeroU8) -> Self {
        self.kind_codes.insert(kind, code);
        self
    }

    #[must_use]
    pub const fn failure_code(&self) -> NonZeroU8 {
        self.failure_code
    }

    #[must_use]
    pub fn code_for(&self, state: &ResultState) -> u8 {
        state.status().failure_kind().map_or(0, |kind| {
            self.kind_codes
                .get(&kind)
                .copied()
                .unwrap_or(self.failure_code)
                .get()
        })
    }

    #[must_use]
    pub fn exit_code(&self, state: &ResultState) -> ExitCode {
        ExitCode::from(self.code_for(state))
    }
}

impl Default for ExitPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_FAILURE_EXIT_CODE)
    }
}

impl ResultState {
    /// Exit status for this result under the default policy.
    #[must_use]
    pub fn exit_code(&self) -> ExitCode {
        ExitPolicy::default().exit_code(self)
    }
}
