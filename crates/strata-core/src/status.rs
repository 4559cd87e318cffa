//! Outcome taxonomy: the closed set of failure kinds and the primary status.
//!
//! ```text
//! StatusKind::Success
//! StatusKind::Failed(FailureKind::{Failure, NotFound, AlreadyExists, ...})
//! ```
//!
//! Every failure kind carries a default message and a typed message that
//! names the output type the failed operation was expected to produce.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Placeholder substituted by [`FailureKind::typed_message`].
const TYPE_PLACEHOLDER: &str = "{type}";

// ---------------------------------------------------------------------------
// FailureKind
// ---------------------------------------------------------------------------

/// Why an operation failed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Generic failure with no more specific classification.
    Failure,
    NotFound,
    AlreadyExists,
    InvalidInput,
    InvalidRequest,
    DomainViolation,
    InvariantViolation,
    NotAllowed,
    ConcurrencyViolation,
    Cancelled,
    TimedOut,
}

impl FailureKind {
    /// Every failure kind, in declaration order.
    pub const ALL: [Self; 11] = [
        Self::Failure,
        Self::NotFound,
        Self::AlreadyExists,
        Self::InvalidInput,
        Self::InvalidRequest,
        Self::DomainViolation,
        Self::InvariantViolation,
        Self::NotAllowed,
        Self::ConcurrencyViolation,
        Self::Cancelled,
        Self::TimedOut,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Failure => "failure",
            Self::NotFound => "not_found",
            Self::AlreadyExists => "already_exists",
            Self::InvalidInput => "invalid_input",
            Self::InvalidRequest => "invalid_request",
            Self::DomainViolation => "domain_violation",
            Self::InvariantViolation => "invariant_violation",
            Self::NotAllowed => "not_allowed",
            Self::ConcurrencyViolation => "concurrency_violation",
            Self::Cancelled => "cancelled",
            Self::TimedOut => "timed_out",
        }
    }

    /// Message used when a failure carries no message of its own.
    #[must_use]
    pub const fn default_message(self) -> &'static str {
        match self {
            Self::Failure => "The operation failed",
            Self::NotFound => "The requested item was not found",
            Self::AlreadyExists => "The item already exists",
            Self::InvalidInput => "The input is invalid",
            Self::InvalidRequest => "The request is invalid",
            Self::DomainViolation => "A domain rule was violated",
            Self::InvariantViolation => "An invariant was violated",
            Self::NotAllowed => "The operation is not allowed",
            Self::ConcurrencyViolation => "A concurrent modification was detected",
            Self::Cancelled => "The operation was cancelled",
            Self::TimedOut => "The operation timed out",
        }
    }

    /// Template for [`typed_message`](Self::typed_message); `{type}` marks the
    /// expected output type.
    #[must_use]
    pub const fn typed_template(self) -> &'static str {
        match self {
            Self::Failure => "The operation producing {type} failed",
            Self::NotFound => "The requested {type} was not found",
            Self::AlreadyExists => "The {type} already exists",
            Self::InvalidInput => "The input for {type} is invalid",
            Self::InvalidRequest => "The request for {type} is invalid",
            Self::DomainViolation => "A domain rule was violated while producing {type}",
            Self::InvariantViolation => "An invariant of {type} was violated",
            Self::NotAllowed => "The operation on {type} is not allowed",
            Self::ConcurrencyViolation => "A concurrent modification of {type} was detected",
            Self::Cancelled => "The operation producing {type} was cancelled",
            Self::TimedOut => "The operation producing {type} timed out",
        }
    }

    /// Default message naming the expected output type.
    #[must_use]
    pub fn typed_message(self, type_name: &str) -> String {
        self.typed_template().replace(TYPE_PLACEHOLDER, type_name)
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown failure kind tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown failure kind '{0}'")]
pub struct UnknownFailureKind(pub String);

impl FromStr for FailureKind {
    type Err = UnknownFailureKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownFailureKind(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// StatusKind
// ---------------------------------------------------------------------------

/// Primary status of a result: success, or exactly one failure kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    #[default]
    Success,
    Failed(FailureKind),
}

impl StatusKind {
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }

    #[must_use]
    pub const fn is_failure(self) -> bool {
        !self.is_success()
    }

    #[must_use]
    pub const fn failure_kind(self) -> Option<FailureKind> {
        match self {
            Self::Success => None,
            Self::Failed(kind) => Some(kind),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failed(kind) => kind.as_str(),
        }
    }

    #[must_use]
    pub const fn default_message(self) -> &'static str {
        match self {
            Self::Success => "The operation succeeded",
            Self::Failed(kind) => kind.default_message(),
        }
    }

    #[must_use]
    pub fn typed_message(self, type_name: &str) -> String {
        match self {
            Self::Success => format!("The operation producing {type_name} succeeded"),
            Self::Failed(kind) => kind.typed_message(type_name),
        }
    }
}

impl From<FailureKind> for StatusKind {
    fn from(kind: FailureKind) -> Self {
        Self::Failed(kind)
    }
}

impl fmt::Display for StatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusKind {
    type Err = UnknownFailureKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == Self::Success.as_str() {
            return Ok(Self::Success);
        }
        s.parse().map(Self::Failed)
    }
}

// ---------------------------------------------------------------------------
// Type names
// ---------------------------------------------------------------------------

/// Fully qualified name of `T`, used as the expected-output tag on errors.
#[must_use]
pub fn type_tag<T: ?Sized>() -> &'static str {
    std::any::type_name::<T>()
}

/// Strip module paths from a type name: `Vec<alloc::string::String>` becomes
/// `Vec<String>`.
#[must_use]
pub fn short_type_name(full: &str) -> String {
    fn last_segment(path: &str) -> &str {
        path.rsplit("::").next().unwrap_or(path)
    }

    let mut out = String::with_capacity(full.len());
    let mut segment = String::new();
    for ch in full.chars() {
        if ch.is_alphanumeric() || ch == '_' || ch == ':' {
            segment.push(ch);
        } else {
            out.push_str(last_segment(&segment));
            segment.clear();
            out.push(ch);
        }
    }
    out.push_str(last_segment(&segment));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn all_kinds_have_distinct_tags() {
        let mut tags: Vec<&str> = FailureKind::ALL.iter().map(|k| k.as_str()).collect();
        tags.sort_unstable();
        tags.dedup();
        assert_eq!(tags.len(), FailureKind::ALL.len());
    }

    #[rstest]
    #[case(FailureKind::NotFound, "The requested User was not found")]
    #[case(FailureKind::AlreadyExists, "The User already exists")]
    #[case(FailureKind::TimedOut, "The operation producing User timed out")]
    fn typed_message_names_the_type(#[case] kind: FailureKind, #[case] expected: &str) {
        assert_eq!(kind.typed_message("User"), expected);
    }

    #[test]
    fn every_typed_template_has_a_placeholder() {
        for kind in FailureKind::ALL {
            assert!(
                kind.typed_template().contains(TYPE_PLACEHOLDER),
                "{kind} template lacks a placeholder"
            );
        }
    }

    #[test]
    fn failure_kind_parses_its_own_tag() {
        for kind in FailureKind::ALL {
            assert_eq!(kind.as_str().parse::<FailureKind>(), Ok(kind));
        }
        assert!("success".parse::<FailureKind>().is_err());
        assert_eq!("success".parse::<StatusKind>(), Ok(StatusKind::Success));
        assert_eq!(
            "cancelled".parse::<StatusKind>(),
            Ok(StatusKind::Failed(FailureKind::Cancelled))
        );
    }

    #[test]
    fn status_kind_equality_is_structural() {
        assert_eq!(
            StatusKind::from(FailureKind::NotFound),
            StatusKind::Failed(FailureKind::NotFound)
        );
        assert_ne!(
            StatusKind::Failed(FailureKind::NotFound),
            StatusKind::Failed(FailureKind::Failure)
        );
        assert!(StatusKind::default().is_success());
    }

    #[test]
    fn status_kind_serializes_snake_case() {
        let json = serde_json::to_string(&StatusKind::Success).unwrap();
        assert_eq!(json, "\"success\"");
        let json = serde_json::to_string(&StatusKind::Failed(FailureKind::TimedOut)).unwrap();
        assert_eq!(json, r#"{"failed":"timed_out"}"#);
    }

    #[rstest]
    #[case("i32", "i32")]
    #[case("alloc::string::String", "String")]
    #[case("alloc::vec::Vec<alloc::string::String>", "Vec<String>")]
    #[case("core::option::Option<(u8, my_app::model::User)>", "Option<(u8, User)>")]
    #[case("&str", "&str")]
    fn short_type_name_strips_paths(#[case] full: &str, #[case] expected: &str) {
        assert_eq!(short_type_name(full), expected);
    }
}
