use std::process::ExitCode;

use anyhow::Context;
use serde::Serialize;
use strata_config::StrataConfig;
use strata_core::{Aggregate, FailureKind, Layer, ResultState};

use crate::cli::{ExplainArgs, GlobalFlags};
use crate::output::output;

/// What a failure looks like once it reaches the boundary layer.
#[derive(Debug, Serialize)]
pub struct ExplainReport {
    pub status: String,
    pub layer: Layer,
    pub summary: String,
    pub error: Option<&'static str>,
    pub error_count: usize,
    pub details: String,
    pub exit_code: u8,
}

/// Handle `strata explain`.
///
/// Exits with the code the promoted result maps to, so scripts can observe
/// the boundary behaviour directly.
pub fn handle(
    args: &ExplainArgs,
    flags: &GlobalFlags,
    config: &StrataConfig,
) -> anyhow::Result<ExitCode> {
    let policy = config.boundary.exit_policy()?;
    let origin = build_origin(args)?;
    let promoted = promote_through(&origin, args.to);

    let report = ExplainReport {
        status: promoted.status().to_string(),
        layer: promoted.layer(),
        summary: promoted.main_error_summary(),
        error: promoted.status_error().map(|error| error.name()),
        error_count: promoted.error_count(),
        details: config.diagnostics.render(&promoted),
        exit_code: policy.code_for(&promoted),
    };

    if !flags.quiet {
        output(&report, flags.format)?;
    }
    Ok(policy.exit_code(&promoted))
}

/// The failure raised in `args.from`, merged with any sibling failures.
fn build_origin(args: &ExplainArgs) -> anyhow::Result<ResultState> {
    let first = failure(args.kind, args.from, args.message.clone());
    if args.also.is_empty() {
        return Ok(first);
    }

    let siblings = args
        .also
        .iter()
        .map(|raw| parse_sibling(raw).map(|(kind, message)| failure(kind, args.from, message)))
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(Aggregate::new(args.from)
        .include(&first)
        .extend(&siblings)
        .finish())
}

fn failure(kind: FailureKind, layer: Layer, message: Option<String>) -> ResultState {
    match message {
        Some(message) => ResultState::failure_with(kind, layer, message),
        None => ResultState::failure(kind, layer),
    }
}

/// Parse `kind` or `kind=message`.
fn parse_sibling(raw: &str) -> anyhow::Result<(FailureKind, Option<String>)> {
    let (kind, message) = match raw.split_once('=') {
        Some((kind, message)) => (kind, Some(message.to_string())),
        None => (raw, None),
    };
    let kind = kind
        .trim()
        .parse::<FailureKind>()
        .with_context(|| format!("invalid --also value '{raw}'"))?;
    Ok((kind, message))
}

/// Promote one layer at a time up to `target`. A target at or below the
/// origin is reached with a single copy.
fn promote_through(origin: &ResultState, target: Layer) -> ResultState {
    let steps = Layer::ALL
        .into_iter()
        .filter(|layer| origin.layer().is_promotion_to(*layer) && !target.is_promotion_to(*layer));

    let mut current = origin.clone();
    for layer in steps {
        current = current.promote(layer);
    }
    if current.layer() == target {
        current
    } else {
        current.promote(target)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn args(kind: FailureKind, from: Layer, to: Layer) -> ExplainArgs {
        ExplainArgs {
            kind,
            from,
            to,
            message: None,
            also: Vec::new(),
        }
    }

    #[test]
    fn repository_failure_reaches_the_web_layer() {
        let mut args = args(FailureKind::NotFound, Layer::Repository, Layer::Web);
        args.message = Some("user 7".into());

        let origin = build_origin(&args).expect("origin");
        let promoted = promote_through(&origin, args.to);

        assert_eq!(promoted.layer(), Layer::Web);
        assert_eq!(promoted.errors()[0].layer(), Layer::Web);
        assert_eq!(promoted.errors()[0].message(), Some("user 7"));
        assert_eq!(
            promoted.main_error_summary(),
            "The requested item was not found on the web layer"
        );
    }

    #[test]
    fn siblings_merge_into_a_generic_failure() {
        let mut args = args(FailureKind::NotFound, Layer::Service, Layer::UseCase);
        args.also = vec!["timed_out=slow upstream".into(), "cancelled".into()];

        let origin = build_origin(&args).expect("origin");
        assert_eq!(origin.status().failure_kind(), Some(FailureKind::Failure));
        assert_eq!(origin.error_count(), 3);
        assert_eq!(origin.errors()[1].message(), Some("slow upstream"));
        assert!(origin.contains_error_of_kind(FailureKind::Cancelled));
    }

    #[test]
    fn bad_sibling_kind_is_reported() {
        let mut args = args(FailureKind::Failure, Layer::Entity, Layer::Web);
        args.also = vec!["exploded=boom".into()];

        let error = build_origin(&args).unwrap_err();
        assert!(format!("{error:#}").contains("invalid --also value 'exploded=boom'"));
    }

    #[test]
    fn downward_target_is_a_single_copy() {
        let origin = ResultState::failure(FailureKind::Cancelled, Layer::UseCase);
        let moved = promote_through(&origin, Layer::Entity);
        assert_eq!(moved.layer(), Layer::Entity);
        assert_eq!(moved.status(), origin.status());
    }
}
