use serde::Serialize;
use strata_config::StrataConfig;
use strata_core::{ExitPolicy, FailureKind, Layer, ResultState, StatusError};

use crate::cli::GlobalFlags;
use crate::output::output;

/// One row of the failure taxonomy.
#[derive(Debug, Serialize)]
pub struct KindRow {
    pub kind: FailureKind,
    pub message: &'static str,
    pub typed_template: &'static str,
    pub error: &'static str,
    pub exit_code: u8,
}

/// Handle `strata kinds`.
pub fn handle(flags: &GlobalFlags, config: &StrataConfig) -> anyhow::Result<()> {
    let policy = config.boundary.exit_policy()?;
    output(&rows(&policy), flags.format)
}

fn rows(policy: &ExitPolicy) -> Vec<KindRow> {
    FailureKind::ALL
        .into_iter()
        .map(|kind| KindRow {
            kind,
            message: kind.default_message(),
            typed_template: kind.typed_template(),
            error: StatusError::new(kind, String::new()).name(),
            exit_code: policy.code_for(&ResultState::failure(kind, Layer::Web)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU8;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn one_row_per_kind_with_mapped_error() {
        let rows = rows(&ExitPolicy::default());
        assert_eq!(rows.len(), FailureKind::ALL.len());

        let not_found = &rows[1];
        assert_eq!(not_found.kind, FailureKind::NotFound);
        assert_eq!(not_found.error, "NotFound");
        assert_eq!(not_found.message, "The requested item was not found");
        assert_eq!(not_found.exit_code, 1);
    }

    #[test]
    fn per_kind_exit_codes_show_up() {
        let policy = ExitPolicy::default()
            .with_kind_code(FailureKind::Cancelled, NonZeroU8::new(130).expect("nonzero"));
        let rows = rows(&policy);
        let cancelled = rows
            .iter()
            .find(|row| row.kind == FailureKind::Cancelled)
            .expect("cancelled row");
        assert_eq!(cancelled.exit_code, 130);
    }
}
