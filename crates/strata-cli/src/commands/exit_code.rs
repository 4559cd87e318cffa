use serde::Serialize;
use strata_config::StrataConfig;
use strata_core::{ExitPolicy, Layer, ResultState, StatusKind};

use crate::cli::GlobalFlags;
use crate::output::output;

#[derive(Debug, Serialize)]
pub struct ExitCodeReport {
    pub status: String,
    pub exit_code: u8,
}

/// Handle `strata exit-code <status>`.
pub fn handle(status: StatusKind, flags: &GlobalFlags, config: &StrataConfig) -> anyhow::Result<()> {
    let report = report(status, &config.boundary.exit_policy()?);
    if flags.quiet {
        println!("{}", report.exit_code);
        return Ok(());
    }
    output(&report, flags.format)
}

fn report(status: StatusKind, policy: &ExitPolicy) -> ExitCodeReport {
    let state = match status.failure_kind() {
        Some(kind) => ResultState::failure(kind, Layer::Web),
        None => ResultState::success(Layer::Web),
    };
    ExitCodeReport {
        status: status.to_string(),
        exit_code: policy.code_for(&state),
    }
}
