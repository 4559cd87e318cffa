use strata_config::StrataConfig;

use crate::cli::GlobalFlags;
use crate::output::output;

/// Handle `strata config`.
pub fn handle(flags: &GlobalFlags, config: &StrataConfig) -> anyhow::Result<()> {
    output(config, flags.format)
}
