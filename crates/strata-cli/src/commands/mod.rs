use std::process::ExitCode;

use anyhow::Context;
use strata_config::StrataConfig;

use crate::cli::{Commands, GlobalFlags};

pub mod config;
pub mod exit_code;
pub mod explain;
pub mod kinds;
pub mod layers;

/// Route a parsed command to its handler.
pub fn dispatch(command: Commands, flags: &GlobalFlags) -> anyhow::Result<ExitCode> {
    match command {
        Commands::Layers => layers::handle(flags)?,
        Commands::Kinds => kinds::handle(flags, &load_config()?)?,
        Commands::ExitCode { status } => exit_code::handle(status, flags, &load_config()?)?,
        Commands::Config => config::handle(flags, &load_config()?)?,
        Commands::Explain(args) => return explain::handle(&args, flags, &load_config()?),
    }
    Ok(ExitCode::SUCCESS)
}

fn load_config() -> anyhow::Result<StrataConfig> {
    StrataConfig::load_with_dotenv().context("failed to load strata configuration")
}
