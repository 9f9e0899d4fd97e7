//! Command implementations for the SeeYou processor CLI
//!
//! Each command is implemented in its own module; shared input resolution,
//! configuration and parsing live in [`shared`].

pub mod import;
pub mod shared;
pub mod validate;

pub use shared::ImportSummary;

use crate::cli::args::{Args, Commands};
use crate::{Error, Result};

/// Main command runner
///
/// Dispatches to the subcommand handler:
/// - `import`: parse files and print a summary or waypoint listing
/// - `validate`: parse files and report every rejected record
pub async fn run(args: Args) -> Result<ImportSummary> {
    match args.command {
        Some(Commands::Import(import_args)) => import::run_import(import_args).await,
        Some(Commands::Validate(validate_args)) => validate::run_validate(validate_args).await,
        None => Err(Error::invalid_input("No command given")),
    }
}
