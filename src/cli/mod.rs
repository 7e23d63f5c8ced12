//! Command line interface for jbundle.
//!
//! Parses and validates arguments, builds the bundling configuration, and
//! drives the pipeline. Validation failures are reported before the output
//! directory is touched.

mod args;

pub use args::Args;

use crate::bundler::Packager;
use crate::error::{CliError, Result};

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();

    if let Err(reason) = args.validate() {
        return Err(CliError::InvalidArguments { reason }.into());
    }

    let config = args.into_config()?;

    Packager::new(config).pack().await?;

    Ok(0)
}
