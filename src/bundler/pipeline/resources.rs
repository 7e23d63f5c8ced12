//! Auxiliary resource installation.

use crate::bundler::error::{Error, Result};
use crate::bundler::settings::Config;
use crate::bundler::utils::fs;
use crate::bundler::OutputLocations;

/// Copies the declared resources into the resources directory.
///
/// The whole list is checked for existence up front; a missing path aborts
/// the step before any resource is copied. Files are copied by base name,
/// directories recursively by base name.
pub async fn install(config: &Config, output: &OutputLocations) -> Result<()> {
    if config.resources().is_empty() {
        return Ok(());
    }

    log::info!("Copying resources ...");

    for resource in config.resources() {
        if !resource.exists() {
            return Err(Error::ResourceNotFound(resource.clone()));
        }
    }

    for resource in config.resources() {
        let Some(name) = resource.file_name() else {
            return Err(Error::ResourceNotFound(resource.clone()));
        };
        let dest = output.resources_dir().join(name);

        if resource.is_file() {
            fs::copy_file(resource, &dest).await?;
        } else {
            fs::copy_dir(resource, &dest).await?;
        }
    }

    Ok(())
}
