//! macOS app bundle scaffolding.
//!
//! On macOS the distributable is an app bundle rather than a flat directory:
//! `Contents/{MacOS,Resources}` plus a rendered `Info.plist`. Building the
//! scaffold redefines the output locations every later pipeline step uses.

use crate::bundler::error::{Error, ErrorExt, Result};
use crate::bundler::settings::{Config, Platform};
use crate::bundler::utils::fs;
use crate::bundler::OutputLocations;

/// Descriptor template embedded at compile time. The `${executable}` and
/// `${bundleIdentifier}` placeholders are a fixed contract and replaced
/// literally.
const INFO_PLIST_TEMPLATE: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/Info.plist"));

/// Builds the macOS bundle scaffold and redirects the output locations into
/// it. On every other platform this is a no-op returning the locations
/// unchanged.
pub async fn specialize_output(
    config: &Config,
    output: OutputLocations,
) -> Result<OutputLocations> {
    match config.platform() {
        Platform::Windows32 | Platform::Windows64 | Platform::Linux32 | Platform::Linux64 => {
            return Ok(output);
        }
        Platform::MacOS => {}
    }

    log::info!("Building app bundle ...");

    let root = output.executable_dir();
    let contents = root.join("Contents");
    let macos_dir = contents.join("MacOS");
    let resources_dir = contents.join("Resources");

    for dir in [&contents, &macos_dir, &resources_dir] {
        fs::create_dir_all(dir, false).await?;
    }

    let identifier = match config.bundle_identifier() {
        Some(identifier) => identifier.to_string(),
        None => default_bundle_identifier(config.main_class())?,
    };

    let descriptor = INFO_PLIST_TEMPLATE
        .replace("${executable}", config.executable_name())
        .replace("${bundleIdentifier}", &identifier);

    let plist_path = contents.join("Info.plist");
    tokio::fs::write(&plist_path, descriptor)
        .await
        .fs_context("writing bundle descriptor", &plist_path)?;

    if let Some(icon) = config.icon() {
        if icon.exists() {
            fs::copy_file(icon, &resources_dir.join("icons.icns")).await?;
        }
    }

    Ok(OutputLocations::new(macos_dir, resources_dir))
}

/// Derives the default bundle identifier: the main class with its final
/// dot-delimited segment stripped.
fn default_bundle_identifier(main_class: &str) -> Result<String> {
    main_class
        .rsplit_once('.')
        .map(|(package, _)| package.to_string())
        .ok_or_else(|| {
            Error::Config(format!(
                "cannot derive a bundle identifier from main class '{}'; pass one explicitly",
                main_class
            ))
        })
}
