//! Launcher and classpath installation.
//!
//! The five platform launchers are prebuilt out-of-tree and embedded at
//! compile time; selection is by platform only, the blobs are opaque here.

use crate::bundler::error::Result;
use crate::bundler::settings::{Config, Platform};
use crate::bundler::utils::fs;
use crate::bundler::OutputLocations;

const LAUNCHER_WINDOWS32: &[u8] = include_bytes!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/assets/launchers/jbundle-windows.exe"
));
const LAUNCHER_WINDOWS64: &[u8] = include_bytes!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/assets/launchers/jbundle-windows-x64.exe"
));
const LAUNCHER_LINUX32: &[u8] = include_bytes!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/assets/launchers/jbundle-linux"
));
const LAUNCHER_LINUX64: &[u8] = include_bytes!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/assets/launchers/jbundle-linux-x64"
));
const LAUNCHER_MACOS: &[u8] = include_bytes!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/assets/launchers/jbundle-mac"
));

/// Selects the embedded launcher blob for a platform.
fn launcher_blob(platform: Platform) -> &'static [u8] {
    match platform {
        Platform::Windows32 => LAUNCHER_WINDOWS32,
        Platform::Windows64 => LAUNCHER_WINDOWS64,
        Platform::Linux32 => LAUNCHER_LINUX32,
        Platform::Linux64 => LAUNCHER_LINUX64,
        Platform::MacOS => LAUNCHER_MACOS,
    }
}

/// Installs the launcher executable and copies the classpath entries.
///
/// The launcher lands at `<executable_dir>/<name><ext>` with the execute bit
/// set. Classpath files are copied by base name into the resources
/// directory; directories are copied recursively. A missing entry logs a
/// warning and is skipped.
pub async fn install(config: &Config, output: &OutputLocations) -> Result<()> {
    log::info!("Copying executable ...");

    let target = output.executable_dir().join(format!(
        "{}{}",
        config.executable_name(),
        config.platform().exe_extension()
    ));

    tokio::fs::write(&target, launcher_blob(config.platform()))
        .await
        .map_err(crate::bundler::Error::IoError)?;
    fs::set_executable(&target).await?;

    log::info!("Copying classpath(s) ...");
    for entry in config.classpath() {
        let Some(name) = entry.file_name() else {
            log::warn!("Classpath entry has no file name, skipping: {}", entry.display());
            continue;
        };
        let dest = output.resources_dir().join(name);

        if entry.is_file() {
            fs::copy_file(entry, &dest).await?;
        } else if entry.is_dir() {
            fs::copy_dir(entry, &dest).await?;
        } else {
            log::warn!("Classpath not found: {}", entry.display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::settings::ConfigBuilder;

    #[tokio::test]
    async fn missing_classpath_entry_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        std::fs::create_dir_all(&out).unwrap();
        let jar = dir.path().join("present.jar");
        std::fs::write(&jar, b"jar").unwrap();

        let config = ConfigBuilder::new()
            .platform(Platform::Linux64)
            .out_dir(&out)
            .executable_name("app")
            .main_class("com.example.Main")
            .classpath(vec![jar.clone(), dir.path().join("absent.jar")])
            .runtime_source("/opt/jdk")
            .build()
            .unwrap();
        let output = OutputLocations::new(out.clone(), out.clone());

        install(&config, &output).await.unwrap();

        assert!(out.join("present.jar").is_file());
        assert!(!out.join("absent.jar").exists());
        assert!(out.join("app").is_file());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn launcher_gets_execute_bit() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        std::fs::create_dir_all(&out).unwrap();
        let jar = dir.path().join("app.jar");
        std::fs::write(&jar, b"jar").unwrap();

        let config = ConfigBuilder::new()
            .platform(Platform::Linux64)
            .out_dir(&out)
            .executable_name("app")
            .main_class("com.example.Main")
            .classpath(vec![jar])
            .runtime_source("/opt/jdk")
            .build()
            .unwrap();
        let output = OutputLocations::new(out.clone(), out.clone());

        install(&config, &output).await.unwrap();

        let mode = std::fs::metadata(out.join("app"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o111, 0o111);
    }
}
