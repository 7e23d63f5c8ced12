//! Platform-inapplicable library removal.
//!
//! After the runtime and classpath are installed, native libraries that
//! cannot load on the target platform are deleted from the resources tree.
//! An operator-supplied filter is consulted first, before any built-in
//! rule, and may mark arbitrary extra files for deletion.

use crate::bundler::error::{ErrorExt, Result};
use crate::bundler::settings::{Config, Platform};
use crate::bundler::OutputLocations;
use std::path::Path;

/// Removes platform-inapplicable files from the resources directory.
pub async fn remove_platform_libs(
    config: &Config,
    output: &OutputLocations,
    operator_filter: &(dyn Fn(&Path) -> bool + Send + Sync),
) -> Result<()> {
    log::info!("Removing foreign platform libs ...");

    let files: Vec<_> = walkdir::WalkDir::new(output.resources_dir())
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .collect();

    for file in files {
        let remove = operator_filter(&file) || foreign_to_platform(config.platform(), &file);
        if !remove {
            continue;
        }

        if config.verbose() {
            log::debug!("  # Removing '{}'", file.display());
        }
        tokio::fs::remove_file(&file)
            .await
            .fs_context("removing foreign library", &file)?;
    }

    Ok(())
}

/// Built-in rule: a native library whose extension belongs to a different
/// operating system cannot load on the target.
fn foreign_to_platform(platform: Platform, path: &Path) -> bool {
    let name = match path.file_name() {
        Some(name) => name.to_string_lossy().to_lowercase(),
        None => return false,
    };

    match platform {
        Platform::Windows32 | Platform::Windows64 => {
            name.ends_with(".so") || name.ends_with(".dylib") || name.ends_with(".jnilib")
        }
        Platform::Linux32 | Platform::Linux64 => {
            name.ends_with(".dll") || name.ends_with(".dylib") || name.ends_with(".jnilib")
        }
        Platform::MacOS => name.ends_with(".dll") || name.ends_with(".so"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::settings::ConfigBuilder;

    fn config(out: &Path, platform: Platform) -> Config {
        ConfigBuilder::new()
            .platform(platform)
            .out_dir(out)
            .executable_name("app")
            .main_class("com.example.Main")
            .classpath(vec!["app.jar".into()])
            .runtime_source("/opt/jdk")
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn foreign_extensions_are_removed() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("native.dll"), b"pe").unwrap();
        std::fs::write(dir.path().join("native.so"), b"elf").unwrap();
        std::fs::write(dir.path().join("app.jar"), b"jar").unwrap();

        let output =
            OutputLocations::new(dir.path().to_path_buf(), dir.path().to_path_buf());
        remove_platform_libs(&config(dir.path(), Platform::Linux64), &output, &|_| false)
            .await
            .unwrap();

        assert!(!dir.path().join("native.dll").exists());
        assert!(dir.path().join("native.so").is_file());
        assert!(dir.path().join("app.jar").is_file());
    }

    #[tokio::test]
    async fn operator_filter_is_checked_first() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"n").unwrap();
        std::fs::write(dir.path().join("native.so"), b"elf").unwrap();

        let output =
            OutputLocations::new(dir.path().to_path_buf(), dir.path().to_path_buf());
        remove_platform_libs(&config(dir.path(), Platform::Linux64), &output, &|path| {
            path.extension().and_then(|e| e.to_str()) == Some("txt")
        })
        .await
        .unwrap();

        // Marked by the operator filter despite not being a library
        assert!(!dir.path().join("notes.txt").exists());
        assert!(dir.path().join("native.so").is_file());
    }
}
