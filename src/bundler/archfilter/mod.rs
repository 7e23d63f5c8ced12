//! Architecture library filtering.
//!
//! Removes native shared libraries mismatched to the target word size from
//! already-packaged archives (typically classpath jars carrying both 32- and
//! 64-bit natives). Word size is classified by the `"64"` substring in the
//! file name; callers must name native libraries consistently, since no
//! binary-format inspection takes place.

use crate::bundler::error::{Context, Error, ErrorExt, Result};
use crate::bundler::settings::{Config, WordSize};
use crate::bundler::utils::{archive, fs};
use std::path::{Path, PathBuf};

/// Filters every archive listed in the configuration.
///
/// Applies only on platforms with a defined filter word size (not macOS).
/// Each listed path is resolved by base name against the output root; a
/// target that is already an extracted directory is filtered in place,
/// archives are unpacked, filtered, and repacked. Deletions are
/// irreversible; the first failed deletion aborts the remaining list.
pub async fn filter_archives(config: &Config) -> Result<()> {
    if config.remove_platform_libs().is_empty() {
        return Ok(());
    }

    let Some(word_size) = config.platform().word_size() else {
        return Ok(());
    };

    log::info!("Removing unrelated architecture platform libs ...");

    for listed in config.remove_platform_libs() {
        let name = listed
            .file_name()
            .context("archive listed for filtering has no file name")?;
        let target = config.out_dir().join(name);

        filter_one(&target, word_size, config.verbose()).await?;
    }

    Ok(())
}

/// Filters a single archive or extracted directory.
async fn filter_one(target: &Path, word_size: WordSize, verbose: bool) -> Result<()> {
    let in_place = target.is_dir();

    let work_dir: PathBuf = if in_place {
        if verbose {
            log::debug!("  # '{}' is a directory", target.display());
        }
        target.to_path_buf()
    } else {
        if verbose {
            log::debug!("  # Unpacking '{}' ...", target.display());
        }
        let tmp = sibling(target, ".tmp")?;
        fs::remove_dir_all(&tmp).await?;
        archive::unpack_zip(target, &tmp).await?;
        tmp
    };

    // Immediate entries only; nested directories keep their contents
    let mut entries = tokio::fs::read_dir(&work_dir)
        .await
        .fs_context("reading archive contents", &work_dir)?;
    while let Some(entry) = entries
        .next_entry()
        .await
        .fs_context("reading archive contents", &work_dir)?
    {
        let path = entry.path();
        if !entry
            .file_type()
            .await
            .fs_context("inspecting archive entry", &path)?
            .is_file()
        {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        if !is_library(&name) {
            continue;
        }

        if mismatched(word_size, &name) {
            if verbose {
                log::debug!("  # Removing '{}'", path.display());
            }
            tokio::fs::remove_file(&path)
                .await
                .fs_context("removing mismatched library", &path)?;
        }
    }

    if !in_place {
        if verbose {
            log::debug!("  # Repacking '{}' ...", target.display());
        }

        // Repack beside the original, then atomically swap it in; a crash
        // mid-filter leaves either the original or the finished archive
        let repacked = sibling(target, ".new")?;
        archive::pack_zip(&work_dir, &repacked)
            .await
            .map_err(|e| Error::Repack {
                archive: target.to_path_buf(),
                reason: e.to_string(),
            })?;
        tokio::fs::rename(&repacked, target)
            .await
            .map_err(|e| Error::Repack {
                archive: target.to_path_buf(),
                reason: e.to_string(),
            })?;

        fs::remove_dir_all(&work_dir).await?;
    }

    Ok(())
}

/// Returns a sibling path with a suffix appended to the file name.
fn sibling(path: &Path, suffix: &str) -> Result<PathBuf> {
    let name = path
        .file_name()
        .context("archive path has no file name")?
        .to_string_lossy();
    Ok(path.with_file_name(format!("{}{}", name, suffix)))
}

/// A file is a native library iff its lower-cased name ends in `.dll`,
/// `.so`, or `dylib`.
fn is_library(name: &str) -> bool {
    let name = name.to_lowercase();
    name.ends_with(".dll") || name.ends_with(".so") || name.ends_with("dylib")
}

/// Word-size mismatch by the `"64"` naming heuristic.
fn mismatched(word_size: WordSize, name: &str) -> bool {
    let has64 = name.contains("64");
    match word_size {
        WordSize::Bits64 => !has64,
        WordSize::Bits32 => has64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::settings::{ConfigBuilder, Platform};

    fn config(out: &Path, platform: Platform, targets: Vec<PathBuf>) -> Config {
        ConfigBuilder::new()
            .platform(platform)
            .out_dir(out)
            .executable_name("app")
            .main_class("com.example.Main")
            .classpath(vec!["app.jar".into()])
            .runtime_source("/opt/jdk")
            .remove_platform_libs(targets)
            .build()
            .unwrap()
    }

    fn populate_natives(dir: &Path) {
        std::fs::create_dir_all(dir).unwrap();
        std::fs::write(dir.join("native.so"), b"elf32").unwrap();
        std::fs::write(dir.join("native64.so"), b"elf64").unwrap();
        std::fs::write(dir.join("readme.txt"), b"docs").unwrap();
    }

    #[test]
    fn library_classification_matches_by_suffix() {
        assert!(is_library("liblwjgl.so"));
        assert!(is_library("OpenAL64.dll"));
        assert!(is_library("libopenal.dylib"));
        assert!(is_library("UPPER.DLL"));
        assert!(!is_library("native.jar"));
        assert!(!is_library("readme.txt"));
    }

    #[test]
    fn mismatch_follows_the_64_substring() {
        assert!(mismatched(WordSize::Bits64, "native.so"));
        assert!(!mismatched(WordSize::Bits64, "native64.so"));
        assert!(mismatched(WordSize::Bits32, "native64.so"));
        assert!(!mismatched(WordSize::Bits32, "native.so"));
    }

    #[tokio::test]
    async fn directory_mode_filters_in_place() {
        let out = tempfile::tempdir().unwrap();
        let natives = out.path().join("natives.jar");
        populate_natives(&natives);

        let config = config(out.path(), Platform::Linux64, vec!["natives.jar".into()]);
        filter_archives(&config).await.unwrap();

        assert!(!natives.join("native.so").exists());
        assert!(natives.join("native64.so").is_file());
        assert!(natives.join("readme.txt").is_file());
    }

    #[tokio::test]
    async fn thirty_two_bit_target_removes_the_64_variant() {
        let out = tempfile::tempdir().unwrap();
        let natives = out.path().join("natives.jar");
        populate_natives(&natives);

        let config = config(out.path(), Platform::Linux32, vec!["natives.jar".into()]);
        filter_archives(&config).await.unwrap();

        assert!(natives.join("native.so").is_file());
        assert!(!natives.join("native64.so").exists());
    }

    #[tokio::test]
    async fn directory_mode_is_idempotent() {
        let out = tempfile::tempdir().unwrap();
        let natives = out.path().join("natives.jar");
        populate_natives(&natives);

        let config = config(out.path(), Platform::Windows64, vec!["natives.jar".into()]);
        filter_archives(&config).await.unwrap();
        let first: Vec<_> = std::fs::read_dir(&natives)
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();

        filter_archives(&config).await.unwrap();
        let second: Vec<_> = std::fs::read_dir(&natives)
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn archive_mode_repacks_with_survivors_only() {
        let out = tempfile::tempdir().unwrap();

        // Build a real archive holding both word sizes
        let staging = out.path().join("staging");
        populate_natives(&staging);
        let jar = out.path().join("natives.jar");
        archive::pack_zip(&staging, &jar).await.unwrap();
        fs::remove_dir_all(&staging).await.unwrap();

        let config = config(out.path(), Platform::Linux64, vec!["natives.jar".into()]);
        filter_archives(&config).await.unwrap();

        // The temp unpack directory is gone and the archive was replaced
        assert!(!out.path().join("natives.jar.tmp").exists());
        assert!(!out.path().join("natives.jar.new").exists());

        let unpacked = out.path().join("unpacked");
        archive::unpack_zip(&jar, &unpacked).await.unwrap();
        assert!(!unpacked.join("native.so").exists());
        assert!(unpacked.join("native64.so").is_file());
        assert!(unpacked.join("readme.txt").is_file());
    }

    #[tokio::test]
    async fn macos_target_skips_filtering() {
        let out = tempfile::tempdir().unwrap();
        let natives = out.path().join("natives.jar");
        populate_natives(&natives);

        let config = config(out.path(), Platform::MacOS, vec!["natives.jar".into()]);
        filter_archives(&config).await.unwrap();

        assert!(natives.join("native.so").is_file());
        assert!(natives.join("native64.so").is_file());
    }
}
