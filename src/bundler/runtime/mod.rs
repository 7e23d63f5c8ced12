//! Runtime acquisition, caching, and extraction.
//!
//! Obtains the bundled JRE from a local directory, a local zip archive, or a
//! remote URL, optionally through a persistent cache directory, and installs
//! it into the output tree.
//!
//! The cache is keyed only by the operator-chosen path; no content
//! fingerprinting ties a cache to a runtime version. Pointing one cache path
//! at different runtimes across runs silently reuses whichever was extracted
//! first; use one cache directory per runtime.

pub mod minimize;

use crate::bundler::error::{Error, ErrorExt, Result};
use crate::bundler::settings::{Config, RuntimeSource};
use crate::bundler::utils::{archive, fs, http};
use crate::bundler::OutputLocations;
use std::path::{Path, PathBuf};

/// Directory the extracted runtime image is installed under.
pub(crate) const RUNTIME_DIR: &str = "runtime";

/// File name a remote runtime is downloaded to.
const DOWNLOAD_NAME: &str = "runtime-archive.zip";

/// Directory depth limit for the runtime image search.
const MAX_SEARCH_DEPTH: usize = 64;

/// Acquires the runtime and installs it into the resources directory.
///
/// With a cache configured and already populated, the cached runtime is
/// reused verbatim (no re-download, re-extract, or re-minimize). Otherwise
/// the source is fetched/extracted into the storage path, the runtime image
/// located, minimized, and - when caching - copied into the output on every
/// run.
pub async fn acquire(config: &Config, output: &OutputLocations) -> Result<()> {
    let caching_enabled = config.runtime_cache().is_some();
    let mut skip_extraction = false;

    // Check whether extraction (and minimize) can be skipped entirely
    if let Some(cache) = config.runtime_cache() {
        if cache.exists() {
            if cache.is_dir() {
                skip_extraction = !dir_is_empty(cache).await?;
            } else {
                return Err(Error::Config(format!(
                    "runtime cache '{}' must be a directory",
                    cache.display()
                )));
            }
        }
    }

    // Where the runtime is extracted to (cache, or straight into the output)
    let storage: &Path = match config.runtime_cache() {
        Some(cache) => cache,
        None => output.resources_dir(),
    };

    if skip_extraction {
        log::info!("Using cached runtime in '{}' ...", storage.display());
    } else {
        fs::create_dir_all(storage, false).await?;

        let source = RuntimeSource::classify(config.runtime_source());
        let fetched_remote = matches!(source, RuntimeSource::Remote(_));

        let source_path = match &source {
            RuntimeSource::Remote(url) => {
                let download = storage.join(DOWNLOAD_NAME);
                http::download_to(url, &download).await?;
                download
            }
            RuntimeSource::Local(path) => path.clone(),
        };

        log::info!("Unpacking runtime ...");
        let tmp = storage.join("tmp");
        fs::create_dir_all(&tmp, true).await?;

        if source_path.is_dir() {
            fs::copy_dir(&source_path, &tmp).await?;
        } else {
            archive::unpack_zip(&source_path, &tmp).await?;
        }

        let image = find_runtime_image(&tmp).await?;
        fs::copy_dir(&image, &storage.join(RUNTIME_DIR)).await?;
        fs::remove_dir_all(&tmp).await?;

        if fetched_remote {
            tokio::fs::remove_file(&source_path)
                .await
                .fs_context("removing downloaded archive", &source_path)?;
        }

        minimize::minimize_runtime(storage, config).await?;
    }

    if caching_enabled {
        // The install-to-output copy happens every run; on cache reuse it is
        // the only copy performed
        fs::copy_dir(storage, output.resources_dir()).await?;
    }

    Ok(())
}

async fn dir_is_empty(dir: &Path) -> Result<bool> {
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .fs_context("reading runtime cache", dir)?;
    Ok(entries
        .next_entry()
        .await
        .fs_context("reading runtime cache", dir)?
        .is_none())
}

/// Locates the runtime image inside an extracted tree: the first directory,
/// depth first, containing a `bin/java` or `bin/java.exe` entry.
///
/// The traversal uses an explicit stack with a depth guard instead of
/// unbounded recursion. Match order follows directory listing order and is
/// therefore filesystem dependent; with several candidate images the one
/// returned is not defined beyond that.
pub async fn find_runtime_image(root: &Path) -> Result<PathBuf> {
    let root = root.to_path_buf();

    tokio::task::spawn_blocking(move || find_runtime_image_sync(&root))
        .await
        .map_err(|e| Error::GenericError(format!("runtime search task panicked: {}", e)))?
}

fn find_runtime_image_sync(root: &Path) -> Result<PathBuf> {
    let mut stack: Vec<(PathBuf, usize)> = vec![(root.to_path_buf(), 0)];

    while let Some((dir, depth)) = stack.pop() {
        if dir.join("bin/java").exists() || dir.join("bin/java.exe").exists() {
            return Ok(dir);
        }

        if depth >= MAX_SEARCH_DEPTH {
            continue;
        }

        let mut children: Vec<PathBuf> = Vec::new();
        for entry in std::fs::read_dir(&dir)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                children.push(entry.path());
            }
        }
        // Popped from the stack tail, so push in reverse to visit children
        // in listing order
        children.reverse();
        for child in children {
            stack.push((child, depth + 1));
        }
    }

    Err(Error::RuntimeNotFound(root.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(path: &Path) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, b"").unwrap();
    }

    #[tokio::test]
    async fn finds_nested_runtime_image() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("jdk-17.0.2/docs/readme.txt"));
        touch(&dir.path().join("jdk-17.0.2/jre/bin/java"));

        let image = find_runtime_image(dir.path()).await.unwrap();
        assert_eq!(image, dir.path().join("jdk-17.0.2/jre"));
    }

    #[tokio::test]
    async fn root_itself_can_be_the_image() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("bin/java.exe"));

        let image = find_runtime_image(dir.path()).await.unwrap();
        assert_eq!(image, dir.path());
    }

    #[tokio::test]
    async fn missing_image_names_the_search_root() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("just/files/here.txt"));

        let err = find_runtime_image(dir.path()).await.unwrap_err();
        match err {
            Error::RuntimeNotFound(root) => assert_eq!(root, dir.path()),
            other => panic!("unexpected error: {other}"),
        }
    }
}
