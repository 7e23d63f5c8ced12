//! Zip archive unpack and repack.
//!
//! The `zip` crate is synchronous; both operations run the whole archive
//! inside `spawn_blocking`.

use crate::bundler::error::{Context, Error, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Unpacks a zip archive into a destination directory.
///
/// Entry paths are taken as-is (no component stripping); unix permission
/// bits recorded in the archive are restored.
pub async fn unpack_zip(archive: &Path, dest: &Path) -> Result<()> {
    let archive = archive.to_path_buf();
    let dest = dest.to_path_buf();

    tokio::task::spawn_blocking(move || unpack_zip_sync(&archive, &dest))
        .await
        .map_err(|e| Error::GenericError(format!("archive unpack task panicked: {}", e)))?
}

/// Packs a directory tree into a fresh zip archive.
///
/// The destination must not be inside the source tree. Unix permission bits
/// are recorded for each file.
pub async fn pack_zip(src_dir: &Path, dest: &Path) -> Result<()> {
    let src_dir = src_dir.to_path_buf();
    let dest = dest.to_path_buf();

    tokio::task::spawn_blocking(move || pack_zip_sync(&src_dir, &dest))
        .await
        .map_err(|e| Error::GenericError(format!("archive pack task panicked: {}", e)))?
}

fn unpack_zip_sync(archive_path: &Path, dest: &Path) -> Result<()> {
    let file = File::open(archive_path)?;
    let mut archive = zip::ZipArchive::new(BufReader::new(file))?;

    std::fs::create_dir_all(dest)?;

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;

        let path = entry
            .enclosed_name()
            .context("invalid zip entry name")?;
        let dest_path = dest.join(path);

        if entry.is_dir() {
            std::fs::create_dir_all(&dest_path)?;
        } else {
            if let Some(parent) = dest_path.parent() {
                std::fs::create_dir_all(parent)?;
            }

            let mut outfile = File::create(&dest_path)?;
            std::io::copy(&mut entry, &mut outfile)?;

            // Restore executable bits recorded in the archive
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                if let Some(mode) = entry.unix_mode() {
                    std::fs::set_permissions(&dest_path, std::fs::Permissions::from_mode(mode))?;
                }
            }
        }
    }

    Ok(())
}

fn pack_zip_sync(src_dir: &Path, dest: &Path) -> Result<()> {
    if dest.starts_with(src_dir) {
        crate::bail!("cannot pack '{}' into itself", src_dir.display());
    }

    let file = File::create(dest)?;
    let mut writer = zip::ZipWriter::new(file);

    for entry in walkdir::WalkDir::new(src_dir) {
        let entry = entry?;
        let rel_path = entry.path().strip_prefix(src_dir)?;
        if rel_path.as_os_str().is_empty() {
            continue;
        }

        // Zip entry names always use forward slashes
        let name = rel_path.to_string_lossy().replace('\\', "/");

        let options = zip::write::SimpleFileOptions::default();
        #[cfg(unix)]
        let options = {
            use std::os::unix::fs::PermissionsExt;
            options.unix_permissions(entry.metadata()?.permissions().mode())
        };

        if entry.file_type().is_dir() {
            writer.add_directory(name, options)?;
        } else {
            writer.start_file(name, options)?;
            let mut src = File::open(entry.path())?;
            std::io::copy(&mut src, &mut writer)?;
        }
    }

    writer.finish()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn pack_then_unpack_round_trips_a_tree() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src");
        std::fs::create_dir_all(src.join("natives")).unwrap();
        std::fs::write(src.join("manifest.txt"), b"hello").unwrap();
        std::fs::write(src.join("natives/lib.so"), b"elf").unwrap();

        let archive = dir.path().join("bundle.zip");
        pack_zip(&src, &archive).await.unwrap();

        let out = dir.path().join("out");
        unpack_zip(&archive, &out).await.unwrap();

        assert_eq!(std::fs::read(out.join("manifest.txt")).unwrap(), b"hello");
        assert_eq!(std::fs::read(out.join("natives/lib.so")).unwrap(), b"elf");
    }
}
