//! HTTP utilities for fetching remote runtimes.

use crate::bundler::error::{ErrorExt, Result};
use std::path::Path;
use tokio::io::AsyncWriteExt;
use url::Url;

/// Downloads a URL to a file, streaming chunks to disk.
///
/// Runtime archives run to hundreds of megabytes, so the response body is
/// never buffered in memory. No retries; a network failure aborts the run.
pub async fn download_to(url: &Url, dest: &Path) -> Result<()> {
    log::info!("Downloading runtime from '{}' ...", url);

    let mut response = reqwest::get(url.clone()).await?.error_for_status()?;

    let mut file = tokio::fs::File::create(dest)
        .await
        .fs_context("creating download target", dest)?;

    while let Some(chunk) = response.chunk().await? {
        file.write_all(&chunk)
            .await
            .fs_context("writing downloaded chunk", dest)?;
    }

    file.flush().await.fs_context("flushing download", dest)?;
    Ok(())
}
