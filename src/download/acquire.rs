//! Download-if-absent with write-then-rename.
//!
//! The output directory is the only record of finished downloads, so a file
//! must never appear at its final path until its body has been fully
//! written. Bodies stream into `<name>.part`; only a complete, flushed and
//! synced partial file is renamed into place.

use std::path::Path;

use futures_util::StreamExt;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info, instrument, warn};
use url::Url;

use super::error::DownloadError;
use super::filename::partial_path;
use crate::fetch::HttpClient;

/// What happened to one download link.
#[derive(Debug)]
pub enum DownloadOutcome {
    /// The file was fetched and moved into place.
    Downloaded {
        /// Bytes written.
        bytes: u64,
    },
    /// A file already existed at the target path; no request was made.
    Skipped,
    /// The attempt failed; nothing was left at the target path.
    Failed(DownloadError),
}

impl DownloadOutcome {
    /// Whether a network request was made for this link.
    #[must_use]
    pub fn was_attempted(&self) -> bool {
        !matches!(self, Self::Skipped)
    }
}

/// Downloads `url` to `target` unless a file already exists there.
///
/// Failures are logged and returned as [`DownloadOutcome::Failed`]; they are
/// never retried.
#[instrument(skip(client, url, target), fields(url = %url, path = %target.display()))]
pub async fn download_if_absent(client: &HttpClient, url: &Url, target: &Path) -> DownloadOutcome {
    if target_exists(target).await {
        info!("skipping, already exists");
        return DownloadOutcome::Skipped;
    }

    info!("downloading");
    match download_to_path(client, url, target).await {
        Ok(bytes) => {
            info!(bytes, "download complete");
            DownloadOutcome::Downloaded { bytes }
        }
        Err(error) => {
            warn!(error = %error, "download failed");
            DownloadOutcome::Failed(error)
        }
    }
}

/// Streams `url` into `target` through a partial file.
///
/// On any error the partial file is removed and `target` is left untouched.
///
/// # Errors
///
/// Returns [`DownloadError`] on transport failure, non-success status,
/// truncated body, or filesystem failure.
pub async fn download_to_path(
    client: &HttpClient,
    url: &Url,
    target: &Path,
) -> Result<u64, DownloadError> {
    let response = client
        .inner()
        .get(url.as_str())
        .send()
        .await
        .map_err(|e| DownloadError::from_reqwest(url.as_str(), e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(DownloadError::http_status(url.as_str(), status.as_u16()));
    }

    let part = partial_path(target);
    let written = match stream_to_partial(response, url, &part).await {
        Ok(bytes) => bytes,
        Err(error) => {
            discard_partial(&part).await;
            return Err(error);
        }
    };

    if let Err(source) = tokio::fs::rename(&part, target).await {
        discard_partial(&part).await;
        return Err(DownloadError::io(target, source));
    }

    Ok(written)
}

/// Writes the response body to `part`, returning bytes written.
async fn stream_to_partial(
    response: reqwest::Response,
    url: &Url,
    part: &Path,
) -> Result<u64, DownloadError> {
    let expected = response.content_length();
    let file = File::create(part)
        .await
        .map_err(|e| DownloadError::io(part, e))?;
    let mut writer = BufWriter::new(file);
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| DownloadError::from_reqwest(url.as_str(), e))?;
        writer
            .write_all(&chunk)
            .await
            .map_err(|e| DownloadError::io(part, e))?;
        bytes_written += chunk.len() as u64;
    }

    writer.flush().await.map_err(|e| DownloadError::io(part, e))?;
    writer
        .into_inner()
        .sync_all()
        .await
        .map_err(|e| DownloadError::io(part, e))?;

    if let Some(expected) = expected
        && expected != bytes_written
    {
        return Err(DownloadError::integrity(part, expected, bytes_written));
    }

    Ok(bytes_written)
}

async fn target_exists(target: &Path) -> bool {
    match tokio::fs::try_exists(target).await {
        Ok(exists) => exists,
        Err(error) => {
            debug!(path = %target.display(), error = %error, "existence check failed, assuming absent");
            false
        }
    }
}

async fn discard_partial(part: &Path) {
    debug!(path = %part.display(), "removing partial file");
    if let Err(error) = tokio::fs::remove_file(part).await
        && error.kind() != std::io::ErrorKind::NotFound
    {
        warn!(path = %part.display(), error = %error, "could not remove partial file");
    }
}
