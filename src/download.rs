//! Streaming installer download
//!
//! Performs a chunked HTTP GET, appending each chunk to the destination
//! file and invoking a progress sink after each chunk write, so a
//! caller can render incremental progress without buffering the whole
//! payload in memory.
//!
//! The network stream delivers frames of arbitrary size; they are
//! re-framed into chunks of at most `chunk_size` bytes before hitting
//! disk, so a transfer of N bytes drives the sink exactly
//! ceil(N / chunk_size) times.
//!
//! On any mid-stream failure the partially written file is left on
//! disk and the specific failure kind is returned; the caller decides
//! whether to remove the artifact or re-invoke the whole operation.
//! There is no automatic retry and no resume.

use crate::client::HttpClient;
use crate::error::{ConfigError, DownloadError};
use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use futures_util::{Stream, StreamExt};
use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

/// Default chunk size for streaming downloads (1 MiB)
pub const DEFAULT_CHUNK_SIZE: usize = 1024 * 1024;

/// Progress sink invoked after each chunk write with
/// `(bytes_transferred_so_far, declared_total)`
///
/// The total is `None` when the server did not declare a content
/// length.
pub type ProgressSink<'a> = &'a mut (dyn FnMut(u64, Option<u64>) + Send);

/// Trait for installer downloaders
#[async_trait]
pub trait Downloader: Send + Sync {
    /// Stream `url` to `dest`, reporting progress after each chunk
    ///
    /// Returns the number of bytes written on success.
    async fn download(
        &self,
        url: &str,
        dest: &Path,
        on_progress: ProgressSink<'_>,
    ) -> Result<u64, DownloadError>;
}

/// Downloader performing a chunked HTTP GET
pub struct HttpDownloader {
    client: HttpClient,
    chunk_size: usize,
}

impl HttpDownloader {
    /// Create a downloader with the given chunk size
    pub fn new(client: HttpClient, chunk_size: usize) -> Result<Self, ConfigError> {
        if chunk_size == 0 {
            return Err(ConfigError::InvalidChunkSize);
        }
        Ok(Self { client, chunk_size })
    }
}

#[async_trait]
impl Downloader for HttpDownloader {
    async fn download(
        &self,
        url: &str,
        dest: &Path,
        on_progress: ProgressSink<'_>,
    ) -> Result<u64, DownloadError> {
        if url.is_empty() {
            return Err(DownloadError::InvalidUrl {
                url: url.to_string(),
            });
        }

        ensure_parent_dirs(dest).await?;

        let response = self.client.get(url).await.map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::http(format!("HTTP {}", status)));
        }

        // A zero content length is indistinguishable from an omitted
        // header for progress purposes: both mean unknown-total mode.
        let total = response.content_length().filter(|len| *len > 0);

        let mut file = File::create(dest)
            .await
            .map_err(|e| DownloadError::filesystem(dest, e))?;

        let stream = response.bytes_stream().map(|item| item.map_err(map_transport_error));
        futures_util::pin_mut!(stream);

        write_stream(stream, &mut file, dest, self.chunk_size, total, on_progress).await
    }
}

/// Create the destination's parent directories when absent (idempotent)
async fn ensure_parent_dirs(dest: &Path) -> Result<(), DownloadError> {
    if let Some(parent) = dest.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| DownloadError::filesystem(parent, e))?;
        }
    }
    Ok(())
}

fn map_transport_error(e: reqwest::Error) -> DownloadError {
    if e.is_timeout() {
        DownloadError::Timeout
    } else {
        DownloadError::http(e.to_string())
    }
}

/// Drain a byte stream into the file in chunks of at most `chunk_size`
/// bytes, invoking the sink after each chunk write and before any
/// further I/O
async fn write_stream<S>(
    mut stream: S,
    file: &mut File,
    dest: &Path,
    chunk_size: usize,
    total: Option<u64>,
    on_progress: ProgressSink<'_>,
) -> Result<u64, DownloadError>
where
    S: Stream<Item = Result<Bytes, DownloadError>> + Unpin,
{
    let mut pending = BytesMut::new();
    let mut written: u64 = 0;
    let mut stream_error = None;

    while let Some(frame) = stream.next().await {
        let frame = match frame {
            Ok(frame) => frame,
            Err(e) => {
                stream_error = Some(e);
                break;
            }
        };
        pending.extend_from_slice(&frame);

        while pending.len() >= chunk_size {
            let chunk = pending.split_to(chunk_size);
            file.write_all(&chunk)
                .await
                .map_err(|e| DownloadError::filesystem(dest, e))?;
            written += chunk.len() as u64;
            on_progress(written, total);
        }
    }

    // Final partial chunk, only after a clean end of stream
    if stream_error.is_none() && !pending.is_empty() {
        file.write_all(&pending)
            .await
            .map_err(|e| DownloadError::filesystem(dest, e))?;
        written += pending.len() as u64;
        on_progress(written, total);
    }

    // Flush on every path so the bytes written so far are on disk even
    // when the transfer failed mid-stream
    file.flush()
        .await
        .map_err(|e| DownloadError::filesystem(dest, e))?;

    if let Some(e) = stream_error {
        return Err(e);
    }

    if let Some(expected) = total {
        if written < expected {
            return Err(DownloadError::IncompleteTransfer {
                expected,
                received: written,
            });
        }
    }

    Ok(written)
}
