//! Skip decision and byte transfer of a single task.

use super::config::ProbePolicy;
use super::downloader::Downloader;
use crate::download::marker;
use crate::download::{Outcome, SkipReason, Task};
use crate::error::{Error, Result};
use crate::progress::ProgressDisplay;
use crate::utils::{declared_total, header_content_length, parse_content_range_start};

use futures::StreamExt;
use reqwest::header::{CONTENT_RANGE, LAST_MODIFIED, RANGE};
use reqwest::{Response, StatusCode, Url};
use std::path::Path;
use std::time::SystemTime;
use tokio::fs::{self, File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

impl Downloader {
    /// Decides whether `task` is already complete on disk.
    ///
    /// The marker wins. Without one, a non-empty file whose size matches the
    /// remote `Content-Length` counts as complete and gets marked.
    pub(super) async fn should_skip(&self, task: &Task, url: &Url) -> Result<Option<SkipReason>> {
        let path = task.path();
        if marker::is_marked(path).await {
            debug!("Completion marker found for {:?}", path);
            return Ok(Some(SkipReason::Marker));
        }

        let size_on_disk = match fs::metadata(path).await {
            Ok(meta) if meta.is_file() => meta.len(),
            _ => return Ok(None),
        };
        if size_on_disk == 0 {
            return Ok(None);
        }

        match self.probe(url).await {
            Ok(Some(remote)) if remote == size_on_disk => {
                debug!("{:?} already holds all {} bytes", path, remote);
                marker::mark_complete(path).await;
                Ok(Some(SkipReason::SizeMatch))
            }
            Ok(_) => Ok(None),
            Err(e) => match self.config.probe_policy {
                ProbePolicy::FailOpen => {
                    debug!("Probe of {} failed, downloading anyway: {}", task.link(), e);
                    Ok(None)
                }
                ProbePolicy::FailClosed => Err(Error::ProbeFailed(e.to_string())),
            },
        }
    }

    /// Reads the remote size with a HEAD request.
    async fn probe(&self, url: &Url) -> Result<Option<u64>> {
        debug!("Probing {}", url);
        let res = self
            .client
            .head(url.clone())
            .headers(self.config.headers.clone())
            .send()
            .await?;
        if !res.status().is_success() {
            return Err(Error::Status(res.status()));
        }
        Ok(header_content_length(res.headers()))
    }

    /// Sends the GET request, asking for the bytes from `offset` on when it is
    /// not zero.
    async fn request(&self, url: &Url, offset: u64) -> Result<Response> {
        debug!("Fetching {}", url);
        let mut req = self
            .client
            .get(url.clone())
            .headers(self.config.headers.clone());
        if offset > 0 {
            req = req.header(RANGE, format!("bytes={}-", offset));
        }
        Ok(req.send().await?)
    }

    /// Transfers the body of `task` to its path, resuming a partial file when
    /// allowed, then verifies it and creates the marker.
    pub(super) async fn transfer(
        &self,
        task: &Task,
        url: &Url,
        progress: &ProgressDisplay,
    ) -> Result<Outcome> {
        let path = task.path();
        let size_on_disk = if self.config.resumable {
            match fs::metadata(path).await {
                Ok(meta) if meta.is_file() => meta.len(),
                _ => 0,
            }
        } else {
            0
        };

        let mut res = self.request(url, size_on_disk).await?;
        let mut offset = size_on_disk;
        if offset > 0 {
            match res.status() {
                StatusCode::PARTIAL_CONTENT => {
                    let start = res
                        .headers()
                        .get(CONTENT_RANGE)
                        .and_then(|v| v.to_str().ok())
                        .and_then(parse_content_range_start);
                    if start == Some(offset) {
                        debug!("Resuming {:?} from byte {}", path, offset);
                    } else {
                        debug!(
                            "Partial content of {:?} starts at {:?} instead of byte {}, restarting",
                            path, start, offset
                        );
                        offset = 0;
                        res = self.request(url, 0).await?;
                    }
                }
                StatusCode::OK => {
                    debug!("Range ignored by the server, restarting {:?}", path);
                    offset = 0;
                }
                StatusCode::RANGE_NOT_SATISFIABLE => {
                    debug!("Range of {:?} not satisfiable, restarting", path);
                    offset = 0;
                    res = self.request(url, 0).await?;
                }
                status => return Err(Error::Status(status)),
            }
        }
        if offset == 0 && !res.status().is_success() {
            return Err(Error::Status(res.status()));
        }

        let expected = declared_total(res.headers(), res.content_length(), offset);
        let last_modified = res
            .headers()
            .get(LAST_MODIFIED)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| httpdate::parse_http_date(v).ok());

        let mut file = open_destination(path, offset).await?;

        let pb = progress.start_transfer(&task.label(), expected, offset);
        let copied = copy_body(res, &mut file, |n| pb.inc(n)).await;
        progress.finish_transfer(pb);
        let written = copied?;

        let total = offset + written;
        if let Some(expected) = expected {
            if total != expected {
                return Err(Error::Incomplete {
                    expected,
                    written: total,
                });
            }
        }

        if self.config.preserve_modified {
            if let Some(modified) = last_modified {
                set_modified(file, path, modified).await;
            }
        }

        marker::mark_complete(path).await;
        debug!("Finished {:?} ({} bytes)", path, total);
        Ok(Outcome::Downloaded {
            written,
            resumed_from: offset,
        })
    }
}

/// Opens `path` for writing, appending when `offset` is not zero and starting
/// from an empty file otherwise.
async fn open_destination(path: &Path, offset: u64) -> Result<File> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        debug!("Creating destination directory {:?}", dir);
        fs::create_dir_all(dir).await?;
    }

    debug!("Opening destination file {:?}", path);
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .append(offset > 0)
        .truncate(offset == 0)
        .open(path)
        .await?;
    Ok(file)
}

/// Streams the response body into `file`, returning the bytes written.
async fn copy_body(res: Response, file: &mut File, on_chunk: impl Fn(u64)) -> Result<u64> {
    let mut written = 0u64;
    let mut stream = res.bytes_stream();
    while let Some(item) = stream.next().await {
        let mut chunk = item?;
        let chunk_size = chunk.len() as u64;
        file.write_all_buf(&mut chunk).await?;
        written += chunk_size;
        on_chunk(chunk_size);
    }
    file.flush().await?;
    Ok(written)
}

async fn set_modified(file: File, path: &Path, modified: SystemTime) {
    let file = file.into_std().await;
    if let Err(e) = file.set_modified(modified) {
        warn!("Could not set the modification time of {:?}: {}", path, e);
    }
}
