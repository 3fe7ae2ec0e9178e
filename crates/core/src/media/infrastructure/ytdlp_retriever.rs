use std::collections::HashMap;
use std::fs;
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use serde::Deserialize;
use thiserror::Error;

use crate::media::domain::video_retriever::{safe_file_name, VideoRetriever};
use crate::shared::constants::DEFAULT_YT_DLP_BINARY;
use crate::shared::scratch_file::{commit, scratch_file_for};

#[derive(Error, Debug)]
pub enum RetrieveError {
    #[error("video resolver '{binary}' is not installed or not on PATH")]
    Unavailable { binary: String },
    #[error("video resolver failed for {url}: {stderr}")]
    Metadata { url: String, stderr: String },
    #[error("could not parse video metadata: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("no downloadable stream reported for {0}")]
    MissingStream(String),
    #[error("download failed for {url}: {source}")]
    Download {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to write video to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to run video resolver: {0}")]
    Io(#[from] std::io::Error),
}

/// Progress callback: `(bytes_downloaded, total_bytes)`.
/// `total_bytes` is 0 if the server didn't provide Content-Length.
pub type ProgressFn = Box<dyn Fn(u64, u64) + Send>;

/// The subset of `yt-dlp -J` output needed to fetch one progressive stream.
#[derive(Debug, Deserialize)]
pub struct VideoInfo {
    pub title: String,
    pub ext: String,
    pub url: Option<String>,
    #[serde(default)]
    pub http_headers: HashMap<String, String>,
}

impl VideoInfo {
    pub fn file_name(&self) -> String {
        format!("{}.{}", safe_file_name(&self.title), self.ext)
    }
}

/// Resolves stream metadata with yt-dlp, then downloads with reqwest.
pub struct YtDlpRetriever {
    binary: PathBuf,
    progress: Option<ProgressFn>,
}

impl YtDlpRetriever {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            progress: None,
        }
    }

    pub fn with_progress(mut self, progress: ProgressFn) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Asks yt-dlp for the best single-file format of `url`.
    pub fn video_info(&self, url: &str) -> Result<VideoInfo, RetrieveError> {
        let output = Command::new(&self.binary)
            .args(["-J", "-f", "best", "--no-playlist", "--no-warnings", url])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => RetrieveError::Unavailable {
                    binary: self.binary.display().to_string(),
                },
                _ => RetrieveError::Io(e),
            })?;

        if !output.status.success() {
            return Err(RetrieveError::Metadata {
                url: url.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        parse_video_info(&output.stdout)
    }
}

impl Default for YtDlpRetriever {
    fn default() -> Self {
        Self::new(DEFAULT_YT_DLP_BINARY)
    }
}

impl VideoRetriever for YtDlpRetriever {
    fn retrieve(
        &self,
        url: &str,
        target_dir: &Path,
    ) -> Result<PathBuf, Box<dyn std::error::Error>> {
        let info = self.video_info(url)?;
        let stream_url = info
            .url
            .as_deref()
            .ok_or_else(|| RetrieveError::MissingStream(url.to_string()))?;

        let dest = target_dir.join(info.file_name());
        log::info!("Downloading '{}' to {}", info.title, dest.display());
        download(
            stream_url,
            &info.http_headers,
            &dest,
            self.progress.as_ref(),
        )?;
        Ok(dest)
    }
}

pub fn parse_video_info(json: &[u8]) -> Result<VideoInfo, RetrieveError> {
    Ok(serde_json::from_slice(json)?)
}

fn download(
    url: &str,
    headers: &HashMap<String, String>,
    dest: &Path,
    progress: Option<&ProgressFn>,
) -> Result<(), RetrieveError> {
    let download_err = |source: reqwest::Error| RetrieveError::Download {
        url: url.to_string(),
        source,
    };

    let client = reqwest::blocking::Client::builder()
        .timeout(None::<std::time::Duration>)
        .build()
        .map_err(download_err)?;
    let mut request = client.get(url);
    for (name, value) in headers {
        request = request.header(name.as_str(), value.as_str());
    }
    let mut response = request
        .send()
        .and_then(|r| r.error_for_status())
        .map_err(download_err)?;

    let scratch = scratch_file_for(dest).map_err(|e| write_error(dest, e))?;
    write_stream(&mut response, &scratch, progress)?;
    commit(scratch, dest).map_err(|e| write_error(dest, e))
}

fn write_stream(
    response: &mut reqwest::blocking::Response,
    path: &Path,
    progress: Option<&ProgressFn>,
) -> Result<(), RetrieveError> {
    let total = response.content_length().unwrap_or(0);
    let mut downloaded: u64 = 0;

    let mut file = fs::File::create(path).map_err(|e| write_error(path, e))?;
    let mut buf = vec![0u8; 1024 * 1024];
    loop {
        let n = response.read(&mut buf).map_err(|e| write_error(path, e))?;
        if n == 0 {
            break;
        }
        file.write_all(&buf[..n]).map_err(|e| write_error(path, e))?;
        downloaded += n as u64;
        if let Some(cb) = progress {
            cb(downloaded, total);
        }
    }
    file.flush().map_err(|e| write_error(path, e))
}

fn write_error(path: &Path, source: std::io::Error) -> RetrieveError {
    RetrieveError::Write {
        path: path.to_path_buf(),
        source,
    }
}
