use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use super::pipeline_error::PipelineError;
use crate::shared::constants::{SHORT_URL_PATTERN, WATCH_URL_PATTERN};

static URL_PATTERNS: Lazy<[Regex; 2]> = Lazy::new(|| {
    [WATCH_URL_PATTERN, SHORT_URL_PATTERN].map(|p| Regex::new(p).expect("static URL pattern"))
});

/// Accepts only the canonical `watch?v=` and short-link video URL forms.
pub fn validate_url(url: &str) -> Result<(), PipelineError> {
    if URL_PATTERNS.iter().any(|re| re.is_match(url)) {
        Ok(())
    } else {
        Err(PipelineError::InvalidUrl(url.to_string()))
    }
}

pub fn check_file_existence(path: &Path) -> Result<(), PipelineError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(PipelineError::FileNotFound(path.to_path_buf()))
    }
}

/// Checks writability by creating (and removing) a temp file in `dir`.
/// An empty path means the current directory.
pub fn check_directory_writable(dir: &Path) -> Result<(), PipelineError> {
    let dir = if dir.as_os_str().is_empty() {
        Path::new(".")
    } else {
        dir
    };

    if !dir.is_dir() {
        return Err(PipelineError::PermissionDenied {
            path: dir.to_path_buf(),
            reason: "not a directory".to_string(),
        });
    }

    tempfile::Builder::new()
        .prefix(".vaporwave-writable")
        .tempfile_in(dir)
        .map(drop)
        .map_err(|e| PipelineError::PermissionDenied {
            path: dir.to_path_buf(),
            reason: e.to_string(),
        })
}
