use std::path::{Path, PathBuf};

/// Domain interface for fetching a remote video to local storage.
pub trait VideoRetriever: Send {
    /// Downloads the highest-quality stream of `url` into `target_dir`
    /// and returns the local video path.
    fn retrieve(
        &self,
        url: &str,
        target_dir: &Path,
    ) -> Result<PathBuf, Box<dyn std::error::Error>>;
}

/// Turns a reported title into a file name: spaces become underscores
/// and path separators are dropped.
pub fn safe_file_name(title: &str) -> String {
    title
        .trim()
        .chars()
        .filter(|c| !matches!(c, '/' | '\\' | '\0'))
        .map(|c| if c == ' ' { '_' } else { c })
        .collect()
}
