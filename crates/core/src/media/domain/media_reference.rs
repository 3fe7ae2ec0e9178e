use std::path::PathBuf;

/// Where the run's audio comes from.
///
/// A `Remote` reference becomes a plain local path once the
/// `MediaAcquirer` has downloaded and transcoded it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MediaReference {
    /// A pre-existing local audio file.
    Local(PathBuf),
    /// A validated remote video URL.
    Remote(String),
}
