use std::path::{Path, PathBuf};

use super::video_retriever::safe_file_name;
use crate::shared::constants::AUDIO_EXTENSION;

/// Domain interface for extracting a video's audio track.
pub trait AudioTranscoder: Send {
    /// Extracts the audio track of `video` and encodes it as a lossy
    /// audio file inside `output_dir`. Returns the audio path.
    fn transcode(
        &self,
        video: &Path,
        output_dir: &Path,
    ) -> Result<PathBuf, Box<dyn std::error::Error>>;
}

/// Audio file path for `video`: same stem, audio extension, spaces as
/// underscores, placed in `output_dir`.
pub fn audio_path_for(video: &Path, output_dir: &Path) -> PathBuf {
    let stem = video
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    output_dir.join(format!("{}.{AUDIO_EXTENSION}", safe_file_name(&stem)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audio_path_replaces_extension() {
        let path = audio_path_for(Path::new("/downloads/clip.mp4"), Path::new("/music"));
        assert_eq!(path, PathBuf::from("/music/clip.mp3"));
    }

    #[test]
    fn test_audio_path_normalizes_spaces() {
        let path = audio_path_for(Path::new("/downloads/my clip.webm"), Path::new("/music"));
        assert_eq!(path, PathBuf::from("/music/my_clip.mp3"));
    }
}
