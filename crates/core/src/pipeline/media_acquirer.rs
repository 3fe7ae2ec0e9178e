use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use thiserror::Error;

use super::pipeline_logger::PipelineLogger;
use super::working_dir::ScopedWorkingDir;
use crate::media::domain::audio_transcoder::AudioTranscoder;
use crate::media::domain::video_retriever::VideoRetriever;

#[derive(Error, Debug)]
pub enum AcquisitionError {
    #[error("error downloading video: {0}")]
    Download(String),
    #[error("error converting to MP3: {0}")]
    Transcode(String),
}

/// Turns a remote video URL into a local audio file.
///
/// The video is downloaded into the target directory (entered as the
/// working directory for the duration of the download) and its audio
/// track extracted next to it.
pub struct MediaAcquirer {
    retriever: Box<dyn VideoRetriever>,
    transcoder: Box<dyn AudioTranscoder>,
}

impl MediaAcquirer {
    pub fn new(retriever: Box<dyn VideoRetriever>, transcoder: Box<dyn AudioTranscoder>) -> Self {
        Self {
            retriever,
            transcoder,
        }
    }

    pub fn acquire(
        &self,
        url: &str,
        target_dir: &Path,
        logger: &mut dyn PipelineLogger,
    ) -> Result<PathBuf, AcquisitionError> {
        // Absolute, so paths stay valid once the working directory moves.
        let target_dir = fs::canonicalize(target_dir)
            .map_err(|e| AcquisitionError::Download(e.to_string()))?;
        let target_dir = target_dir.as_path();

        let start = Instant::now();
        let video = {
            let _cwd = ScopedWorkingDir::enter(target_dir)
                .map_err(|e| AcquisitionError::Download(e.to_string()))?;
            self.retriever
                .retrieve(url, target_dir)
                .map_err(|e| AcquisitionError::Download(e.to_string()))?
        };
        logger.timing("download", start.elapsed().as_secs_f64() * 1000.0);
        logger.info(&format!("Downloaded video to {}", video.display()));

        let start = Instant::now();
        let audio = self
            .transcoder
            .transcode(&video, target_dir)
            .map_err(|e| AcquisitionError::Transcode(e.to_string()))?;
        logger.timing("transcode", start.elapsed().as_secs_f64() * 1000.0);
        logger.info(&format!("Extracted audio to {}", audio.display()));

        Ok(audio)
    }
}
