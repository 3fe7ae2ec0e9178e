use std::path::PathBuf;

use thiserror::Error;

use crate::effects::domain::dsp_engine::EngineFailure;
use crate::effects::domain::effect_chain::ChainError;
use crate::pipeline::media_acquirer::AcquisitionError;

/// Every way a run can end in `Failed`. None of these are retried.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("invalid YouTube URL: {0}")]
    InvalidUrl(String),
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("directory not writable: {} ({reason})", .path.display())]
    PermissionDenied { path: PathBuf, reason: String },
    #[error(transparent)]
    Acquisition(#[from] AcquisitionError),
    #[error("input and output name are identical: {}", .0.display())]
    IdenticalPath(PathBuf),
    #[error("error applying audio effects: {0}")]
    DspEngine(#[source] EngineFailure),
    #[error("please make sure that there is no space in the audio file's name: {}", .path.display())]
    DspFilenameSpace {
        path: PathBuf,
        #[source]
        source: EngineFailure,
    },
    #[error("error exporting original audio: {0}")]
    Export(String),
    #[error("no audio input provided")]
    NoAudioInput,
}

impl From<ChainError> for PipelineError {
    fn from(err: ChainError) -> Self {
        match err {
            ChainError::FilenameContainsSpace { path, source } => {
                PipelineError::DspFilenameSpace { path, source }
            }
            ChainError::Engine(failure) => PipelineError::DspEngine(failure),
        }
    }
}
