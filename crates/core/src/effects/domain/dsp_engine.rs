use std::path::Path;

use thiserror::Error;

use super::effect_chain::EffectChain;

/// What the DSP engine reports when it cannot produce an output file.
#[derive(Error, Debug)]
pub enum EngineFailure {
    #[error("DSP engine '{binary}' is not installed or not on PATH")]
    Unavailable { binary: String },
    #[error("DSP engine could not read input {path}: {detail}")]
    InputUnreadable { path: String, detail: String },
    #[error("DSP engine produced an empty output file")]
    EmptyOutput,
    #[error("DSP engine exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },
    #[error("DSP engine I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Domain interface for the external effect engine.
///
/// Implementations execute every operation of `chain`, in order, against
/// `input` and write the result to `output`. A failed call must leave no
/// file at `output`.
pub trait DspEngine: Send {
    fn apply(&self, chain: &EffectChain, input: &Path, output: &Path)
        -> Result<(), EngineFailure>;
}
