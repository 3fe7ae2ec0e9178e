use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::effects::domain::dsp_engine::{DspEngine, EngineFailure};
use crate::effects::domain::effect_chain::{DspOperation, EffectChain};
use crate::shared::constants::{
    AUDIO_EXTENSION, COMPAND_ATTACK_DECAY, COMPAND_TRANSFER, DEFAULT_SOX_BINARY, LOWPASS_Q,
    REVERB_HF_DAMPING, REVERB_PRE_DELAY_MS, REVERB_REVERBERANCE, REVERB_ROOM_SCALE,
    REVERB_STEREO_DEPTH, REVERB_WET_GAIN_DB,
};
use crate::shared::scratch_file::{commit, scratch_file_for};

/// Runs effect chains through the SoX command-line tool.
///
/// Output goes to a freshly created scratch file beside the target and
/// is moved into place only after SoX succeeds with a non-empty file.
pub struct SoxEngine {
    binary: PathBuf,
}

impl SoxEngine {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Full argument list for one invocation.
    pub fn command_args(chain: &EffectChain, input: &Path, output: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "--no-show-progress".into(),
            "-V1".into(),
            input.as_os_str().to_owned(),
            "-t".into(),
            AUDIO_EXTENSION.into(),
            output.as_os_str().to_owned(),
        ];
        for op in chain.operations() {
            args.extend(effect_args(op).into_iter().map(OsString::from));
        }
        args
    }

    fn run(&self, chain: &EffectChain, input: &Path, scratch: &Path) -> Result<(), EngineFailure> {
        let args = Self::command_args(chain, input, scratch);
        log::debug!("Running {} {:?}", self.binary.display(), args);

        let output = Command::new(&self.binary)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => EngineFailure::Unavailable {
                    binary: self.binary.display().to_string(),
                },
                _ => EngineFailure::Io(e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            if stderr.contains("can't open input file") {
                return Err(EngineFailure::InputUnreadable {
                    path: input.display().to_string(),
                    detail: stderr,
                });
            }
            return Err(EngineFailure::Failed {
                status: output.status.to_string(),
                stderr,
            });
        }

        match fs::metadata(scratch) {
            Ok(meta) if meta.len() > 0 => Ok(()),
            _ => Err(EngineFailure::EmptyOutput),
        }
    }
}

impl Default for SoxEngine {
    fn default() -> Self {
        Self::new(DEFAULT_SOX_BINARY)
    }
}

impl DspEngine for SoxEngine {
    fn apply(
        &self,
        chain: &EffectChain,
        input: &Path,
        output: &Path,
    ) -> Result<(), EngineFailure> {
        let scratch = scratch_file_for(output)?;
        self.run(chain, input, &scratch)?;
        commit(scratch, output)?;
        Ok(())
    }
}

/// SoX effect name followed by its positional arguments.
pub fn effect_args(op: &DspOperation) -> Vec<String> {
    let name = op.name().to_string();
    match op {
        DspOperation::BassBoost { gain_db } => vec![name, gain_db.to_string()],
        DspOperation::PitchShift { cents } => vec![name, cents.to_string()],
        DspOperation::OutOfPhase => vec![name],
        DspOperation::Tremolo {
            frequency_hz,
            depth,
        } => vec![name, frequency_hz.to_string(), depth.to_string()],
        DspOperation::Phaser {
            gain_in,
            gain_out,
            delay_ms,
            decay,
            speed_hz,
        } => vec![
            name,
            gain_in.to_string(),
            gain_out.to_string(),
            delay_ms.to_string(),
            decay.to_string(),
            speed_hz.to_string(),
            "-s".to_string(),
        ],
        DspOperation::Gain { db } => vec![name, "-n".to_string(), db.to_string()],
        DspOperation::Compand => vec![
            name,
            COMPAND_ATTACK_DECAY.to_string(),
            COMPAND_TRANSFER.to_string(),
        ],
        DspOperation::Speed { ratio } => vec![name, ratio.to_string()],
        DspOperation::Lowpass { cutoff_hz } => {
            vec![name, cutoff_hz.to_string(), LOWPASS_Q.to_string()]
        }
        DspOperation::Reverb => vec![
            name,
            REVERB_REVERBERANCE.to_string(),
            REVERB_HF_DAMPING.to_string(),
            REVERB_ROOM_SCALE.to_string(),
            REVERB_STEREO_DEPTH.to_string(),
            REVERB_PRE_DELAY_MS.to_string(),
            REVERB_WET_GAIN_DB.to_string(),
        ],
    }
}
