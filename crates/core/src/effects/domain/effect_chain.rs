use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::dsp_engine::{DspEngine, EngineFailure};
use super::dsp_parameters::DspParameters;
use crate::shared::constants::{
    PHASER_DECAY, PHASER_DELAY_MS, PHASER_GAIN_IN, PHASER_GAIN_OUT, PHASER_SPEED_HZ,
    TREMOLO_DEPTH, TREMOLO_FREQUENCY_HZ,
};

/// One named DSP operation with its bound parameters.
#[derive(Clone, Debug, PartialEq)]
pub enum DspOperation {
    BassBoost { gain_db: i32 },
    PitchShift { cents: f64 },
    OutOfPhase,
    Tremolo { frequency_hz: f64, depth: f64 },
    Phaser {
        gain_in: f64,
        gain_out: f64,
        delay_ms: f64,
        decay: f64,
        speed_hz: f64,
    },
    Gain { db: i32 },
    Compand,
    Speed { ratio: f64 },
    Lowpass { cutoff_hz: u32 },
    Reverb,
}

impl DspOperation {
    pub fn name(&self) -> &'static str {
        match self {
            DspOperation::BassBoost { .. } => "bass",
            DspOperation::PitchShift { .. } => "pitch",
            DspOperation::OutOfPhase => "oops",
            DspOperation::Tremolo { .. } => "tremolo",
            DspOperation::Phaser { .. } => "phaser",
            DspOperation::Gain { .. } => "gain",
            DspOperation::Compand => "compand",
            DspOperation::Speed { .. } => "speed",
            DspOperation::Lowpass { .. } => "lowpass",
            DspOperation::Reverb => "reverb",
        }
    }
}

impl fmt::Display for DspOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DspOperation::BassBoost { gain_db } => write!(f, "bass({gain_db})"),
            DspOperation::PitchShift { cents } => write!(f, "pitch({cents})"),
            DspOperation::Tremolo {
                frequency_hz,
                depth,
            } => write!(f, "tremolo({frequency_hz}, {depth})"),
            DspOperation::Phaser { .. } => f.write_str("phaser"),
            DspOperation::Gain { db } => write!(f, "gain({db})"),
            DspOperation::Speed { ratio } => write!(f, "speed({ratio})"),
            DspOperation::Lowpass { cutoff_hz } => write!(f, "lowpass({cutoff_hz})"),
            other => f.write_str(other.name()),
        }
    }
}

/// Ordered DSP operations built from one `DspParameters`.
///
/// The order is fixed by [`EffectChain::build`]; there is no way to
/// reorder or append after construction. [`EffectChain::apply`] consumes
/// the chain so it runs against exactly one input.
#[derive(Clone, Debug, PartialEq)]
pub struct EffectChain {
    operations: Vec<DspOperation>,
}

#[derive(Error, Debug)]
pub enum ChainError {
    #[error("please make sure that there is no space in the audio file's name: {}", .path.display())]
    FilenameContainsSpace {
        path: PathBuf,
        #[source]
        source: EngineFailure,
    },
    #[error("error applying audio effects: {0}")]
    Engine(#[source] EngineFailure),
}

impl EffectChain {
    /// Composes the chain in its fixed order:
    /// bass, pitch, oops, tremolo, phaser, gain, compand, speed + lowpass, reverb.
    ///
    /// Numeric ranges are not checked here; the engine rejects what it
    /// cannot execute.
    pub fn build(params: &DspParameters) -> Self {
        let mut operations = Vec::with_capacity(10);

        if let Some(gain_db) = params.bass_boost_db {
            operations.push(DspOperation::BassBoost { gain_db });
        }

        operations.push(DspOperation::PitchShift {
            cents: params.pitch_shift,
        });

        if params.out_of_phase {
            operations.push(DspOperation::OutOfPhase);
        }

        if params.tremolo {
            operations.push(DspOperation::Tremolo {
                frequency_hz: TREMOLO_FREQUENCY_HZ,
                depth: TREMOLO_DEPTH,
            });
        }

        if params.phaser {
            operations.push(DspOperation::Phaser {
                gain_in: PHASER_GAIN_IN,
                gain_out: PHASER_GAIN_OUT,
                delay_ms: PHASER_DELAY_MS,
                decay: PHASER_DECAY,
                speed_hz: PHASER_SPEED_HZ,
            });
        }

        if let Some(db) = params.gain_db {
            operations.push(DspOperation::Gain { db });
        }

        if params.compand {
            operations.push(DspOperation::Compand);
        }

        operations.push(DspOperation::Speed {
            ratio: params.speed_ratio,
        });
        operations.push(DspOperation::Lowpass {
            cutoff_hz: params.lowpass_cutoff_hz,
        });

        if params.reverb_enabled {
            operations.push(DspOperation::Reverb);
        }

        Self { operations }
    }

    pub fn operations(&self) -> &[DspOperation] {
        &self.operations
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Runs the chain once through `engine`, translating engine failures.
    pub fn apply(
        self,
        engine: &dyn DspEngine,
        input: &Path,
        output: &Path,
    ) -> Result<(), ChainError> {
        log::debug!("Applying effect chain: {self}");
        engine
            .apply(&self, input, output)
            .map_err(|failure| classify_failure(input, failure))
    }
}

impl fmt::Display for EffectChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.operations.iter().map(|op| op.to_string()).collect();
        write!(f, "[{}]", names.join(", "))
    }
}

/// An unreadable input or empty output on a file name with a space is
/// the engine's known quoting artifact; everything else is generic.
fn classify_failure(input: &Path, failure: EngineFailure) -> ChainError {
    let name_has_space = input
        .file_name()
        .map(|name| name.to_string_lossy().contains(' '))
        .unwrap_or(false);
    let is_artifact = matches!(
        failure,
        EngineFailure::InputUnreadable { .. } | EngineFailure::EmptyOutput
    );

    if name_has_space && is_artifact {
        ChainError::FilenameContainsSpace {
            path: input.to_path_buf(),
            source: failure,
        }
    } else {
        ChainError::Engine(failure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::domain::dsp_parameters::DspOverrides;
    use crate::effects::domain::effect_preset::EffectPreset;
    use std::sync::{Arc, Mutex};

    fn params(preset: EffectPreset, overrides: DspOverrides) -> DspParameters {
        DspParameters::resolve(preset, &overrides)
    }

    fn all_toggles() -> DspOverrides {
        DspOverrides {
            bass_boost_db: Some(4),
            gain_db: Some(-2),
            out_of_phase: true,
            phaser: true,
            tremolo: true,
            compand: true,
            ..DspOverrides::default()
        }
    }

    fn names(chain: &EffectChain) -> Vec<&'static str> {
        chain.operations().iter().map(|op| op.name()).collect()
    }

    // ─── Stubs ───

    struct StubEngine {
        failure: Mutex<Option<EngineFailure>>,
        seen: Arc<Mutex<Vec<Vec<DspOperation>>>>,
    }

    impl StubEngine {
        fn new(failure: Option<EngineFailure>) -> Self {
            Self {
                failure: Mutex::new(failure),
                seen: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    impl DspEngine for StubEngine {
        fn apply(&self, chain: &EffectChain, _: &Path, _: &Path) -> Result<(), EngineFailure> {
            self.seen
                .lock()
                .unwrap()
                .push(chain.operations().to_vec());
            match self.failure.lock().unwrap().take() {
                Some(failure) => Err(failure),
                None => Ok(()),
            }
        }
    }

    // ─── Ordering ───

    #[test]
    fn test_sped_up_chain() {
        let chain = EffectChain::build(&params(EffectPreset::SpedUp, DspOverrides::default()));
        assert_eq!(
            chain.operations(),
            &[
                DspOperation::PitchShift { cents: -50.0 },
                DspOperation::Speed { ratio: 1.30 },
                DspOperation::Lowpass { cutoff_hz: 3500 },
                DspOperation::Reverb,
            ]
        );
    }

    #[test]
    fn test_full_chain_order() {
        let chain = EffectChain::build(&params(EffectPreset::SlowedReversed, all_toggles()));
        assert_eq!(
            names(&chain),
            vec![
                "bass", "pitch", "oops", "tremolo", "phaser", "gain", "compand", "speed",
                "lowpass", "reverb"
            ]
        );
    }

    #[test]
    fn test_order_is_stable_for_every_toggle_subset() {
        let full_order = [
            "bass", "pitch", "oops", "tremolo", "phaser", "gain", "compand", "speed", "lowpass",
            "reverb",
        ];
        for mask in 0u32..128 {
            let overrides = DspOverrides {
                bass_boost_db: (mask & 1 != 0).then_some(3),
                out_of_phase: mask & 2 != 0,
                tremolo: mask & 4 != 0,
                phaser: mask & 8 != 0,
                gain_db: (mask & 16 != 0).then_some(1),
                compand: mask & 32 != 0,
                no_reverb: mask & 64 != 0,
                ..DspOverrides::default()
            };
            let chain = EffectChain::build(&params(EffectPreset::KeepOriginal, overrides));
            let got = names(&chain);
            let expected: Vec<&str> = full_order
                .iter()
                .copied()
                .filter(|name| got.contains(name))
                .collect();
            assert_eq!(got, expected, "mask {mask:#b}");

            let speed = got.iter().position(|n| *n == "speed").unwrap();
            assert_eq!(got[speed + 1], "lowpass");
        }
    }

    #[test]
    fn test_pitch_always_present_even_when_zero() {
        let chain = EffectChain::build(&params(EffectPreset::KeepOriginal, DspOverrides::default()));
        assert!(chain
            .operations()
            .contains(&DspOperation::PitchShift { cents: 0.0 }));
    }

    #[test]
    fn test_no_reverb_drops_reverb_only() {
        let overrides = DspOverrides {
            no_reverb: true,
            ..DspOverrides::default()
        };
        let chain = EffectChain::build(&params(EffectPreset::SpedUp, overrides));
        assert_eq!(names(&chain), vec!["pitch", "speed", "lowpass"]);
    }

    #[test]
    fn test_fixed_sub_parameters() {
        let chain = EffectChain::build(&params(EffectPreset::KeepOriginal, all_toggles()));
        assert!(chain.operations().contains(&DspOperation::Tremolo {
            frequency_hz: 500.0,
            depth: 50.0
        }));
        assert!(chain.operations().contains(&DspOperation::Phaser {
            gain_in: 0.9,
            gain_out: 0.8,
            delay_ms: 2.0,
            decay: 0.2,
            speed_hz: 0.5,
        }));
    }

    #[test]
    fn test_display_lists_operations() {
        let chain = EffectChain::build(&params(EffectPreset::SpedUp, DspOverrides::default()));
        assert_eq!(
            chain.to_string(),
            "[pitch(-50), speed(1.3), lowpass(3500), reverb]"
        );
        assert_eq!(chain.len(), 4);
        assert!(!chain.is_empty());
    }

    // ─── Apply / failure translation ───

    #[test]
    fn test_apply_passes_chain_to_engine() {
        let engine = StubEngine::new(None);
        let seen = engine.seen.clone();
        let chain = EffectChain::build(&params(EffectPreset::SpedUp, DspOverrides::default()));
        let expected = chain.operations().to_vec();

        chain
            .apply(&engine, Path::new("song.mp3"), Path::new("song_sped_up.mp3"))
            .unwrap();

        assert_eq!(*seen.lock().unwrap(), vec![expected]);
    }

    #[test]
    fn test_unreadable_input_with_space_is_filename_error() {
        let engine = StubEngine::new(Some(EngineFailure::InputUnreadable {
            path: "my song.mp3".to_string(),
            detail: "can't open input file".to_string(),
        }));
        let chain = EffectChain::build(&params(EffectPreset::SpedUp, DspOverrides::default()));

        let err = chain
            .apply(&engine, Path::new("/music/my song.mp3"), Path::new("/music/out.mp3"))
            .unwrap_err();

        assert!(matches!(err, ChainError::FilenameContainsSpace { .. }));
        assert!(err.to_string().contains("no space"));
    }

    #[test]
    fn test_empty_output_with_space_is_filename_error() {
        let engine = StubEngine::new(Some(EngineFailure::EmptyOutput));
        let chain = EffectChain::build(&params(EffectPreset::SpedUp, DspOverrides::default()));

        let err = chain
            .apply(&engine, Path::new("my song.mp3"), Path::new("out.mp3"))
            .unwrap_err();

        assert!(matches!(err, ChainError::FilenameContainsSpace { .. }));
    }

    #[test]
    fn test_space_in_directory_only_is_generic_error() {
        let engine = StubEngine::new(Some(EngineFailure::EmptyOutput));
        let chain = EffectChain::build(&params(EffectPreset::SpedUp, DspOverrides::default()));

        let err = chain
            .apply(&engine, Path::new("/my music/song.mp3"), Path::new("out.mp3"))
            .unwrap_err();

        assert!(matches!(err, ChainError::Engine(EngineFailure::EmptyOutput)));
    }

    #[test]
    fn test_other_failure_is_generic_error() {
        let engine = StubEngine::new(Some(EngineFailure::Failed {
            status: "exit status: 2".to_string(),
            stderr: "sox FAIL pitch: usage".to_string(),
        }));
        let chain = EffectChain::build(&params(EffectPreset::SpedUp, DspOverrides::default()));

        let err = chain
            .apply(&engine, Path::new("my song.mp3"), Path::new("out.mp3"))
            .unwrap_err();

        assert!(matches!(err, ChainError::Engine(EngineFailure::Failed { .. })));
        assert!(err.to_string().contains("sox FAIL"));
    }
}
