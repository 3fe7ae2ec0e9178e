use super::effect_preset::EffectPreset;
use crate::shared::constants::{
    DEFAULT_LOWPASS_CUTOFF_HZ, DEFAULT_PITCH_SHIFT, DEFAULT_SPEED_RATIO,
    SLOWED_REVERSED_PITCH_SHIFT, SLOWED_REVERSED_SPEED_RATIO, SPED_UP_PITCH_SHIFT,
    SPED_UP_SPEED_RATIO,
};

/// Values the user supplied explicitly. `None`/`false` means "not given".
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DspOverrides {
    pub speed_ratio: Option<f64>,
    pub pitch_shift: Option<f64>,
    pub lowpass_cutoff_hz: Option<u32>,
    pub bass_boost_db: Option<i32>,
    pub gain_db: Option<i32>,
    pub out_of_phase: bool,
    pub phaser: bool,
    pub tremolo: bool,
    pub compand: bool,
    pub no_reverb: bool,
}

impl DspOverrides {
    /// True when any flag that changes the sound was given.
    ///
    /// `no_reverb` alone does not count: it only removes an effect
    /// from a chain that would otherwise be built.
    pub fn requests_effects(&self) -> bool {
        self.speed_ratio.is_some()
            || self.pitch_shift.is_some()
            || self.lowpass_cutoff_hz.is_some()
            || self.bass_boost_db.is_some()
            || self.gain_db.is_some()
            || self.out_of_phase
            || self.phaser
            || self.tremolo
            || self.compand
    }
}

/// Fully resolved DSP settings for one run.
#[derive(Clone, Debug, PartialEq)]
pub struct DspParameters {
    pub speed_ratio: f64,
    /// Hundredths of a semitone.
    pub pitch_shift: f64,
    pub lowpass_cutoff_hz: u32,
    pub bass_boost_db: Option<i32>,
    pub gain_db: Option<i32>,
    pub out_of_phase: bool,
    pub phaser: bool,
    pub tremolo: bool,
    pub compand: bool,
    pub reverb_enabled: bool,
}

impl DspParameters {
    /// Resolves a preset plus explicit overrides into concrete parameters.
    ///
    /// Named presets always force their speed and pitch, discarding any
    /// explicit `speed_ratio`/`pitch_shift`. Only `KeepOriginal` honors them.
    pub fn resolve(preset: EffectPreset, overrides: &DspOverrides) -> Self {
        let (speed_ratio, pitch_shift) = match preset {
            EffectPreset::SlowedReversed => {
                (SLOWED_REVERSED_SPEED_RATIO, SLOWED_REVERSED_PITCH_SHIFT)
            }
            EffectPreset::SpedUp => (SPED_UP_SPEED_RATIO, SPED_UP_PITCH_SHIFT),
            EffectPreset::KeepOriginal => (
                overrides.speed_ratio.unwrap_or(DEFAULT_SPEED_RATIO),
                overrides.pitch_shift.unwrap_or(DEFAULT_PITCH_SHIFT),
            ),
        };

        Self {
            speed_ratio,
            pitch_shift,
            lowpass_cutoff_hz: overrides
                .lowpass_cutoff_hz
                .unwrap_or(DEFAULT_LOWPASS_CUTOFF_HZ),
            bass_boost_db: overrides.bass_boost_db,
            gain_db: overrides.gain_db,
            out_of_phase: overrides.out_of_phase,
            phaser: overrides.phaser,
            tremolo: overrides.tremolo,
            compand: overrides.compand,
            reverb_enabled: !overrides.no_reverb,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn explicit_speed_and_pitch() -> DspOverrides {
        DspOverrides {
            speed_ratio: Some(2.0),
            pitch_shift: Some(300.0),
            ..DspOverrides::default()
        }
    }

    #[rstest]
    #[case::slowed(EffectPreset::SlowedReversed, 0.75, -75.0)]
    #[case::sped_up(EffectPreset::SpedUp, 1.30, -50.0)]
    fn test_named_preset_forces_speed_and_pitch(
        #[case] preset: EffectPreset,
        #[case] speed: f64,
        #[case] pitch: f64,
    ) {
        for overrides in [DspOverrides::default(), explicit_speed_and_pitch()] {
            let params = DspParameters::resolve(preset, &overrides);
            assert_relative_eq!(params.speed_ratio, speed);
            assert_relative_eq!(params.pitch_shift, pitch);
        }
    }

    #[test]
    fn test_keep_original_defaults() {
        let params = DspParameters::resolve(EffectPreset::KeepOriginal, &DspOverrides::default());
        assert_relative_eq!(params.speed_ratio, 1.0);
        assert_relative_eq!(params.pitch_shift, 0.0);
        assert_eq!(params.lowpass_cutoff_hz, 3500);
        assert_eq!(params.bass_boost_db, None);
        assert_eq!(params.gain_db, None);
        assert!(!params.out_of_phase);
        assert!(!params.phaser);
        assert!(!params.tremolo);
        assert!(!params.compand);
        assert!(params.reverb_enabled);
    }

    #[test]
    fn test_keep_original_honors_explicit_speed_and_pitch() {
        let params = DspParameters::resolve(EffectPreset::KeepOriginal, &explicit_speed_and_pitch());
        assert_relative_eq!(params.speed_ratio, 2.0);
        assert_relative_eq!(params.pitch_shift, 300.0);
    }

    #[rstest]
    #[case::slowed(EffectPreset::SlowedReversed)]
    #[case::sped_up(EffectPreset::SpedUp)]
    #[case::keep(EffectPreset::KeepOriginal)]
    fn test_toggles_are_orthogonal_to_preset(#[case] preset: EffectPreset) {
        let overrides = DspOverrides {
            lowpass_cutoff_hz: Some(8000),
            bass_boost_db: Some(6),
            gain_db: Some(-3),
            out_of_phase: true,
            phaser: true,
            tremolo: true,
            compand: true,
            no_reverb: true,
            ..DspOverrides::default()
        };
        let params = DspParameters::resolve(preset, &overrides);
        assert_eq!(params.lowpass_cutoff_hz, 8000);
        assert_eq!(params.bass_boost_db, Some(6));
        assert_eq!(params.gain_db, Some(-3));
        assert!(params.out_of_phase);
        assert!(params.phaser);
        assert!(params.tremolo);
        assert!(params.compand);
        assert!(!params.reverb_enabled);
    }

    #[test]
    fn test_requests_effects_ignores_no_reverb_alone() {
        let overrides = DspOverrides {
            no_reverb: true,
            ..DspOverrides::default()
        };
        assert!(!overrides.requests_effects());
        assert!(!DspOverrides::default().requests_effects());
    }

    #[rstest]
    #[case::speed(DspOverrides { speed_ratio: Some(1.1), ..DspOverrides::default() })]
    #[case::lowpass(DspOverrides { lowpass_cutoff_hz: Some(3500), ..DspOverrides::default() })]
    #[case::bass(DspOverrides { bass_boost_db: Some(0), ..DspOverrides::default() })]
    #[case::phaser(DspOverrides { phaser: true, ..DspOverrides::default() })]
    fn test_requests_effects_detects_any_flag(#[case] overrides: DspOverrides) {
        assert!(overrides.requests_effects());
    }
}
