use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Named bundle of default DSP parameters, chosen once per run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EffectPreset {
    SlowedReversed,
    SpedUp,
    #[default]
    KeepOriginal,
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("unknown effect '{0}', expected one of: slowed_reversed, sped_up, keep_original")]
pub struct PresetParseError(pub String);

impl EffectPreset {
    pub const ALL: &[EffectPreset] = &[
        EffectPreset::SlowedReversed,
        EffectPreset::SpedUp,
        EffectPreset::KeepOriginal,
    ];

    /// Identifier used on the command line and as the output file suffix.
    pub fn name(self) -> &'static str {
        match self {
            EffectPreset::SlowedReversed => "slowed_reversed",
            EffectPreset::SpedUp => "sped_up",
            EffectPreset::KeepOriginal => "keep_original",
        }
    }

    /// Maps the one-letter answer of the interactive prompt.
    /// Anything unrecognized keeps the original.
    pub fn from_prompt_choice(choice: &str) -> Self {
        match choice.trim().to_lowercase().as_str() {
            "r" => EffectPreset::SlowedReversed,
            "s" => EffectPreset::SpedUp,
            _ => EffectPreset::KeepOriginal,
        }
    }
}

impl fmt::Display for EffectPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EffectPreset {
    type Err = PresetParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EffectPreset::ALL
            .iter()
            .copied()
            .find(|preset| preset.name() == s)
            .ok_or_else(|| PresetParseError(s.to_string()))
    }
}
