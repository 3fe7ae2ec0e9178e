use std::fs;
use std::path::{Path, PathBuf};

use super::pipeline_error::PipelineError;
use crate::effects::domain::effect_preset::EffectPreset;
use crate::shared::constants::AUDIO_EXTENSION;

/// Computes where the remix is written.
///
/// Without an explicit name the output sits next to the input as
/// `<input-stem>_<preset>.mp3`; an explicit name becomes `<name-stem>.mp3`.
/// Fails if the result, or the explicit name itself, is the input file.
pub fn resolve_output_path(
    input: &Path,
    output_name: Option<&Path>,
    preset: EffectPreset,
) -> Result<PathBuf, PipelineError> {
    let output = match output_name {
        Some(name) => name.with_extension(AUDIO_EXTENSION),
        None => {
            let stem = input
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            input.with_file_name(format!("{stem}_{preset}.{AUDIO_EXTENSION}"))
        }
    };

    let collides = same_file(input, &output) || output_name.is_some_and(|n| same_file(input, n));
    if collides {
        return Err(PipelineError::IdenticalPath(output));
    }
    Ok(output)
}

/// Directory the output file will be created in.
pub fn output_directory(output: &Path) -> &Path {
    match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// Literal equality, or both exist and canonicalize to the same file.
fn same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
