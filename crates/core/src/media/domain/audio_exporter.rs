use std::path::Path;

/// Domain interface for decoding an audio file and re-exporting it
/// unchanged in the output format.
pub trait AudioExporter: Send {
    fn export(&self, input: &Path, output: &Path) -> Result<(), Box<dyn std::error::Error>>;
}
