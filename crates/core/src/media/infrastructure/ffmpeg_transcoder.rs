use std::path::{Path, PathBuf};

use super::ffmpeg_audio_reader::FfmpegAudioReader;
use super::ffmpeg_mp3_writer::FfmpegMp3Writer;
use crate::media::domain::audio_exporter::AudioExporter;
use crate::media::domain::audio_transcoder::{audio_path_for, AudioTranscoder};
use crate::shared::scratch_file::{commit, scratch_file_for};

/// Decode-then-encode to MP3, used both for pulling audio out of a
/// downloaded video and for the pass-through re-export.
///
/// Encodes into a fresh scratch file beside the target and moves it into
/// place on success, so a failed run never leaves a file at the target
/// path and never writes over the file being read.
pub struct FfmpegTranscoder {
    reader: FfmpegAudioReader,
    writer: FfmpegMp3Writer,
}

impl FfmpegTranscoder {
    pub fn new() -> Self {
        Self {
            reader: FfmpegAudioReader,
            writer: FfmpegMp3Writer::new(),
        }
    }

    fn convert(&self, input: &Path, output: &Path) -> Result<(), Box<dyn std::error::Error>> {
        let audio = self.reader.read_audio(input)?;
        log::info!(
            "Encoding {:.1}s of audio to {}",
            audio.duration(),
            output.display()
        );

        let scratch = scratch_file_for(output)?;
        self.writer.write_audio(&scratch, &audio)?;
        commit(scratch, output)?;
        Ok(())
    }
}

impl Default for FfmpegTranscoder {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioTranscoder for FfmpegTranscoder {
    fn transcode(
        &self,
        video: &Path,
        output_dir: &Path,
    ) -> Result<PathBuf, Box<dyn std::error::Error>> {
        let audio_path = audio_path_for(video, output_dir);
        self.convert(video, &audio_path)?;
        Ok(audio_path)
    }
}

impl AudioExporter for FfmpegTranscoder {
    fn export(&self, input: &Path, output: &Path) -> Result<(), Box<dyn std::error::Error>> {
        self.convert(input, output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::domain::audio_segment::AudioSegment;
    use std::fs;
    use tempfile::TempDir;

    fn tone(seconds: usize) -> AudioSegment {
        let rate = 44_100;
        let samples = (0..rate * seconds)
            .map(|i| (i as f32 * 440.0 * std::f32::consts::TAU / rate as f32).sin() * 0.5)
            .collect();
        AudioSegment::new(samples, rate as u32, 1)
    }

    #[test]
    fn test_export_of_non_media_fails_without_output() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("notes.mp3");
        fs::write(&input, b"this is not audio").unwrap();
        let output = tmp.path().join("notes_keep_original.mp3");

        let result = FfmpegTranscoder::new().export(&input, &output);

        assert!(result.is_err());
        assert!(!output.exists());
        assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_export_never_touches_input_named_like_scratch_file() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("take.part");
        fs::write(&input, b"user audio, not decodable").unwrap();
        let output = tmp.path().join("take.mp3");

        let result = FfmpegTranscoder::new().export(&input, &output);

        assert!(result.is_err());
        assert_eq!(fs::read(&input).unwrap(), b"user audio, not decodable");
        assert!(!output.exists());
        assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_transcode_missing_video_fails() {
        let tmp = TempDir::new().unwrap();
        let result = FfmpegTranscoder::default().transcode(&tmp.path().join("gone.mp4"), tmp.path());
        assert!(result.is_err());
        assert!(!tmp.path().join("gone.mp3").exists());
    }

    #[test]
    fn test_successful_export_keeps_input_named_like_scratch_file() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("take.part");
        // Needs an MP3 encoder in the linked ffmpeg.
        if FfmpegMp3Writer::new().write_audio(&input, &tone(1)).is_err() {
            return;
        }
        let original = fs::read(&input).unwrap();
        let output = tmp.path().join("take.mp3");

        FfmpegTranscoder::new().export(&input, &output).unwrap();

        assert_eq!(fs::read(&input).unwrap(), original);
        assert!(fs::metadata(&output).unwrap().len() > 0);
        assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 2);
    }
}
