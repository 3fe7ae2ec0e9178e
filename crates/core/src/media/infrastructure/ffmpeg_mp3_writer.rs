use std::path::Path;

use ffmpeg_next::format::sample::Type as SampleType;
use ffmpeg_next::format::Sample;
use ffmpeg_next::util::frame::audio::Audio as AudioFrame;

use super::ffmpeg_audio_reader::layout_for;
use crate::media::domain::audio_segment::AudioSegment;
use crate::shared::constants::{MP3_BIT_RATE, MP3_FALLBACK_FRAME_SIZE};

/// Encodes an AudioSegment into an MP3 file using ffmpeg-next (libmp3lame).
pub struct FfmpegMp3Writer {
    bit_rate: usize,
}

impl FfmpegMp3Writer {
    pub fn new() -> Self {
        Self {
            bit_rate: MP3_BIT_RATE,
        }
    }

    /// Writes `audio` to `path` as MP3, regardless of the path's extension.
    pub fn write_audio(
        &self,
        path: &Path,
        audio: &AudioSegment,
    ) -> Result<(), Box<dyn std::error::Error>> {
        ffmpeg_next::init()?;

        let codec = ffmpeg_next::encoder::find_by_name("libmp3lame")
            .or_else(|| ffmpeg_next::encoder::find(ffmpeg_next::codec::Id::MP3))
            .ok_or("MP3 encoder not found")?;
        let layout = layout_for(audio.channels());
        let sample_rate = audio.sample_rate();

        let mut octx = ffmpeg_next::format::output_as(path, "mp3")?;
        let mut ost = octx.add_stream(Some(codec))?;
        let stream_index = ost.index();

        let mut encoder = ffmpeg_next::codec::context::Context::new_with_codec(codec)
            .encoder()
            .audio()?;
        encoder.set_rate(sample_rate as i32);
        encoder.set_channel_layout(layout);
        encoder.set_format(Sample::F32(SampleType::Planar));
        encoder.set_bit_rate(self.bit_rate);
        encoder.set_time_base((1, sample_rate as i32));

        let mut encoder = encoder.open_as(codec)?;
        ost.set_parameters(&encoder);

        let enc_time_base = encoder.time_base();
        let frame_size = match encoder.frame_size() as usize {
            0 => MP3_FALLBACK_FRAME_SIZE,
            n => n,
        };

        octx.write_header()?;

        let ost_time_base = octx
            .stream(stream_index)
            .ok_or("output stream missing after header")?
            .time_base();

        let mut pts: i64 = 0;
        for block in audio.planar_blocks(frame_size) {
            let frames = block.first().map(Vec::len).unwrap_or(0);
            let mut frame = AudioFrame::new(Sample::F32(SampleType::Planar), frames, layout);
            frame.set_rate(sample_rate);
            frame.set_pts(Some(pts));
            for (c, plane) in block.iter().enumerate() {
                frame.plane_mut::<f32>(c)[..frames].copy_from_slice(plane);
            }

            encoder.send_frame(&frame)?;
            flush_packets(
                &mut encoder,
                &mut octx,
                stream_index,
                enc_time_base,
                ost_time_base,
            )?;

            pts += frames as i64;
        }

        encoder.send_eof()?;
        flush_packets(
            &mut encoder,
            &mut octx,
            stream_index,
            enc_time_base,
            ost_time_base,
        )?;

        octx.write_trailer()?;
        Ok(())
    }
}

impl Default for FfmpegMp3Writer {
    fn default() -> Self {
        Self::new()
    }
}

fn flush_packets(
    encoder: &mut ffmpeg_next::codec::encoder::audio::Encoder,
    octx: &mut ffmpeg_next::format::context::Output,
    stream_index: usize,
    enc_time_base: ffmpeg_next::Rational,
    ost_time_base: ffmpeg_next::Rational,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut encoded = ffmpeg_next::Packet::empty();
    while encoder.receive_packet(&mut encoded).is_ok() {
        encoded.set_stream(stream_index);
        encoded.rescale_ts(enc_time_base, ost_time_base);
        encoded.write_interleaved(octx)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_write_audio_unwritable_path() {
        let writer = FfmpegMp3Writer::new();
        let audio = AudioSegment::new(vec![0.0; 44100], 44100, 1);
        let path = if cfg!(windows) {
            Path::new("Z:\\nonexistent\\file.mp3")
        } else {
            Path::new("/nonexistent/file.mp3")
        };
        assert!(writer.write_audio(path, &audio).is_err());
    }
}
