use std::path::Path;

use ffmpeg_next::format::sample::Type as SampleType;
use ffmpeg_next::format::Sample;
use ffmpeg_next::util::frame::audio::Audio as AudioFrame;
use ffmpeg_next::ChannelLayout;

use crate::media::domain::audio_segment::AudioSegment;

/// Decodes the best audio stream of any container ffmpeg can open.
///
/// Keeps the source sample rate; downmixes to stereo when the source
/// has more than two channels.
pub struct FfmpegAudioReader;

impl FfmpegAudioReader {
    pub fn read_audio(&self, path: &Path) -> Result<AudioSegment, Box<dyn std::error::Error>> {
        ffmpeg_next::init()?;

        let mut ictx = ffmpeg_next::format::input(path)?;

        let audio_stream = ictx
            .streams()
            .best(ffmpeg_next::media::Type::Audio)
            .ok_or_else(|| format!("no audio track in {}", path.display()))?;
        let audio_stream_index = audio_stream.index();

        let codec_ctx =
            ffmpeg_next::codec::context::Context::from_parameters(audio_stream.parameters())?;
        let mut decoder = codec_ctx.decoder().audio()?;

        let channels: u16 = if decoder.channels() >= 2 { 2 } else { 1 };
        let out_layout = layout_for(channels);
        let sample_rate = decoder.rate();

        let in_layout = if decoder.channel_layout().is_empty() {
            ChannelLayout::default(decoder.channels() as i32)
        } else {
            decoder.channel_layout()
        };

        let mut resampler = ffmpeg_next::software::resampling::Context::get(
            decoder.format(),
            in_layout,
            sample_rate,
            Sample::F32(SampleType::Planar),
            out_layout,
            sample_rate,
        )?;

        let mut all_samples: Vec<f32> = Vec::new();
        let mut decoded_frame = AudioFrame::empty();
        let mut resampled_frame = AudioFrame::empty();

        for (stream, packet) in ictx.packets() {
            if stream.index() != audio_stream_index {
                continue;
            }

            decoder.send_packet(&packet)?;

            while decoder.receive_frame(&mut decoded_frame).is_ok() {
                resampler.run(&decoded_frame, &mut resampled_frame)?;
                interleave_planes(&resampled_frame, channels, &mut all_samples);
            }
        }

        decoder.send_eof()?;
        while decoder.receive_frame(&mut decoded_frame).is_ok() {
            resampler.run(&decoded_frame, &mut resampled_frame)?;
            interleave_planes(&resampled_frame, channels, &mut all_samples);
        }

        if let Ok(Some(delay)) = resampler.flush(&mut resampled_frame) {
            if delay.output > 0 {
                interleave_planes(&resampled_frame, channels, &mut all_samples);
            }
        }

        log::debug!(
            "Decoded {} samples ({channels} ch @ {sample_rate} Hz) from {}",
            all_samples.len(),
            path.display()
        );

        Ok(AudioSegment::new(all_samples, sample_rate, channels))
    }
}

pub(crate) fn layout_for(channels: u16) -> ChannelLayout {
    if channels >= 2 {
        ChannelLayout::STEREO
    } else {
        ChannelLayout::MONO
    }
}

/// Append a planar f32 frame to `out` in interleaved order.
fn interleave_planes(frame: &AudioFrame, channels: u16, out: &mut Vec<f32>) {
    let num_samples = frame.samples();
    if num_samples == 0 {
        return;
    }
    let planes: Vec<&[f32]> = (0..channels as usize)
        .map(|c| frame.plane::<f32>(c))
        .collect();
    out.reserve(num_samples * planes.len());
    for i in 0..num_samples {
        for plane in &planes {
            out.push(plane[i]);
        }
    }
}
