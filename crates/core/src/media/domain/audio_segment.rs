/// Decoded audio: interleaved PCM samples normalized to [-1.0, 1.0].
#[derive(Clone, Debug)]
pub struct AudioSegment {
    samples: Vec<f32>,
    sample_rate: u32,
    channels: u16,
}

impl AudioSegment {
    pub fn new(samples: Vec<f32>, sample_rate: u32, channels: u16) -> Self {
        Self {
            samples,
            sample_rate,
            channels,
        }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// Samples per channel.
    pub fn frames(&self) -> usize {
        if self.channels == 0 {
            return 0;
        }
        self.samples.len() / self.channels as usize
    }

    pub fn duration(&self) -> f64 {
        self.frames() as f64 / self.sample_rate as f64
    }

    /// Yields blocks of at most `frames_per_block` frames, each
    /// de-interleaved into one plane per channel. Blocks are built on
    /// demand, so only one is held at a time.
    pub fn planar_blocks(
        &self,
        frames_per_block: usize,
    ) -> impl Iterator<Item = Vec<Vec<f32>>> + '_ {
        let channels = self.channels.max(1) as usize;
        self.samples
            .chunks(frames_per_block.max(1) * channels)
            .map(move |chunk| {
                (0..channels)
                    .map(|c| chunk.iter().skip(c).step_by(channels).copied().collect())
                    .collect()
            })
    }
}
