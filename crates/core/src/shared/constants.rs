/// Accepted remote-video URL shapes: canonical `watch?v=` and short-link.
pub const WATCH_URL_PATTERN: &str = r"^https?://(www\.)?youtube\.com/watch\?v=";
pub const SHORT_URL_PATTERN: &str = r"^https?://youtu\.be/";

/// Extension of every audio file this pipeline produces.
pub const AUDIO_EXTENSION: &str = "mp3";

pub const DEFAULT_SPEED_RATIO: f64 = 1.0;
pub const DEFAULT_PITCH_SHIFT: f64 = 0.0;
pub const DEFAULT_LOWPASS_CUTOFF_HZ: u32 = 3500;

pub const SLOWED_REVERSED_SPEED_RATIO: f64 = 0.75;
pub const SLOWED_REVERSED_PITCH_SHIFT: f64 = -75.0;

pub const SPED_UP_SPEED_RATIO: f64 = 1.30;
pub const SPED_UP_PITCH_SHIFT: f64 = -50.0;

pub const TREMOLO_FREQUENCY_HZ: f64 = 500.0;
pub const TREMOLO_DEPTH: f64 = 50.0;

pub const PHASER_GAIN_IN: f64 = 0.9;
pub const PHASER_GAIN_OUT: f64 = 0.8;
pub const PHASER_DELAY_MS: f64 = 2.0;
pub const PHASER_DECAY: f64 = 0.2;
pub const PHASER_SPEED_HZ: f64 = 0.5;

/// Compander transfer: attack,decay seconds then soft-knee:in,out dB points.
pub const COMPAND_ATTACK_DECAY: &str = "0.2,1";
pub const COMPAND_TRANSFER: &str = "2:-20,-20,-20";

/// Lowpass filter Q (Butterworth).
pub const LOWPASS_Q: &str = "0.707q";

pub const REVERB_REVERBERANCE: u32 = 50;
pub const REVERB_HF_DAMPING: u32 = 50;
pub const REVERB_ROOM_SCALE: u32 = 100;
pub const REVERB_STEREO_DEPTH: u32 = 100;
pub const REVERB_PRE_DELAY_MS: u32 = 20;
pub const REVERB_WET_GAIN_DB: i32 = 0;

/// MP3 encoder bitrate for transcoded and re-exported audio.
pub const MP3_BIT_RATE: usize = 192_000;

/// Encoder frame size fallback when the codec does not report one.
pub const MP3_FALLBACK_FRAME_SIZE: usize = 1152;

pub const DEFAULT_SOX_BINARY: &str = "sox";
pub const DEFAULT_YT_DLP_BINARY: &str = "yt-dlp";
