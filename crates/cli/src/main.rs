use std::env;
use std::ffi::OsString;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;

use vaporwave_core::effects::domain::dsp_parameters::DspOverrides;
use vaporwave_core::effects::domain::effect_preset::EffectPreset;
use vaporwave_core::effects::infrastructure::sox_engine::SoxEngine;
use vaporwave_core::media::infrastructure::ffmpeg_transcoder::FfmpegTranscoder;
use vaporwave_core::media::infrastructure::ytdlp_retriever::YtDlpRetriever;
use vaporwave_core::pipeline::input_provider::{is_affirmative, InputProvider};
use vaporwave_core::pipeline::media_acquirer::MediaAcquirer;
use vaporwave_core::pipeline::pipeline_logger::StdoutPipelineLogger;
use vaporwave_core::pipeline::remix_audio_use_case::{RemixAudioUseCase, RemixRequest};
use vaporwave_core::shared::constants::{DEFAULT_SOX_BINARY, DEFAULT_YT_DLP_BINARY};

/// Short flags with more than one character, kept working by rewriting
/// them to their long form before parsing.
const LEGACY_FLAGS: &[(&str, &str)] = &[
    ("-ga", "--gain"),
    ("-op", "--oops"),
    ("-ph", "--phaser"),
    ("-tr", "--tremolo"),
    ("-co", "--compand"),
    ("-nr", "--noreverb"),
];

/// Slowed + reverb and sped-up remixes of local audio or YouTube videos.
#[derive(Parser, Debug)]
#[command(name = "vaporwave")]
struct Cli {
    /// Output file name (".mp3" is appended). Defaults to <input>_<effect>.mp3.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Local audio file to remix.
    #[arg(short, long)]
    audio: Option<PathBuf>,

    /// YouTube URL to download and remix (takes precedence over --audio).
    #[arg(short, long)]
    url: Option<String>,

    /// Playback speed ratio (default 1.0). Ignored by named effects.
    #[arg(short, long)]
    speed: Option<f64>,

    /// Pitch shift in hundredths of a semitone (default 0). Ignored by named effects.
    #[arg(short, long, allow_negative_numbers = true)]
    pitch: Option<f64>,

    /// Lowpass cutoff in Hz (default 3500).
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    lowpass: Option<u32>,

    /// Bass boost in dB.
    #[arg(short, long, allow_negative_numbers = true)]
    bass: Option<i32>,

    /// Gain in dB, applied after normalizing.
    #[arg(long, allow_negative_numbers = true)]
    gain: Option<i32>,

    /// Out-of-phase stereo effect.
    #[arg(long)]
    oops: bool,

    /// Phaser effect.
    #[arg(long)]
    phaser: bool,

    /// Tremolo effect.
    #[arg(long)]
    tremolo: bool,

    /// Dynamic range compression.
    #[arg(long)]
    compand: bool,

    /// Disable the reverb stage.
    #[arg(long)]
    noreverb: bool,

    /// Effect preset: slowed_reversed, sped_up or keep_original.
    #[arg(short, long, default_value = "keep_original")]
    effect: EffectPreset,

    /// SoX executable.
    #[arg(long, default_value = DEFAULT_SOX_BINARY)]
    sox_path: PathBuf,

    /// yt-dlp executable.
    #[arg(long, default_value = DEFAULT_YT_DLP_BINARY)]
    yt_dlp_path: PathBuf,

    /// Never prompt; fail when no input is given.
    #[arg(long)]
    non_interactive: bool,
}

impl Cli {
    fn overrides(&self) -> DspOverrides {
        DspOverrides {
            speed_ratio: self.speed,
            pitch_shift: self.pitch,
            lowpass_cutoff_hz: self.lowpass,
            bass_boost_db: self.bass,
            gain_db: self.gain,
            out_of_phase: self.oops,
            phaser: self.phaser,
            tremolo: self.tremolo,
            compand: self.compand,
            no_reverb: self.noreverb,
        }
    }
}

/// Prompts on stdout and reads answers from stdin.
struct StdinInputProvider;

impl StdinInputProvider {
    fn read_line(question: &str) -> Option<String> {
        print!("{question}");
        io::stdout().flush().ok()?;
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_string()),
        }
    }
}

impl InputProvider for StdinInputProvider {
    fn confirm(&mut self, question: &str) -> bool {
        Self::read_line(question)
            .map(|answer| is_affirmative(&answer))
            .unwrap_or(false)
    }

    fn ask(&mut self, question: &str) -> Option<String> {
        Self::read_line(question).filter(|answer| !answer.is_empty())
    }
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse_from(normalize_legacy_flags(env::args_os()));
    let download_dir = env::current_dir()?;

    let retriever = YtDlpRetriever::new(&cli.yt_dlp_path)
        .with_progress(Box::new(download_progress));
    let acquirer = MediaAcquirer::new(Box::new(retriever), Box::new(FfmpegTranscoder::new()));

    let interactive = !cli.non_interactive && io::stdin().is_terminal();
    let input_provider: Option<Box<dyn InputProvider>> = if interactive {
        Some(Box::new(StdinInputProvider))
    } else {
        None
    };

    let mut use_case = RemixAudioUseCase::new(
        acquirer,
        Box::new(SoxEngine::new(&cli.sox_path)),
        Box::new(FfmpegTranscoder::new()),
        input_provider,
        Box::new(StdoutPipelineLogger::new()),
    );

    let request = RemixRequest {
        overrides: cli.overrides(),
        audio: cli.audio,
        url: cli.url,
        output_name: cli.output,
        preset: cli.effect,
        download_dir,
    };
    let result = use_case.execute(request)?;

    println!("Finished at {}", result.finished_at.format("%H:%M:%S"));
    println!("Output MP3 file: {}", result.output_path.display());
    Ok(())
}

fn normalize_legacy_flags<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| {
            let long = arg
                .to_str()
                .and_then(|s| LEGACY_FLAGS.iter().find(|(short, _)| *short == s))
                .map(|(_, long)| OsString::from(*long));
            long.unwrap_or(arg)
        })
        .collect()
}

fn download_progress(downloaded: u64, total: u64) {
    if total > 0 {
        let pct = (downloaded as f64 / total as f64 * 100.0) as u32;
        eprint!("\rDownloading video... {pct}%");
        if downloaded >= total {
            eprintln!();
        }
    } else {
        eprint!("\rDownloading video... {downloaded} bytes");
    }
}
