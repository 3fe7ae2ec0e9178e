use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{DateTime, Local};

use super::input_provider::InputProvider;
use super::media_acquirer::MediaAcquirer;
use super::path_resolver::{output_directory, resolve_output_path};
use super::pipeline_error::PipelineError;
use super::pipeline_logger::PipelineLogger;
use super::pipeline_state::PipelineState;
use super::validator::{check_directory_writable, check_file_existence, validate_url};
use crate::effects::domain::dsp_engine::DspEngine;
use crate::effects::domain::dsp_parameters::{DspOverrides, DspParameters};
use crate::effects::domain::effect_chain::EffectChain;
use crate::effects::domain::effect_preset::EffectPreset;
use crate::media::domain::audio_exporter::AudioExporter;
use crate::media::domain::media_reference::MediaReference;

pub const FALLBACK_CONFIRM_PROMPT: &str =
    "Would you like to download a YouTube video instead? (n/y): ";
pub const FALLBACK_URL_PROMPT: &str = "Enter the YouTube URL: ";
pub const FALLBACK_EFFECT_PROMPT: &str =
    "What effect would you like to apply? (slowed_reversed [r], sped_up [s], keep_original [k]): ";

/// What the user asked for in one run.
#[derive(Clone, Debug, Default)]
pub struct RemixRequest {
    pub audio: Option<PathBuf>,
    pub url: Option<String>,
    pub output_name: Option<PathBuf>,
    pub preset: EffectPreset,
    pub overrides: DspOverrides,
    /// Where downloaded videos and their extracted audio are stored.
    pub download_dir: PathBuf,
}

/// Terminal artifact of a successful run.
#[derive(Clone, Debug)]
pub struct PipelineResult {
    pub output_path: PathBuf,
    pub finished_at: DateTime<Local>,
    pub states: Vec<PipelineState>,
}

/// Single-run remix pipeline:
/// validate → (acquire) → resolve path → effect chain or pass-through → done.
///
/// Strictly sequential; every collaborator call blocks until it returns.
pub struct RemixAudioUseCase {
    acquirer: MediaAcquirer,
    engine: Box<dyn DspEngine>,
    exporter: Box<dyn AudioExporter>,
    input_provider: Option<Box<dyn InputProvider>>,
    logger: Box<dyn PipelineLogger>,
    states: Vec<PipelineState>,
}

impl RemixAudioUseCase {
    pub fn new(
        acquirer: MediaAcquirer,
        engine: Box<dyn DspEngine>,
        exporter: Box<dyn AudioExporter>,
        input_provider: Option<Box<dyn InputProvider>>,
        logger: Box<dyn PipelineLogger>,
    ) -> Self {
        Self {
            acquirer,
            engine,
            exporter,
            input_provider,
            logger,
            states: Vec::new(),
        }
    }

    pub fn execute(&mut self, request: RemixRequest) -> Result<PipelineResult, PipelineError> {
        self.states.clear();
        self.transition(PipelineState::Init);

        let result = self.run(request);
        if let Err(ref e) = result {
            log::error!("{e}");
            self.transition(PipelineState::Failed);
        }
        self.logger.summary();

        let output_path = result?;
        Ok(PipelineResult {
            output_path,
            finished_at: Local::now(),
            states: self.states.clone(),
        })
    }

    fn run(&mut self, request: RemixRequest) -> Result<PathBuf, PipelineError> {
        let RemixRequest {
            audio,
            url,
            output_name,
            mut preset,
            overrides,
            download_dir,
        } = request;

        let reference = match (url, audio) {
            (Some(url), _) => {
                validate_url(&url)?;
                self.transition(PipelineState::UrlValidated);
                MediaReference::Remote(url)
            }
            (None, Some(audio)) => MediaReference::Local(audio),
            (None, None) => {
                let (url, chosen) = self.offer_fallback()?;
                validate_url(&url)?;
                self.transition(PipelineState::UrlValidated);
                preset = chosen;
                MediaReference::Remote(url)
            }
        };

        let input = match reference {
            MediaReference::Local(path) => path,
            MediaReference::Remote(url) => {
                check_directory_writable(&download_dir)?;
                let audio = self
                    .acquirer
                    .acquire(&url, &download_dir, self.logger.as_mut())?;
                self.transition(PipelineState::MediaAcquired);
                audio
            }
        };

        check_file_existence(&input)?;
        let output = resolve_output_path(&input, output_name.as_deref(), preset)?;
        check_directory_writable(output_directory(&output))?;
        self.transition(PipelineState::PathResolved);

        if preset == EffectPreset::KeepOriginal && !overrides.requests_effects() {
            self.export_original(&input, &output)?;
        } else {
            let params = DspParameters::resolve(preset, &overrides);
            self.apply_effects(&params, &input, &output)?;
        }
        self.transition(PipelineState::Processed);

        self.transition(PipelineState::Done);
        Ok(output)
    }

    /// Asks the injected provider for a URL when no audio was given.
    fn offer_fallback(&mut self) -> Result<(String, EffectPreset), PipelineError> {
        let provider = self
            .input_provider
            .as_mut()
            .ok_or(PipelineError::NoAudioInput)?;

        log::error!("No audio input provided");
        if !provider.confirm(FALLBACK_CONFIRM_PROMPT) {
            return Err(PipelineError::NoAudioInput);
        }
        let url = provider
            .ask(FALLBACK_URL_PROMPT)
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .ok_or(PipelineError::NoAudioInput)?;
        let choice = provider.ask(FALLBACK_EFFECT_PROMPT).unwrap_or_default();

        Ok((url, EffectPreset::from_prompt_choice(&choice)))
    }

    fn export_original(&mut self, input: &Path, output: &Path) -> Result<(), PipelineError> {
        self.logger
            .info(&format!("Re-encoding {} without effects", input.display()));
        let start = Instant::now();
        self.exporter
            .export(input, output)
            .map_err(|e| PipelineError::Export(e.to_string()))?;
        self.logger
            .timing("export", start.elapsed().as_secs_f64() * 1000.0);
        Ok(())
    }

    fn apply_effects(
        &mut self,
        params: &DspParameters,
        input: &Path,
        output: &Path,
    ) -> Result<(), PipelineError> {
        let chain = EffectChain::build(params);
        self.logger.info(&format!(
            "Applying {} effects to {}",
            chain.len(),
            input.display()
        ));
        let start = Instant::now();
        chain.apply(self.engine.as_ref(), input, output)?;
        self.logger
            .timing("dsp", start.elapsed().as_secs_f64() * 1000.0);
        Ok(())
    }

    fn transition(&mut self, state: PipelineState) {
        self.states.push(state);
        self.logger.stage(state);
    }
}
