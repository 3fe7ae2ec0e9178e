use std::time::Instant;

use super::pipeline_state::PipelineState;

/// Observer for a remix run.
///
/// The use case reports every state transition and how long each
/// collaborator call took; callers decide where that goes.
pub trait PipelineLogger: Send {
    fn stage(&mut self, state: PipelineState);

    /// `stage` names the collaborator call, e.g. `download` or `dsp`.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    fn info(&mut self, message: &str);

    /// Called once when the run ends, successfully or not.
    fn summary(&self) {}
}

/// Discards everything.
pub struct NullPipelineLogger;

impl PipelineLogger for NullPipelineLogger {
    fn stage(&mut self, _state: PipelineState) {}
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn info(&mut self, _message: &str) {}
}

/// Logger for the CLI: forwards messages to `log` and prints the state
/// path plus per-call timings at the end of the run.
pub struct StdoutPipelineLogger {
    started: Instant,
    states: Vec<PipelineState>,
    /// Collaborator timings in call order.
    timings: Vec<(String, f64)>,
}

impl StdoutPipelineLogger {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            states: Vec::new(),
            timings: Vec::new(),
        }
    }

    /// Multi-line report, or `None` before anything was recorded.
    fn summary_string(&self) -> Option<String> {
        if self.states.is_empty() && self.timings.is_empty() {
            return None;
        }

        let total_s = self.started.elapsed().as_secs_f64();
        let path = self
            .states
            .iter()
            .map(PipelineState::to_string)
            .collect::<Vec<_>>()
            .join(" -> ");

        let mut report = format!("Run finished in {total_s:.2}s: {path}");
        for (stage, ms) in &self.timings {
            report.push_str(&format!("\n  {stage:<10} {ms:>9.0} ms"));
        }
        Some(report)
    }
}

impl Default for StdoutPipelineLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineLogger for StdoutPipelineLogger {
    fn stage(&mut self, state: PipelineState) {
        log::debug!("-> {state}");
        self.states.push(state);
    }

    fn timing(&mut self, stage: &str, duration_ms: f64) {
        log::debug!("{stage} took {duration_ms:.0} ms");
        self.timings.push((stage.to_string(), duration_ms));
    }

    fn info(&mut self, message: &str) {
        log::info!("{message}");
    }

    fn summary(&self) {
        if let Some(report) = self.summary_string() {
            log::info!("{report}");
        }
    }
}
