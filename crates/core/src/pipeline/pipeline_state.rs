use std::fmt;

/// Stages of a single remix run. `Failed` is reachable from any state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PipelineState {
    Init,
    UrlValidated,
    MediaAcquired,
    PathResolved,
    Processed,
    Done,
    Failed,
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineState::Init => "init",
            PipelineState::UrlValidated => "url_validated",
            PipelineState::MediaAcquired => "media_acquired",
            PipelineState::PathResolved => "path_resolved",
            PipelineState::Processed => "processed",
            PipelineState::Done => "done",
            PipelineState::Failed => "failed",
        };
        f.write_str(name)
    }
}
