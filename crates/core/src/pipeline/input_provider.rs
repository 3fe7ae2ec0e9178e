/// Optional interactive capability injected into the pipeline.
///
/// The pipeline never reads stdin itself; a headless run simply has no
/// provider.
pub trait InputProvider: Send {
    /// Ask a yes/no question.
    fn confirm(&mut self, question: &str) -> bool;

    /// Ask for a line of text. `None` means the user gave nothing.
    fn ask(&mut self, question: &str) -> Option<String>;
}

/// Interprets a yes/no answer. Only `y`/`yes` (any case) count as yes.
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
