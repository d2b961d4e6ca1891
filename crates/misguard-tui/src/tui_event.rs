use misguard_core::{AnalysisResult, AnalyzeRequest};

/// Commands sent from the TUI to the backend.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCommand {
    /// Probe `{base_url}/api/status`.
    Probe { base_url: String },
    /// Submit the form to `{base_url}/api/analyze` for session `generation`.
    Analyze {
        generation: u64,
        base_url: String,
        request: AnalyzeRequest,
    },
}

/// Events flowing from the backend task to the TUI.
#[derive(Debug, Clone)]
pub enum BackendEvent {
    /// A status probe finished.
    StatusProbed { base_url: String, connected: bool },
    /// An analyze request finished (successfully or not).
    AnalysisFinished {
        generation: u64,
        result: AnalysisResult,
    },
}
