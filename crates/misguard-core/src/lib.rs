use thiserror::Error;

pub mod client;
pub mod connectivity;
pub mod form;
pub mod notification;
pub mod report;
pub mod scheduler;
pub mod session;
pub mod settings;

// Re-export for convenience
pub use client::BackendClient;
pub use connectivity::{ConnectivityMonitor, POLL_INTERVAL, ProbeRequest};
pub use form::{AnalysisMode, ContactField, ContactForm, FormField, FormInput};
pub use notification::{Notification, NotificationId, NotificationQueue, Severity};
pub use report::{
    AnalysisReport, AnalysisResult, AnalyzeRequest, AnalyzeResponse, CredibilityBand, Dimension,
};
pub use scheduler::{Clock, ManualClock, Scheduler, SystemClock, TimerId};
pub use session::{AnalysisSession, SessionEvent, SessionState, StartError};
pub use settings::{FileSettingsStore, MemorySettingsStore, Settings, SettingsStore, ThemeKind};

/// Events delivered by the [`Scheduler`] when a timer fires.
///
/// Every deferred state change in the app goes through one of these, so a
/// single deadline-ordered queue drives the whole UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    /// An analysis session reached a progress checkpoint.
    Checkpoint { generation: u64, progress: u8 },
    /// A notification's lifetime elapsed.
    ExpireNotification(NotificationId),
    /// Recurring backend health probe.
    ConnectivityPoll,
    /// The simulated contact-form send finished.
    ContactSent,
}

#[derive(Error, Debug)]
pub enum GuardError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("backend returned status {status} for {url}")]
    Status { url: String, status: u16 },
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),
    #[error("failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
    #[error("could not determine config directory")]
    NoConfigDir,
}
