use std::time::Duration;

use crate::TimerEvent;
use crate::scheduler::{Scheduler, TimerId};

/// Fixed polling cadence for the backend health probe.
pub const POLL_INTERVAL: Duration = Duration::from_secs(30);

/// A probe the caller should issue against `{base_url}/api/status`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeRequest {
    pub base_url: String,
}

/// Tracks whether the configured backend answered its last health probe.
///
/// The monitor never performs I/O itself; it hands out [`ProbeRequest`]s and
/// records their outcomes. Failed probes are silent.
#[derive(Debug)]
pub struct ConnectivityMonitor {
    base_url: String,
    connected: bool,
    interval: Option<TimerId>,
}

impl ConnectivityMonitor {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            connected: false,
            interval: None,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Arm the recurring poll and return the startup probe.
    pub fn start(&mut self, scheduler: &mut Scheduler<TimerEvent>) -> ProbeRequest {
        if let Some(id) = self.interval.take() {
            scheduler.cancel(id);
        }
        self.interval = Some(scheduler.every(POLL_INTERVAL, TimerEvent::ConnectivityPoll));
        self.probe()
    }

    /// Probe for the current base URL (recurring tick).
    pub fn probe(&self) -> ProbeRequest {
        ProbeRequest {
            base_url: self.base_url.clone(),
        }
    }

    /// Point at a new base URL and return an out-of-cycle probe for it.
    pub fn reconfigure(&mut self, base_url: impl Into<String>) -> ProbeRequest {
        self.base_url = base_url.into();
        self.probe()
    }

    /// Apply a probe outcome. Outcomes for a URL that is no longer
    /// configured are dropped.
    pub fn record(&mut self, base_url: &str, ok: bool) -> bool {
        if base_url != self.base_url {
            tracing::debug!(probed = base_url, current = %self.base_url, "stale probe result");
            return false;
        }
        if ok != self.connected {
            tracing::info!(url = %self.base_url, connected = ok, "backend connectivity changed");
        }
        self.connected = ok;
        true
    }

    /// Cancel the recurring poll. Call on teardown.
    pub fn shutdown(&mut self, scheduler: &mut Scheduler<TimerEvent>) {
        if let Some(id) = self.interval.take() {
            scheduler.cancel(id);
        }
    }

    pub fn is_polling(&self) -> bool {
        self.interval.is_some()
    }
}
