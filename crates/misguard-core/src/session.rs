//! The staged analysis session: `Idle → Running → Completed | Failed`.
//!
//! Progress is a presentation timer. Checkpoints fire at fixed offsets from
//! the start; the outcome (mock or backend) is supplied separately and the
//! session resolves once the final checkpoint has passed and an outcome is
//! known, whichever happens later.

use std::time::Duration;

use crate::TimerEvent;
use crate::form::FormInput;
use crate::report::{AnalysisReport, AnalysisResult};
use crate::scheduler::{Scheduler, TimerId};

/// Progress values the bar passes through, in order.
pub const CHECKPOINTS: [u8; 4] = [25, 50, 75, 100];

/// Delay between consecutive checkpoints.
pub const CHECKPOINT_INTERVAL: Duration = Duration::from_millis(800);

/// Labels for the four progress steps.
pub const STEP_LABELS: [&str; 4] = [
    "Text Analysis",
    "Source Verification",
    "Bias Detection",
    "Credibility Score",
];

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Idle,
    Running { progress: u8 },
    Completed(AnalysisReport),
    Failed { message: String },
}

/// Why a submission did not start a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartError {
    EmptyBody,
    Disconnected,
    AlreadyRunning,
}

/// State change worth surfacing to the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Progressed(u8),
    Completed,
    Failed,
}

#[derive(Debug)]
pub struct AnalysisSession {
    state: SessionState,
    /// Bumped on every start so late timers and responses from a previous
    /// session are ignored.
    generation: u64,
    outcome: Option<AnalysisResult>,
    timers: Vec<TimerId>,
}

impl Default for AnalysisSession {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisSession {
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
            generation: 0,
            outcome: None,
            timers: Vec::new(),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, SessionState::Running { .. })
    }

    /// Current progress; 0 when idle, 100 once resolved.
    pub fn progress(&self) -> u8 {
        match self.state {
            SessionState::Idle => 0,
            SessionState::Running { progress } => progress,
            SessionState::Completed(_) | SessionState::Failed { .. } => 100,
        }
    }

    /// The live result, if the last session resolved.
    pub fn result(&self) -> Option<AnalysisResult> {
        match &self.state {
            SessionState::Completed(report) => Some(AnalysisResult::Success(report.clone())),
            SessionState::Failed { message } => Some(AnalysisResult::Error {
                message: message.clone(),
            }),
            _ => None,
        }
    }

    /// Validate and begin a new session. On success the prior result and
    /// progress are gone and checkpoint timers are scheduled.
    pub fn start(
        &mut self,
        form: &FormInput,
        connected: bool,
        scheduler: &mut Scheduler<TimerEvent>,
    ) -> Result<u64, StartError> {
        if self.is_running() {
            return Err(StartError::AlreadyRunning);
        }
        if !form.has_body() {
            return Err(StartError::EmptyBody);
        }
        if !connected {
            return Err(StartError::Disconnected);
        }

        self.reset(scheduler);
        self.generation += 1;
        self.state = SessionState::Running { progress: 0 };
        for (i, &progress) in CHECKPOINTS.iter().enumerate() {
            let delay = CHECKPOINT_INTERVAL * (i as u32 + 1);
            let id = scheduler.after(
                delay,
                TimerEvent::Checkpoint {
                    generation: self.generation,
                    progress,
                },
            );
            self.timers.push(id);
        }
        tracing::info!(generation = self.generation, "analysis session started");
        Ok(self.generation)
    }

    /// Record the outcome for `generation`. Resolves immediately if the
    /// final checkpoint already passed.
    pub fn supply(&mut self, generation: u64, outcome: AnalysisResult) -> Option<SessionEvent> {
        if generation != self.generation || !self.is_running() {
            tracing::debug!(generation, current = self.generation, "stale analysis outcome");
            return None;
        }
        self.outcome = Some(outcome);
        if self.progress() == 100 {
            return self.resolve();
        }
        None
    }

    /// Advance to a checkpoint fired by the scheduler.
    pub fn on_checkpoint(&mut self, generation: u64, progress: u8) -> Option<SessionEvent> {
        if generation != self.generation {
            return None;
        }
        let SessionState::Running { progress: current } = self.state else {
            return None;
        };
        if progress <= current {
            return None;
        }
        self.state = SessionState::Running { progress };
        if progress == 100 && self.outcome.is_some() {
            return self.resolve();
        }
        Some(SessionEvent::Progressed(progress))
    }

    /// Return to `Idle`, dropping any result. Refused while running: a
    /// session in flight cannot be aborted.
    pub fn clear(&mut self, scheduler: &mut Scheduler<TimerEvent>) -> bool {
        if self.is_running() {
            return false;
        }
        self.reset(scheduler);
        true
    }

    fn reset(&mut self, scheduler: &mut Scheduler<TimerEvent>) {
        for id in self.timers.drain(..) {
            scheduler.cancel(id);
        }
        self.outcome = None;
        self.state = SessionState::Idle;
    }

    fn resolve(&mut self) -> Option<SessionEvent> {
        self.timers.clear();
        match self.outcome.take()? {
            AnalysisResult::Success(report) => {
                tracing::info!(
                    generation = self.generation,
                    score = report.credibility_score,
                    "analysis session completed"
                );
                self.state = SessionState::Completed(report);
                Some(SessionEvent::Completed)
            }
            AnalysisResult::Error { message } => {
                tracing::warn!(generation = self.generation, %message, "analysis session failed");
                self.state = SessionState::Failed { message };
                Some(SessionEvent::Failed)
            }
        }
    }
}
