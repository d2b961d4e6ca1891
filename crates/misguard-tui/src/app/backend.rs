use super::App;
use crate::tui_event::{BackendCommand, BackendEvent};

impl App {
    /// Queue a command for the backend task. Returns false when no backend
    /// is attached or it has shut down.
    pub(super) fn send(&self, cmd: BackendCommand) -> bool {
        match &self.backend_cmd_tx {
            Some(tx) => tx.send(cmd).is_ok(),
            None => {
                tracing::debug!(?cmd, "no backend attached, dropping command");
                false
            }
        }
    }

    /// Apply a result reported by the backend task.
    pub fn handle_backend_event(&mut self, event: BackendEvent) {
        match event {
            BackendEvent::StatusProbed {
                base_url,
                connected,
            } => {
                self.connectivity.record(&base_url, connected);
            }
            BackendEvent::AnalysisFinished { generation, result } => {
                if let Some(ev) = self.session.supply(generation, result) {
                    self.on_session_event(ev);
                }
            }
        }
    }
}
