use misguard_core::{SessionEvent, Severity, TimerEvent};

use super::App;
use crate::tui_event::BackendCommand;

impl App {
    /// Advance the frame counter and fire every timer that came due.
    pub(super) fn on_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
        for event in self.scheduler.due() {
            self.handle_timer(event);
        }
    }

    fn handle_timer(&mut self, event: TimerEvent) {
        match event {
            TimerEvent::Checkpoint {
                generation,
                progress,
            } => {
                if let Some(ev) = self.session.on_checkpoint(generation, progress) {
                    self.on_session_event(ev);
                }
            }
            TimerEvent::ExpireNotification(id) => {
                self.notifications.expire(id);
            }
            TimerEvent::ConnectivityPoll => {
                let probe = self.connectivity.probe();
                self.send(BackendCommand::Probe {
                    base_url: probe.base_url,
                });
            }
            TimerEvent::ContactSent => {
                self.contact_sending = false;
                self.contact.reset();
                self.contact_cursor = 0;
                self.notify("Message sent successfully!", Severity::Success);
            }
        }
    }

    pub(super) fn on_session_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Progressed(_) => {}
            SessionEvent::Completed => {
                self.notify("Analysis completed successfully!", Severity::Success);
            }
            SessionEvent::Failed => {
                self.notify("Analysis failed. Please try again.", Severity::Error);
            }
        }
    }
}
