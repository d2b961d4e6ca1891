use std::time::Duration;

use crate::TimerEvent;
use crate::scheduler::{Scheduler, TimerId};

/// How long a notification stays visible without being dismissed.
pub const NOTIFICATION_LIFETIME: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

impl Severity {
    pub fn label(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// Generation-time token, derived from the wall clock in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId(pub u64);

#[derive(Debug, Clone)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub severity: Severity,
    expiry: TimerId,
}

/// Insertion-ordered list of transient messages.
///
/// Each entry owns an expiry timer in the shared scheduler; dismissing an
/// entry cancels its timer.
#[derive(Debug, Default)]
pub struct NotificationQueue {
    entries: Vec<Notification>,
    last_id: u64,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message and schedule its expiry.
    pub fn push(
        &mut self,
        message: impl Into<String>,
        severity: Severity,
        scheduler: &mut Scheduler<TimerEvent>,
    ) -> NotificationId {
        let id = self.next_id();
        let message = message.into();
        tracing::debug!(id = id.0, severity = severity.label(), %message, "notification");
        let expiry = scheduler.after(NOTIFICATION_LIFETIME, TimerEvent::ExpireNotification(id));
        self.entries.push(Notification {
            id,
            message,
            severity,
            expiry,
        });
        id
    }

    /// Remove an entry whose lifetime elapsed. No-op if already dismissed.
    pub fn expire(&mut self, id: NotificationId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|n| n.id != id);
        self.entries.len() != before
    }

    /// Remove an entry immediately, regardless of its remaining lifetime.
    pub fn dismiss(&mut self, id: NotificationId, scheduler: &mut Scheduler<TimerEvent>) -> bool {
        match self.entries.iter().position(|n| n.id == id) {
            Some(pos) => {
                let removed = self.entries.remove(pos);
                scheduler.cancel(removed.expiry);
                true
            }
            None => false,
        }
    }

    /// Dismiss every entry.
    pub fn clear(&mut self, scheduler: &mut Scheduler<TimerEvent>) {
        for n in self.entries.drain(..) {
            scheduler.cancel(n.expiry);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.entries.iter()
    }

    pub fn newest(&self) -> Option<&Notification> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // Millisecond timestamps collide when two messages are raised in the same
    // event, so the token is bumped past the previous one.
    fn next_id(&mut self) -> NotificationId {
        let stamp = chrono::Utc::now().timestamp_millis().max(0) as u64;
        let id = stamp.max(self.last_id + 1);
        self.last_id = id;
        NotificationId(id)
    }
}
