//! Deadline-ordered timer queue behind an injectable clock.
//!
//! The UI loop calls [`Scheduler::due`] on every tick; tests drive the same
//! scheduler with a [`ManualClock`] instead of waiting on wall time.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::{Duration, Instant};

/// Monotonic time source, measured as an offset from the clock's origin.
pub trait Clock: Send + Sync {
    fn now(&self) -> Duration;
}

/// Wall-clock implementation anchored at construction time.
#[derive(Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Virtual clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now_ms: AtomicU64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now_ms
            .fetch_add(by.as_millis() as u64, AtomicOrdering::SeqCst);
    }

    pub fn set(&self, at: Duration) {
        self.now_ms
            .store(at.as_millis() as u64, AtomicOrdering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        Duration::from_millis(self.now_ms.load(AtomicOrdering::SeqCst))
    }
}

/// Handle returned when scheduling; used to cancel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

struct Entry<E> {
    deadline: Duration,
    /// Insertion sequence, breaks deadline ties in scheduling order.
    seq: u64,
    id: TimerId,
    period: Option<Duration>,
    event: E,
}

impl<E> PartialEq for Entry<E> {
    fn eq(&self, other: &Self) -> bool {
        self.deadline == other.deadline && self.seq == other.seq
    }
}

impl<E> Eq for Entry<E> {}

impl<E> PartialOrd for Entry<E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<E> Ord for Entry<E> {
    // Reversed so the std max-heap pops the earliest deadline first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .deadline
            .cmp(&self.deadline)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Single-threaded timer queue. One-shot and recurring timers share the heap.
pub struct Scheduler<E> {
    clock: Arc<dyn Clock>,
    heap: BinaryHeap<Entry<E>>,
    live: HashSet<TimerId>,
    next_id: u64,
    next_seq: u64,
}

impl<E: Clone> Scheduler<E> {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            heap: BinaryHeap::new(),
            live: HashSet::new(),
            next_id: 0,
            next_seq: 0,
        }
    }

    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    /// Fire `event` once, `delay` from now.
    pub fn after(&mut self, delay: Duration, event: E) -> TimerId {
        let deadline = self.now() + delay;
        self.push(deadline, None, event)
    }

    /// Fire `event` every `period`, first firing one period from now.
    pub fn every(&mut self, period: Duration, event: E) -> TimerId {
        let period = period.max(Duration::from_millis(1));
        let deadline = self.now() + period;
        self.push(deadline, Some(period), event)
    }

    /// Cancel a pending timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.live.remove(&id)
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.live.contains(&id)
    }

    /// Number of live timers.
    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Pop every event whose deadline has passed, in deadline order.
    ///
    /// A recurring timer that fell behind fires once, then resumes at the
    /// first period boundary after now.
    pub fn due(&mut self) -> Vec<E> {
        let now = self.now();
        let mut fired = Vec::new();

        while let Some(top) = self.heap.peek() {
            if top.deadline > now {
                break;
            }
            let Some(entry) = self.heap.pop() else {
                break;
            };
            if !self.live.contains(&entry.id) {
                continue;
            }
            fired.push(entry.event.clone());
            match entry.period {
                Some(period) => {
                    let seq = self.bump_seq();
                    self.heap.push(Entry {
                        deadline: next_boundary(entry.deadline, period, now),
                        seq,
                        ..entry
                    });
                }
                None => {
                    self.live.remove(&entry.id);
                }
            }
        }

        // Drop cancelled entries sitting at the top so the heap doesn't grow
        // without bound when timers are routinely cancelled.
        while let Some(top) = self.heap.peek() {
            if self.live.contains(&top.id) {
                break;
            }
            self.heap.pop();
        }

        fired
    }

    fn push(&mut self, deadline: Duration, period: Option<Duration>, event: E) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let seq = self.bump_seq();
        self.live.insert(id);
        self.heap.push(Entry {
            deadline,
            seq,
            id,
            period,
            event,
        });
        id
    }

    fn bump_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }
}

/// First `deadline + k * period` (k >= 1) strictly after `now`.
fn next_boundary(deadline: Duration, period: Duration, now: Duration) -> Duration {
    let behind = now.saturating_sub(deadline);
    let steps = behind.as_nanos() / period.as_nanos() + 1;
    deadline + period.saturating_mul(u32::try_from(steps).unwrap_or(u32::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheduler() -> (Arc<ManualClock>, Scheduler<&'static str>) {
        let clock = Arc::new(ManualClock::new());
        let sched = Scheduler::new(clock.clone() as Arc<dyn Clock>);
        (clock, sched)
    }

    #[test]
    fn one_shot_fires_once_at_deadline() {
        let (clock, mut sched) = scheduler();
        sched.after(Duration::from_millis(500), "a");

        clock.advance(Duration::from_millis(499));
        assert!(sched.due().is_empty());

        clock.advance(Duration::from_millis(1));
        assert_eq!(sched.due(), vec!["a"]);
        assert!(sched.due().is_empty());
        assert!(sched.is_empty());
    }

    #[test]
    fn events_fire_in_deadline_then_insertion_order() {
        let (clock, mut sched) = scheduler();
        sched.after(Duration::from_millis(300), "late");
        sched.after(Duration::from_millis(100), "early");
        sched.after(Duration::from_millis(100), "early-second");

        clock.advance(Duration::from_secs(1));
        assert_eq!(sched.due(), vec!["early", "early-second", "late"]);
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let (clock, mut sched) = scheduler();
        let id = sched.after(Duration::from_millis(100), "x");
        assert!(sched.is_pending(id));
        assert!(sched.cancel(id));
        assert!(!sched.cancel(id));

        clock.advance(Duration::from_secs(1));
        assert!(sched.due().is_empty());
    }

    #[test]
    fn recurring_timer_skips_missed_periods() {
        let (clock, mut sched) = scheduler();
        let id = sched.every(Duration::from_secs(30), "poll");

        clock.advance(Duration::from_secs(29));
        assert!(sched.due().is_empty());

        clock.advance(Duration::from_secs(1));
        assert_eq!(sched.due(), vec!["poll"]);

        // 95s: the 60s and 90s firings were missed, one poll covers both.
        clock.advance(Duration::from_secs(65));
        assert_eq!(sched.due(), vec!["poll"]);
        assert!(sched.is_pending(id));

        // Back on the original grid: next firing at 120s.
        clock.advance(Duration::from_secs(24));
        assert!(sched.due().is_empty());
        clock.advance(Duration::from_secs(1));
        assert_eq!(sched.due(), vec!["poll"]);

        sched.cancel(id);
        clock.advance(Duration::from_secs(60));
        assert!(sched.due().is_empty());
    }

    #[test]
    fn long_suspend_fires_recurring_timer_once() {
        let (clock, mut sched) = scheduler();
        sched.every(Duration::from_secs(30), "poll");

        clock.advance(Duration::from_secs(3600));
        assert_eq!(sched.due(), vec!["poll"]);
        assert!(sched.due().is_empty());

        clock.advance(Duration::from_secs(30));
        assert_eq!(sched.due(), vec!["poll"]);
    }
}
