//! Event queue and timers
//!
//! Timers are keyed by the event they deliver; at most one timer per event is
//! pending. Due events are queued in due-time order (ties in arming order) and
//! the queue is drained strictly first-in first-out.

use std::collections::VecDeque;

use crate::sim::TimerKind;

/// Events handled by the driver loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Event {
    /// Fixed-rate simulation step
    Refresh,
    /// A simulation timer fired
    Timer(TimerKind),
    /// Pointer click
    Click,
    /// Stop the loop
    Quit,
}

#[derive(Debug, Clone)]
struct Pending {
    event: Event,
    due_ms: u64,
    /// Re-armed with this period after firing
    period_ms: Option<u64>,
    /// Arming sequence number, breaks ties between equal due times
    seq: u64,
}

/// Registry of pending timers
#[derive(Debug, Default)]
pub struct Timers {
    pending: Vec<Pending>,
    next_seq: u64,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    fn arm_inner(&mut self, event: Event, due_ms: u64, period_ms: Option<u64>) {
        self.disarm(event);
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Pending {
            event,
            due_ms,
            period_ms,
            seq,
        });
    }

    /// Deliver `event` once, `after_ms` from `now_ms`
    pub fn arm_once(&mut self, event: Event, now_ms: u64, after_ms: u64) {
        self.arm_inner(event, now_ms + after_ms, None);
    }

    /// Deliver `event` every `period_ms`, starting one period from `now_ms`
    pub fn arm_periodic(&mut self, event: Event, now_ms: u64, period_ms: u64) {
        let period_ms = period_ms.max(1);
        self.arm_inner(event, now_ms + period_ms, Some(period_ms));
    }

    /// Cancel the pending timer for `event`, if any
    pub fn disarm(&mut self, event: Event) {
        self.pending.retain(|p| p.event != event);
    }

    pub fn is_armed(&self, event: Event) -> bool {
        self.pending.iter().any(|p| p.event == event)
    }

    /// Earliest due time across all pending timers
    pub fn next_due(&self) -> Option<u64> {
        self.pending.iter().map(|p| p.due_ms).min()
    }

    /// Queue every event due at or before `now_ms`
    ///
    /// One-shot timers are removed once queued. A periodic timer that fell
    /// behind is queued once and rescheduled from its last due time.
    pub fn fire_due(&mut self, now_ms: u64, queue: &mut EventQueue) -> usize {
        let mut due: Vec<Pending> = Vec::new();
        self.pending.retain(|p| {
            if p.due_ms <= now_ms {
                due.push(p.clone());
                false
            } else {
                true
            }
        });
        due.sort_by_key(|p| (p.due_ms, p.seq));

        for fired in &due {
            queue.push(fired.event);
            if let Some(period) = fired.period_ms {
                let mut next = fired.due_ms + period;
                while next <= now_ms {
                    next += period;
                }
                self.pending.push(Pending {
                    due_ms: next,
                    ..fired.clone()
                });
            }
        }
        due.len()
    }
}

/// FIFO of events waiting to be handled
#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<Event>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: Event) {
        self.events.push_back(event);
    }

    pub fn pop(&mut self) -> Option<Event> {
        self.events.pop_front()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
