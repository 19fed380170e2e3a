use std::time::Duration;

use instant::Instant;

use crate::scheduler::{TimerError, TimerHandle, TimerService};

/// Concurrent one-shot timers the host will hold.
pub const TIMER_SLOTS: usize = 4;

#[derive(Debug, Clone, Copy)]
struct Pending {
    handle: TimerHandle,
    deadline: Instant,
}

/// Bounded one-shot timer table. The host loop sleeps until
/// [`next_deadline`](Self::next_deadline) and feeds [`pop_due`](Self::pop_due)
/// results back to the scheduler.
pub struct HeadlessTimers {
    slots: [Option<Pending>; TIMER_SLOTS],
    next_id: u32,
}

impl HeadlessTimers {
    pub fn new() -> Self {
        Self {
            slots: [None; TIMER_SLOTS],
            next_id: 0,
        }
    }

    #[cfg(test)]
    pub fn pending(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    /// Earliest deadline among pending timers.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.slots.iter().flatten().map(|p| p.deadline).min()
    }

    /// Remove and return the earliest timer that has expired by `now`.
    pub fn pop_due(&mut self, now: Instant) -> Option<TimerHandle> {
        let slot = self
            .slots
            .iter_mut()
            .filter(|s| matches!(s, Some(p) if p.deadline <= now))
            .min_by_key(|s| s.map(|p| p.deadline))?;
        slot.take().map(|p| p.handle)
    }

    fn register_at(&mut self, now: Instant, delay_ms: u32) -> Result<TimerHandle, TimerError> {
        let slot = self
            .slots
            .iter_mut()
            .find(|s| s.is_none())
            .ok_or(TimerError::Exhausted)?;
        self.next_id = self.next_id.wrapping_add(1);
        let handle = TimerHandle(self.next_id);
        *slot = Some(Pending {
            handle,
            deadline: now + Duration::from_millis(delay_ms as u64),
        });
        Ok(handle)
    }
}

impl TimerService for HeadlessTimers {
    fn register(&mut self, delay_ms: u32) -> Result<TimerHandle, TimerError> {
        self.register_at(Instant::now(), delay_ms)
    }

    fn cancel(&mut self, handle: TimerHandle) {
        for slot in &mut self.slots {
            if matches!(slot, Some(p) if p.handle == handle) {
                *slot = None;
            }
        }
    }
}
