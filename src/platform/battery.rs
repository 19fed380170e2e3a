use std::time::Duration;

use instant::Instant;

use crate::scheduler::PowerState;

/// Battery model for the headless host: loses 1% per `drain` interval while
/// unplugged, gains 1% per interval while charging.
pub struct SimulatedBattery {
    state: PowerState,
    drain: Duration,
    last_step: Instant,
}

impl SimulatedBattery {
    pub fn new(charge_percent: u8, is_charging: bool, drain: Duration) -> Self {
        Self {
            state: PowerState {
                charge_percent: charge_percent.min(100),
                is_charging,
            },
            drain,
            last_step: Instant::now(),
        }
    }

    pub fn state(&self) -> PowerState {
        self.state
    }

    /// Apply every whole interval elapsed since the last step. Returns the
    /// new reading if the charge changed.
    pub fn poll(&mut self, now: Instant) -> Option<PowerState> {
        if self.drain.is_zero() {
            return None;
        }
        let before = self.state.charge_percent;
        while now.saturating_duration_since(self.last_step) >= self.drain {
            self.last_step += self.drain;
            let charge = &mut self.state.charge_percent;
            *charge = if self.state.is_charging {
                (*charge + 1).min(100)
            } else {
                charge.saturating_sub(1)
            };
        }
        (self.state.charge_percent != before).then_some(self.state)
    }
}
