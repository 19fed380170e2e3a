use std::fmt;

use crate::config::SimConfig;
use crate::render::Invalidate;
use crate::sim::Simulation;

/// Opaque id of a registered one-shot timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerError {
    /// No free timer slots.
    Exhausted,
}

impl fmt::Display for TimerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimerError::Exhausted => write!(f, "no free timer slots"),
        }
    }
}

impl std::error::Error for TimerError {}

/// Host one-shot timer service.
///
/// When a registered timer expires the host hands its handle back to
/// [`TickScheduler::on_timer`].
pub trait TimerService {
    fn register(&mut self, delay_ms: u32) -> Result<TimerHandle, TimerError>;
    fn cancel(&mut self, handle: TimerHandle);
}

/// Latest battery reading pushed by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerState {
    pub charge_percent: u8,
    pub is_charging: bool,
}

impl Default for PowerState {
    fn default() -> Self {
        Self {
            charge_percent: 100,
            is_charging: false,
        }
    }
}

/// Which interval preset is in effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cadence {
    Normal,
    LowPower,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// Not armed; only before `start()` or transiently inside a tick.
    Idle,
    /// Waiting on exactly this one-shot timer.
    Armed(TimerHandle),
    /// Re-arming failed twice; waits for the host to call `start()` again.
    Stalled,
    /// Torn down; no tick will ever run again.
    TornDown,
}

/// Re-armed one-shot driver for the simulation.
///
/// Each firing runs one tick, marks the surface dirty and registers the next
/// timer, picking the interval from the cached power state.
pub struct TickScheduler {
    state: SchedulerState,
    power: PowerState,
    normal_ms: u32,
    low_power_ms: u32,
    low_battery_percent: u8,
    stalls: u64,
}

impl TickScheduler {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            state: SchedulerState::Idle,
            power: PowerState::default(),
            normal_ms: config.tick_interval_ms,
            low_power_ms: config.low_power_interval_ms,
            low_battery_percent: config.low_battery_percent,
            stalls: 0,
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn stalls(&self) -> u64 {
        self.stalls
    }

    /// Cache the latest battery reading; used on the next re-arm.
    pub fn set_power_state(&mut self, power: PowerState) {
        if self.cadence_for(power) != self.cadence() {
            log::info!(
                "battery {}%{}: switching to {:?} cadence",
                power.charge_percent,
                if power.is_charging { " (charging)" } else { "" },
                self.cadence_for(power)
            );
        }
        self.power = power;
    }

    fn cadence_for(&self, power: PowerState) -> Cadence {
        if power.charge_percent < self.low_battery_percent && !power.is_charging {
            Cadence::LowPower
        } else {
            Cadence::Normal
        }
    }

    pub fn cadence(&self) -> Cadence {
        self.cadence_for(self.power)
    }

    pub fn interval_ms(&self) -> u32 {
        match self.cadence() {
            Cadence::Normal => self.normal_ms,
            Cadence::LowPower => self.low_power_ms,
        }
    }

    /// Arm the first timer, or re-arm after a stall. Returns whether a timer
    /// is now pending.
    pub fn start<T: TimerService + ?Sized>(&mut self, timers: &mut T) -> bool {
        match self.state {
            SchedulerState::Armed(_) => true,
            SchedulerState::TornDown => {
                log::debug!("start() after teardown ignored");
                false
            }
            SchedulerState::Idle | SchedulerState::Stalled => {
                self.arm(timers);
                matches!(self.state, SchedulerState::Armed(_))
            }
        }
    }

    /// Handle an expired timer. Runs one tick only if `handle` is the
    /// pending one; stale handles and anything after teardown are ignored.
    pub fn on_timer<T, S>(
        &mut self,
        handle: TimerHandle,
        timers: &mut T,
        sim: &mut Simulation,
        surface: &mut S,
    ) -> bool
    where
        T: TimerService + ?Sized,
        S: Invalidate + ?Sized,
    {
        match self.state {
            SchedulerState::Armed(pending) if pending == handle => {}
            _ => {
                log::trace!("ignoring timer {:?} in state {:?}", handle, self.state);
                return false;
            }
        }
        self.state = SchedulerState::Idle;

        sim.tick();
        surface.mark_dirty();

        self.arm(timers);
        true
    }

    /// Register the next one-shot. On failure retry once at twice the
    /// interval, then stall.
    fn arm<T: TimerService + ?Sized>(&mut self, timers: &mut T) {
        let interval = self.interval_ms();
        let registered = timers.register(interval).or_else(|err| {
            log::debug!("timer registration failed ({err}), retrying at {}ms", interval * 2);
            timers.register(interval.saturating_mul(2))
        });
        match registered {
            Ok(handle) => self.state = SchedulerState::Armed(handle),
            Err(err) => {
                self.stalls += 1;
                self.state = SchedulerState::Stalled;
                log::warn!("tick scheduler stalled: {err}");
            }
        }
    }

    /// Withdraw the pending timer, exactly once, and refuse all later ticks.
    pub fn teardown<T: TimerService + ?Sized>(&mut self, timers: &mut T) {
        if let SchedulerState::Armed(handle) = self.state {
            timers.cancel(handle);
        }
        self.state = SchedulerState::TornDown;
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;

    /// Scripted timer service: records calls, fails on demand.
    #[derive(Default)]
    struct ScriptedTimers {
        next_id: u32,
        registered: Vec<(TimerHandle, u32)>,
        cancelled: Vec<TimerHandle>,
        /// Results for upcoming `register` calls; `true` = fail.
        failures: VecDeque<bool>,
    }

    impl TimerService for ScriptedTimers {
        fn register(&mut self, delay_ms: u32) -> Result<TimerHandle, TimerError> {
            if self.failures.pop_front().unwrap_or(false) {
                return Err(TimerError::Exhausted);
            }
            self.next_id += 1;
            let handle = TimerHandle(self.next_id);
            self.registered.push((handle, delay_ms));
            Ok(handle)
        }

        fn cancel(&mut self, handle: TimerHandle) {
            self.cancelled.push(handle);
        }
    }

    #[derive(Default)]
    struct Surface {
        dirty: u32,
    }

    impl Invalidate for Surface {
        fn mark_dirty(&mut self) {
            self.dirty += 1;
        }
    }

    fn setup() -> (TickScheduler, ScriptedTimers, Simulation, Surface) {
        let config = SimConfig {
            seed: Some(17),
            ..SimConfig::default()
        };
        (
            TickScheduler::new(&config),
            ScriptedTimers::default(),
            Simulation::new(config),
            Surface::default(),
        )
    }

    fn pending(scheduler: &TickScheduler) -> TimerHandle {
        match scheduler.state() {
            SchedulerState::Armed(handle) => handle,
            other => panic!("expected armed scheduler, got {other:?}"),
        }
    }

    #[test]
    fn low_battery_not_charging_selects_low_power() {
        let (mut scheduler, ..) = setup();
        scheduler.set_power_state(PowerState {
            charge_percent: 15,
            is_charging: false,
        });
        assert_eq!(scheduler.cadence(), Cadence::LowPower);
        assert_eq!(scheduler.interval_ms(), 250);

        scheduler.set_power_state(PowerState {
            charge_percent: 15,
            is_charging: true,
        });
        assert_eq!(scheduler.cadence(), Cadence::Normal);

        scheduler.set_power_state(PowerState {
            charge_percent: 20,
            is_charging: false,
        });
        assert_eq!(scheduler.interval_ms(), 100);
    }

    #[test]
    fn firing_ticks_marks_dirty_and_rearms() {
        let (mut scheduler, mut timers, mut sim, mut surface) = setup();
        assert!(scheduler.start(&mut timers));

        for expected in 1..=3 {
            let handle = pending(&scheduler);
            assert!(scheduler.on_timer(handle, &mut timers, &mut sim, &mut surface));
            assert_eq!(sim.tick_count(), expected);
            assert_eq!(surface.dirty, expected as u32);
        }
        assert_eq!(timers.registered.len(), 4);
        assert!(timers.registered.iter().all(|&(_, ms)| ms == 100));
    }

    #[test]
    fn rearm_uses_latest_power_state() {
        let (mut scheduler, mut timers, mut sim, mut surface) = setup();
        scheduler.start(&mut timers);
        scheduler.set_power_state(PowerState {
            charge_percent: 5,
            is_charging: false,
        });
        let handle = pending(&scheduler);
        scheduler.on_timer(handle, &mut timers, &mut sim, &mut surface);
        assert_eq!(timers.registered.last().unwrap().1, 250);
    }

    #[test]
    fn stale_handles_are_ignored() {
        let (mut scheduler, mut timers, mut sim, mut surface) = setup();
        scheduler.start(&mut timers);
        let first = pending(&scheduler);
        scheduler.on_timer(first, &mut timers, &mut sim, &mut surface);

        assert!(!scheduler.on_timer(first, &mut timers, &mut sim, &mut surface));
        assert!(!scheduler.on_timer(TimerHandle(999), &mut timers, &mut sim, &mut surface));
        assert_eq!(sim.tick_count(), 1);
    }

    #[test]
    fn registration_failure_retries_with_doubled_interval() {
        let (mut scheduler, mut timers, mut sim, mut surface) = setup();
        scheduler.start(&mut timers);
        timers.failures.push_back(true);

        let handle = pending(&scheduler);
        scheduler.on_timer(handle, &mut timers, &mut sim, &mut surface);

        assert!(matches!(scheduler.state(), SchedulerState::Armed(_)));
        assert_eq!(timers.registered.last().unwrap().1, 200);
        assert_eq!(scheduler.stalls(), 0);
    }

    #[test]
    fn double_failure_stalls_until_restart() {
        let (mut scheduler, mut timers, mut sim, mut surface) = setup();
        scheduler.start(&mut timers);
        timers.failures.extend([true, true]);

        let handle = pending(&scheduler);
        assert!(scheduler.on_timer(handle, &mut timers, &mut sim, &mut surface));
        assert_eq!(scheduler.state(), SchedulerState::Stalled);
        assert_eq!(scheduler.stalls(), 1);

        assert!(!scheduler.on_timer(handle, &mut timers, &mut sim, &mut surface));
        assert!(scheduler.start(&mut timers));
        assert!(matches!(scheduler.state(), SchedulerState::Armed(_)));
    }

    #[test]
    fn teardown_cancels_once_and_blocks_ticks() {
        let (mut scheduler, mut timers, mut sim, mut surface) = setup();
        scheduler.start(&mut timers);
        let handle = pending(&scheduler);

        scheduler.teardown(&mut timers);
        scheduler.teardown(&mut timers);
        assert_eq!(timers.cancelled, [handle]);
        assert_eq!(scheduler.state(), SchedulerState::TornDown);

        assert!(!scheduler.on_timer(handle, &mut timers, &mut sim, &mut surface));
        assert!(!scheduler.start(&mut timers));
        assert_eq!(sim.tick_count(), 0);
        assert_eq!(surface.dirty, 0);
    }
}
