use instant::Instant;

/// Which phase of the simulation tick is being timed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SystemPhase {
    Lifecycle = 0,
    Behavior = 1,
    SpatialRebuild = 2,
    Collision = 3,
}

const PHASE_COUNT: usize = 4;

impl SystemPhase {
    pub const ALL: [SystemPhase; PHASE_COUNT] = [
        Self::Lifecycle,
        Self::Behavior,
        Self::SpatialRebuild,
        Self::Collision,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Lifecycle => "Lifecycle",
            Self::Behavior => "Behavior",
            Self::SpatialRebuild => "Spatial",
            Self::Collision => "Collision",
        }
    }
}

/// Per-system timing with exponential moving average smoothing.
pub struct SystemTimers {
    /// EMA-smoothed duration in microseconds per phase.
    pub durations_us: [f64; PHASE_COUNT],
    /// Raw duration of the most recent run of each phase.
    last_us: [f64; PHASE_COUNT],
    /// Timestamp when `begin()` was called.
    start: Instant,
}

const EMA_ALPHA: f64 = 0.1;

impl SystemTimers {
    pub fn new() -> Self {
        Self {
            durations_us: [0.0; PHASE_COUNT],
            last_us: [0.0; PHASE_COUNT],
            start: Instant::now(),
        }
    }

    /// Call before a system runs.
    pub fn begin(&mut self) {
        self.start = Instant::now();
    }

    /// Call after a system finishes. Records elapsed time for `phase`.
    pub fn end(&mut self, phase: SystemPhase) {
        let elapsed_us = self.start.elapsed().as_secs_f64() * 1_000_000.0;
        let idx = phase as usize;
        self.last_us[idx] = elapsed_us;
        self.durations_us[idx] =
            self.durations_us[idx] * (1.0 - EMA_ALPHA) + elapsed_us * EMA_ALPHA;
    }

    /// Sum of all smoothed phase durations (microseconds).
    pub fn total_us(&self) -> f64 {
        self.durations_us.iter().sum()
    }

    /// Raw cost of the last tick (microseconds).
    pub fn last_total_us(&self) -> f64 {
        self.last_us.iter().sum()
    }

    /// One-line breakdown for periodic logs, e.g. `Lifecycle 3.1us | ...`.
    pub fn summary(&self) -> String {
        SystemPhase::ALL
            .iter()
            .map(|&phase| format!("{} {:.1}us", phase.label(), self.durations_us[phase as usize]))
            .collect::<Vec<_>>()
            .join(" | ")
    }
}
