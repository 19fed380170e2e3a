pub mod ring;
pub mod timer;

use instant::Instant;

use self::ring::RingBuffer;
use crate::scheduler::TickScheduler;
use crate::sim::components::Species;
use crate::sim::Simulation;

/// Number of tick costs kept for the max/average readout.
const TICK_HISTORY_LEN: usize = 300;
/// How often to log stats (seconds).
const STATS_LOG_INTERVAL: f64 = 5.0;

/// Rolling tick statistics, logged periodically by the host.
pub struct TickStats {
    /// Raw per-tick cost in microseconds.
    pub tick_costs: RingBuffer<f64>,
    ticks_since_log: u32,
    redraws_since_log: u32,
    /// Primitives issued by the last redraw.
    pub last_draw_calls: usize,
    last_log_time: Instant,
}

impl TickStats {
    pub fn new() -> Self {
        Self {
            tick_costs: RingBuffer::new(TICK_HISTORY_LEN),
            ticks_since_log: 0,
            redraws_since_log: 0,
            last_draw_calls: 0,
            last_log_time: Instant::now(),
        }
    }

    pub fn record_tick(&mut self, cost_us: f64) {
        self.tick_costs.push(cost_us);
        self.ticks_since_log += 1;
    }

    pub fn record_redraw(&mut self, draw_calls: usize) {
        self.last_draw_calls = draw_calls;
        self.redraws_since_log += 1;
    }

    /// (average, max) tick cost over the history window.
    pub fn cost_summary(&self) -> (f64, f64) {
        if self.tick_costs.is_empty() {
            return (0.0, 0.0);
        }
        let (sum, max) = self
            .tick_costs
            .iter()
            .fold((0.0, 0.0f64), |(sum, max), &c| (sum + c, max.max(c)));
        (sum / self.tick_costs.len() as f64, max)
    }

    /// Log a stats line if the interval has elapsed.
    pub fn maybe_log(&mut self, sim: &Simulation, scheduler: &TickScheduler) {
        let elapsed = self.last_log_time.elapsed().as_secs_f64();
        if elapsed < STATS_LOG_INTERVAL {
            return;
        }
        let (avg_us, max_us) = self.cost_summary();
        let world = sim.world();
        log::info!(
            "TPS: {:.1} | redraws: {} | tick avg: {:.0}us max: {:.0}us | draw calls: {} | fish: {} | shark: {} | eaten: {} | ticks: {} | stalls: {} | grid drops: {}",
            self.ticks_since_log as f64 / elapsed,
            self.redraws_since_log,
            avg_us,
            max_us,
            self.last_draw_calls,
            world.population(Species::Fish),
            if world.shark.is_active() { "hunting" } else { "away" },
            sim.eaten(),
            sim.tick_count(),
            scheduler.stalls(),
            sim.grid_drops(),
        );
        log::debug!(
            "phases: {} (total {:.1}us)",
            sim.timers().summary(),
            sim.timers().total_us()
        );
        log::debug!("population: {}", population_line(sim));
        self.ticks_since_log = 0;
        self.redraws_since_log = 0;
        self.last_log_time = Instant::now();
    }
}

/// `fish 10 | shark 0 | ...` for every species.
fn population_line(sim: &Simulation) -> String {
    Species::ALL
        .iter()
        .map(|&species| format!("{} {}", species.label(), sim.world().population(species)))
        .collect::<Vec<_>>()
        .join(" | ")
}
