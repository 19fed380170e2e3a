use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use instant::Instant;

use crate::config::SimConfig;
use crate::debug::TickStats;
use crate::platform::battery::SimulatedBattery;
use crate::platform::headless::HeadlessTimers;
use crate::render::command::CommandList;
use crate::render::{self, Invalidate};
use crate::scheduler::{SchedulerState, TickScheduler};
use crate::sim::Simulation;

/// How long a stalled scheduler waits before the host restarts it.
const STALL_RESTART_DELAY: Duration = Duration::from_secs(1);
/// Upper bound on a single sleep so battery updates and stats stay timely.
const MAX_IDLE: Duration = Duration::from_millis(500);

#[derive(Debug, Parser)]
#[command(name = "reeftank", about = "Aquarium simulation for a 144x168 watch face")]
pub struct Cli {
    /// TOML file overriding the default simulation settings.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Seed for a reproducible run.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Stop after this many ticks.
    #[arg(long)]
    pub ticks: Option<u64>,

    /// Starting battery charge in percent.
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub battery: u8,

    /// Start on the charger.
    #[arg(long)]
    pub charging: bool,

    /// Seconds per 1% of battery drain (0 disables drain).
    #[arg(long, default_value_t = 30)]
    pub drain_secs: u64,
}

/// Headless drawing surface: a dirty flag and the last recorded frame.
struct Screen {
    dirty: bool,
    frame: CommandList,
}

impl Screen {
    fn new() -> Self {
        Self {
            dirty: true,
            frame: CommandList::new(),
        }
    }

    /// Re-record the frame if a tick invalidated it. Returns primitive count.
    fn redraw(&mut self, sim: &Simulation) -> Option<usize> {
        if !self.dirty {
            return None;
        }
        self.dirty = false;
        self.frame.clear();
        render::draw_scene(&mut self.frame, sim.world());
        Some(self.frame.len())
    }
}

impl Invalidate for Screen {
    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

fn load_config(cli: &Cli) -> Result<SimConfig> {
    let mut config = match &cli.config {
        Some(path) => SimConfig::from_file(path)?,
        None => SimConfig::default(),
    };
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    config.validate().context("invalid simulation settings")?;
    Ok(config)
}

/// Entry point: build the engine and drive it from a bounded timer table.
pub fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    log::info!(
        "Tank {}x{}, tick {}ms ({}ms low power), seed {:?}",
        config.canvas_width,
        config.canvas_height,
        config.tick_interval_ms,
        config.low_power_interval_ms,
        config.seed
    );

    let mut scheduler = TickScheduler::new(&config);
    let mut sim = Simulation::new(config);
    let mut timers = HeadlessTimers::new();
    let mut battery = SimulatedBattery::new(
        cli.battery,
        cli.charging,
        Duration::from_secs(cli.drain_secs),
    );
    let mut screen = Screen::new();
    let mut stats = TickStats::new();

    scheduler.set_power_state(battery.state());
    scheduler.start(&mut timers);
    let mut stalled_since: Option<Instant> = None;

    loop {
        if cli.ticks.is_some_and(|limit| sim.tick_count() >= limit) {
            break;
        }

        let now = Instant::now();
        let wake = timers
            .next_deadline()
            .unwrap_or(now + MAX_IDLE)
            .min(now + MAX_IDLE);
        if wake > now {
            std::thread::sleep(wake - now);
        }

        let now = Instant::now();
        while let Some(handle) = timers.pop_due(now) {
            if scheduler.on_timer(handle, &mut timers, &mut sim, &mut screen) {
                stats.record_tick(sim.timers().last_total_us());
            }
        }

        if scheduler.state() == SchedulerState::Stalled {
            let since = *stalled_since.get_or_insert(now);
            if now.duration_since(since) >= STALL_RESTART_DELAY {
                log::info!("restarting stalled scheduler");
                scheduler.start(&mut timers);
                stalled_since = None;
            }
        }

        if let Some(power) = battery.poll(now) {
            scheduler.set_power_state(power);
        }

        if let Some(draw_calls) = screen.redraw(&sim) {
            stats.record_redraw(draw_calls);
        }
        stats.maybe_log(&sim, &scheduler);
    }

    scheduler.teardown(&mut timers);
    log::info!(
        "Stopped after {} ticks, {} fish eaten, {} shark visits",
        sim.tick_count(),
        sim.eaten(),
        sim.world().shark.appearances
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("reeftank").chain(args.iter().copied()))
    }

    #[test]
    fn cli_defaults() {
        let cli = cli(&[]);
        assert_eq!(cli.battery, 100);
        assert!(!cli.charging);
        assert!(cli.ticks.is_none());
    }

    #[test]
    fn cli_rejects_impossible_charge() {
        assert!(Cli::try_parse_from(["reeftank", "--battery", "140"]).is_err());
    }

    #[test]
    fn seed_flag_overrides_config() {
        let config = load_config(&cli(&["--seed", "99"])).unwrap();
        assert_eq!(config.seed, Some(99));
    }

    #[test]
    fn screen_redraws_only_when_dirty() {
        let sim = Simulation::new(SimConfig {
            seed: Some(3),
            ..SimConfig::default()
        });
        let mut screen = Screen::new();
        assert!(screen.redraw(&sim).is_some());
        assert!(screen.redraw(&sim).is_none());
        screen.mark_dirty();
        assert!(screen.redraw(&sim).unwrap() > 0);
    }

    #[test]
    fn bounded_run_stops_and_tears_down() {
        let cli = Cli {
            config: None,
            seed: Some(8),
            ticks: Some(3),
            battery: 100,
            charging: false,
            drain_secs: 0,
        };
        run(cli).unwrap();
    }
}
