use std::fmt::Debug;
use std::ops::RangeBounds;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// Simulation and cadence parameters.
///
/// Every field has a default, so a config file only needs the values it
/// overrides. Population sizes are compile-time capacities and live in
/// [`crate::sim::components`], not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfig {
    /// Canvas width in pixels.
    pub canvas_width: i32,
    /// Canvas height in pixels.
    pub canvas_height: i32,
    /// Fixed RNG seed. `None` seeds from entropy.
    pub seed: Option<u64>,

    /// Tick interval on normal power (ms).
    pub tick_interval_ms: u32,
    /// Tick interval when the battery is low and not charging (ms).
    pub low_power_interval_ms: u32,
    /// Below this charge percent the low-power interval is used.
    pub low_battery_percent: u8,
    /// Per-tick cost above which a tick is logged as over budget (µs).
    pub tick_budget_us: u64,

    /// Per-tick chance (percent) an eaten fish slot respawns.
    pub fish_respawn_percent: u32,
    /// Per-tick chance (percent) an idle bubble slot starts rising.
    pub bubble_spawn_percent: u32,
    /// Per-tick chance (percent) an idle plankton slot comes back.
    pub plankton_spawn_percent: u32,
    /// Max bubbles released per predation event.
    pub burst_bubbles: usize,

    /// Ticks before the shark's first appearance, `[min, max)`.
    pub shark_first_delay: [u32; 2],
    /// Ticks between shark appearances afterwards, `[min, max)`.
    pub shark_return_delay: [u32; 2],
    /// Shark speed in pixels per tick.
    pub shark_speed: i32,
    /// Max fish the shark can eat in a single tick.
    pub shark_max_eats: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            canvas_width: 144,
            canvas_height: 168,
            seed: None,
            tick_interval_ms: 100,
            low_power_interval_ms: 250,
            low_battery_percent: 20,
            tick_budget_us: 2_000,
            fish_respawn_percent: 2,
            bubble_spawn_percent: 2,
            plankton_spawn_percent: 1,
            burst_bubbles: 3,
            shark_first_delay: [100, 300],
            shark_return_delay: [600, 1_800],
            shark_speed: 4,
            shark_max_eats: 2,
        }
    }
}

impl SimConfig {
    /// Load a [`SimConfig`] from a TOML file and validate it.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or if any
    /// value is out of range.
    pub fn from_file<P: AsRef<Path>>(file: P) -> Result<Self> {
        let file = file.as_ref();
        let text =
            std::fs::read_to_string(file).with_context(|| format!("failed to read {file:?}"))?;
        let config: SimConfig = toml::from_str(&text).context("failed to parse config")?;
        config.validate().context("failed to validate config")?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        check_num(self.canvas_width, 64..=1024).context("invalid canvas width")?;
        check_num(self.canvas_height, 64..=1024).context("invalid canvas height")?;

        check_num(self.tick_interval_ms, 10..=10_000).context("invalid tick interval")?;
        check_num(self.low_power_interval_ms, self.tick_interval_ms..=60_000)
            .context("invalid low-power interval")?;
        check_num(self.low_battery_percent, 0..=100).context("invalid low battery percent")?;
        check_num(self.tick_budget_us, 1..=1_000_000).context("invalid tick budget")?;

        check_num(self.fish_respawn_percent, 0..=100).context("invalid fish respawn chance")?;
        check_num(self.bubble_spawn_percent, 0..=100).context("invalid bubble spawn chance")?;
        check_num(self.plankton_spawn_percent, 0..=100)
            .context("invalid plankton spawn chance")?;
        check_num(self.burst_bubbles, 0..=8).context("invalid burst size")?;

        check_delay(self.shark_first_delay).context("invalid shark first delay")?;
        check_delay(self.shark_return_delay).context("invalid shark return delay")?;
        if self.shark_return_delay[0] < self.shark_first_delay[1] {
            bail!(
                "shark return delay {:?} must not start before the first delay {:?} ends",
                self.shark_return_delay,
                self.shark_first_delay
            );
        }
        check_num(self.shark_speed, 1..=32).context("invalid shark speed")?;
        check_num(self.shark_max_eats, 0..=16).context("invalid shark eat cap")?;

        Ok(())
    }
}

fn check_num<T, R>(num: T, range: R) -> Result<()>
where
    T: PartialOrd + Debug,
    R: RangeBounds<T> + Debug,
{
    if !range.contains(&num) {
        bail!("number must be in the range {range:?}, but is {num:?}");
    }
    Ok(())
}

fn check_delay([min, max]: [u32; 2]) -> Result<()> {
    check_num(min, 1..=100_000)?;
    if max <= min {
        bail!("delay range must be non-empty, but is [{min}, {max})");
    }
    Ok(())
}
