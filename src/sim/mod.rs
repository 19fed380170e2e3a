pub mod components;
pub mod spawn;
pub mod systems;
pub mod world;

use crate::config::SimConfig;
use crate::debug::timer::SystemTimers;
use crate::spatial::SpatialGrid;
use components::FISH_COUNT;
use systems::collision::Predations;
use world::World;

/// The simulation engine: world state, collision grid and tick bookkeeping.
///
/// Several instances can coexist; nothing is global.
pub struct Simulation {
    world: World,
    grid: SpatialGrid<FISH_COUNT>,
    timers: SystemTimers,
    tick_count: u64,
    /// Predations since construction.
    eaten: u64,
    /// Fish left out of the grid since construction.
    grid_drops: u64,
}

impl Simulation {
    pub fn new(config: SimConfig) -> Self {
        let world = World::new(config);
        let grid = SpatialGrid::new(world.bounds.width, world.bounds.height);
        Self {
            world,
            grid,
            timers: SystemTimers::new(),
            tick_count: 0,
            eaten: 0,
            grid_drops: 0,
        }
    }

    /// Advance the simulation by one tick.
    pub fn tick(&mut self) -> Predations {
        let predations = systems::tick(&mut self.world, &mut self.grid, &mut self.timers);
        self.tick_count += 1;
        self.eaten += predations.total() as u64;
        self.grid_drops += self.grid.dropped() as u64;

        let cost_us = self.timers.last_total_us();
        if cost_us > self.world.config.tick_budget_us as f64 {
            log::debug!(
                "tick {} over budget: {:.0}us > {}us",
                self.tick_count,
                cost_us,
                self.world.config.tick_budget_us
            );
        }
        predations
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn timers(&self) -> &SystemTimers {
        &self.timers
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn eaten(&self) -> u64 {
        self.eaten
    }

    pub fn grid_drops(&self) -> u64 {
        self.grid_drops
    }
}
