pub mod behavior;
pub mod collision;
pub mod lifecycle;
pub mod spatial;

use crate::debug::timer::{SystemPhase, SystemTimers};
use crate::sim::components::FISH_COUNT;
use crate::sim::world::World;
use crate::spatial::SpatialGrid;
use collision::Predations;

/// Run all simulation systems for one fixed tick.
pub fn tick(
    world: &mut World,
    grid: &mut SpatialGrid<FISH_COUNT>,
    timers: &mut SystemTimers,
) -> Predations {
    // 1. Respawns, bubble/plankton spawns, shark countdown
    timers.begin();
    lifecycle::update(world);
    timers.end(SystemPhase::Lifecycle);

    // 2. Per-species motion, edge recycling
    timers.begin();
    behavior::update(world);
    timers.end(SystemPhase::Behavior);

    // 3. Rebuild spatial grid from fresh positions
    timers.begin();
    spatial::rebuild(world, grid);
    timers.end(SystemPhase::SpatialRebuild);

    // 4. Predation + bubble bursts
    timers.begin();
    let predations = collision::resolve(world, grid);
    timers.end(SystemPhase::Collision);

    predations
}
