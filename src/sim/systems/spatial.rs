use crate::sim::components::FISH_COUNT;
use crate::sim::world::World;
use crate::spatial::SpatialGrid;

/// Rebuild the grid from current fish positions and record each fish's cell.
/// Inactive fish are left out.
pub fn rebuild(world: &mut World, grid: &mut SpatialGrid<FISH_COUNT>) {
    grid.clear();
    for (idx, fish) in world.fish.iter_mut().enumerate() {
        if !fish.active {
            continue;
        }
        fish.cell = grid.insert(fish.pos, idx) as u8;
    }
}
