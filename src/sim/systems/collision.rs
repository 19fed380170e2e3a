use glam::IVec2;

use crate::particles;
use crate::sim::components::{FishSize, FISH_COUNT};
use crate::sim::world::World;
use crate::spatial::SpatialGrid;

/// Shark bite box half-extents.
const SHARK_REACH_X: i32 = 20;
const SHARK_REACH_Y: i32 = 12;

/// What happened during one collision pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Predations {
    /// Small fish eaten by large fish.
    pub by_fish: usize,
    /// Fish eaten by the shark.
    pub by_shark: usize,
    /// Bubbles released by all bursts.
    pub bubbles: usize,
}

impl Predations {
    pub fn total(&self) -> usize {
        self.by_fish + self.by_shark
    }
}

/// Circle overlap by squared distance. Exact in integers, no square root.
pub fn circles_overlap(p1: IVec2, r1: i32, p2: IVec2, r2: i32) -> bool {
    let reach = r1 + r2;
    (p1 - p2).length_squared() <= reach * reach
}

/// Shark bite test: axis-aligned proximity box around the shark.
pub fn shark_reaches(shark: IVec2, prey: IVec2) -> bool {
    let d = (shark - prey).abs();
    d.x < SHARK_REACH_X && d.y < SHARK_REACH_Y
}

/// Apply predation for one tick.
///
/// Large fish check small fish in their own and adjacent grid cells; then the
/// shark, if active, checks every fish. Iteration is in slot order and a
/// prey is deactivated on its first match, so nothing is eaten twice.
pub fn resolve(world: &mut World, grid: &SpatialGrid<FISH_COUNT>) -> Predations {
    let World {
        config,
        rng,
        fish,
        shark,
        bubbles,
        ..
    } = world;
    let mut report = Predations::default();

    for predator_idx in 0..FISH_COUNT {
        let predator = fish[predator_idx];
        if !predator.active || predator.size != FishSize::Large {
            continue;
        }
        grid.query_neighbors(predator.cell as usize, |prey_idx| {
            let prey = &mut fish[prey_idx];
            if !prey.active || prey.size != FishSize::Small {
                return;
            }
            if circles_overlap(predator.pos, predator.size.radius(), prey.pos, prey.size.radius()) {
                prey.active = false;
                report.by_fish += 1;
                report.bubbles += particles::burst(bubbles, prey.pos, config.burst_bubbles, rng);
                log::trace!("fish {predator_idx} eats fish {prey_idx} at {}", prey.pos);
            }
        });
    }

    if shark.is_active() {
        for (prey_idx, prey) in fish.iter_mut().enumerate() {
            if report.by_shark >= config.shark_max_eats {
                break;
            }
            if !prey.active || !shark_reaches(shark.pos, prey.pos) {
                continue;
            }
            prey.active = false;
            report.by_shark += 1;
            report.bubbles += particles::burst(bubbles, prey.pos, config.burst_bubbles, rng);
            log::trace!("shark eats fish {prey_idx} at {}", prey.pos);
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::sim::components::SharkState;
    use crate::sim::systems::spatial;

    /// A world with every fish parked out of reach in the top-left corner.
    fn quiet_world() -> World {
        let mut world = World::new(SimConfig {
            seed: Some(8),
            ..SimConfig::default()
        });
        for fish in world.fish.iter_mut() {
            fish.active = false;
            fish.pos = IVec2::ZERO;
        }
        for bubble in world.bubbles.iter_mut() {
            bubble.active = false;
        }
        world.shark.state = SharkState::Inactive { timer: 1_000 };
        world
    }

    fn place(world: &mut World, idx: usize, pos: IVec2, size: FishSize) {
        let fish = &mut world.fish[idx];
        fish.active = true;
        fish.pos = pos;
        fish.size = size;
    }

    fn run(world: &mut World) -> Predations {
        let mut grid = SpatialGrid::new(world.bounds.width, world.bounds.height);
        spatial::rebuild(world, &mut grid);
        resolve(world, &grid)
    }

    #[test]
    fn overlap_is_symmetric() {
        let mut rng = fastrand::Rng::with_seed(99);
        for _ in 0..2_000 {
            let a = IVec2::new(rng.i32(-50..200), rng.i32(-50..200));
            let b = IVec2::new(rng.i32(-50..200), rng.i32(-50..200));
            let (ra, rb) = (rng.i32(0..20), rng.i32(0..20));
            assert_eq!(circles_overlap(a, ra, b, rb), circles_overlap(b, rb, a, ra));
        }
    }

    #[test]
    fn overlap_boundary_is_inclusive() {
        assert!(circles_overlap(IVec2::new(0, 0), 7, IVec2::new(11, 0), 4));
        assert!(!circles_overlap(IVec2::new(0, 0), 7, IVec2::new(12, 0), 4));
    }

    #[test]
    fn large_fish_eats_small_fish() {
        let mut world = quiet_world();
        place(&mut world, 0, IVec2::new(50, 50), FishSize::Large);
        place(&mut world, 1, IVec2::new(52, 51), FishSize::Small);

        let report = run(&mut world);

        assert!(!world.fish[1].active);
        assert!(world.fish[0].active);
        assert_eq!(report.by_fish, 1);
        assert!(report.bubbles >= 1 && report.bubbles <= 3);
        assert!(world
            .bubbles
            .active()
            .any(|b| b.pos == IVec2::new(52, 51)));
    }

    #[test]
    fn prey_in_adjacent_cell_is_caught() {
        let mut world = quiet_world();
        // 48 is the first column of the middle cell.
        place(&mut world, 0, IVec2::new(46, 50), FishSize::Large);
        place(&mut world, 1, IVec2::new(50, 50), FishSize::Small);

        let report = run(&mut world);
        assert_ne!(world.fish[0].cell, world.fish[1].cell);
        assert_eq!(report.by_fish, 1);
    }

    #[test]
    fn small_fish_never_eat_and_large_fish_are_never_prey() {
        let mut world = quiet_world();
        place(&mut world, 0, IVec2::new(50, 50), FishSize::Large);
        place(&mut world, 1, IVec2::new(51, 50), FishSize::Large);
        place(&mut world, 2, IVec2::new(90, 90), FishSize::Small);
        place(&mut world, 3, IVec2::new(91, 90), FishSize::Small);

        let report = run(&mut world);
        assert_eq!(report.total(), 0);
        assert_eq!(world.fish.active_count(), 4);
    }

    #[test]
    fn prey_is_eaten_once_by_competing_predators() {
        let mut world = quiet_world();
        place(&mut world, 0, IVec2::new(60, 60), FishSize::Large);
        place(&mut world, 1, IVec2::new(64, 60), FishSize::Large);
        place(&mut world, 2, IVec2::new(62, 60), FishSize::Small);

        let report = run(&mut world);
        assert_eq!(report.by_fish, 1);
        assert!(report.bubbles <= world.config.burst_bubbles);
        assert!(!world.fish[2].active);
    }

    #[test]
    fn far_apart_fish_survive() {
        let mut world = quiet_world();
        place(&mut world, 0, IVec2::new(10, 10), FishSize::Large);
        place(&mut world, 1, IVec2::new(30, 10), FishSize::Small);

        assert_eq!(run(&mut world).total(), 0);
        assert!(world.fish[1].active);
    }

    #[test]
    fn shark_eats_within_box_and_respects_cap() {
        let mut world = quiet_world();
        world.shark.state = SharkState::Active;
        world.shark.pos = IVec2::new(70, 80);
        place(&mut world, 0, IVec2::new(80, 85), FishSize::Small);
        place(&mut world, 1, IVec2::new(60, 75), FishSize::Large);
        place(&mut world, 2, IVec2::new(75, 80), FishSize::Small);
        place(&mut world, 3, IVec2::new(90, 80), FishSize::Small);

        let report = run(&mut world);
        assert_eq!(report.by_shark, world.config.shark_max_eats);
        assert!(!world.fish[0].active);
        assert!(!world.fish[1].active);
        // Cap reached before slot 2 was considered.
        assert!(world.fish[2].active);
        // Outside the box: |dx| = 20.
        assert!(world.fish[3].active);
    }

    #[test]
    fn inactive_shark_eats_nothing() {
        let mut world = quiet_world();
        world.shark.pos = IVec2::new(70, 80);
        place(&mut world, 0, IVec2::new(70, 80), FishSize::Small);

        assert_eq!(run(&mut world).by_shark, 0);
        assert!(world.fish[0].active);
    }

    #[test]
    fn bursts_stop_when_bubble_pool_is_full() {
        let mut world = quiet_world();
        for bubble in world.bubbles.iter_mut() {
            bubble.active = true;
            bubble.pos = IVec2::new(5, 5);
        }
        place(&mut world, 0, IVec2::new(50, 50), FishSize::Large);
        place(&mut world, 1, IVec2::new(52, 51), FishSize::Small);

        let report = run(&mut world);
        assert_eq!(report.by_fish, 1);
        assert_eq!(report.bubbles, 0);
    }
}
