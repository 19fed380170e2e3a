use crate::particles;
use crate::sim::components::SharkState;
use crate::sim::world::World;
use crate::util::random;

/// Population upkeep for one tick: respawn eaten fish, start new bubbles and
/// plankton, and run the shark's dormancy countdown.
///
/// Edge recycling happens in the behavior rules, right after an entity
/// moves, so a drifter never ends a tick outside the canvas.
pub fn update(world: &mut World) {
    let World {
        bounds,
        config,
        rng,
        fish,
        shark,
        bubbles,
        plankton,
        ..
    } = world;

    for f in fish.iter_mut() {
        if !f.active && random::chance(rng, config.fish_respawn_percent) {
            f.reincarnate(rng, *bounds);
        }
    }

    particles::spawn_ambient(bubbles, *bounds, config.bubble_spawn_percent, rng);

    for p in plankton.iter_mut() {
        if !p.active && random::chance(rng, config.plankton_spawn_percent) {
            p.reincarnate(rng, *bounds);
        }
    }

    if let SharkState::Inactive { timer } = &mut shark.state {
        *timer = timer.saturating_sub(1);
        if *timer == 0 {
            shark.emerge(rng, *bounds, config);
            log::debug!(
                "shark emerges at {} heading {} (appearance #{})",
                shark.pos,
                shark.direction,
                shark.appearances
            );
        }
    }
}
