use glam::IVec2;

use crate::sim::components::{Bounds, Bubble};
use crate::util::pool::Pool;
use crate::util::random;

/// Release up to `max` bubbles at `at` to mark a predation event.
///
/// Bubbles go into free slots of the shared pool; when it is exhausted the
/// rest of the burst is silently dropped. Returns how many were released.
pub fn burst<const N: usize>(
    bubbles: &mut Pool<Bubble, N>,
    at: IVec2,
    max: usize,
    rng: &mut fastrand::Rng,
) -> usize {
    let mut released = 0;
    while released < max {
        let Some(slot) = bubbles.alloc() else {
            break;
        };
        slot.release(rng, at);
        released += 1;
    }
    released
}

/// Ambient bubbles: each idle slot independently starts rising from the sand
/// with probability `percent`.
pub fn spawn_ambient<const N: usize>(
    bubbles: &mut Pool<Bubble, N>,
    bounds: Bounds,
    percent: u32,
    rng: &mut fastrand::Rng,
) {
    for bubble in bubbles.iter_mut() {
        if bubble.active || !random::chance(rng, percent) {
            continue;
        }
        let at = IVec2::new(
            random::range_inclusive(rng, 4, bounds.width - 4),
            bounds.sand_top(),
        );
        bubble.release(rng, at);
    }
}
