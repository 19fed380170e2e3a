//! Initial seeding and in-place reincarnation for every species.

use glam::IVec2;

use super::components::*;
use crate::config::SimConfig;
use crate::util::random;
use crate::util::trig::Phase;

/// Small fish palette (RGBA).
const FISH_COLORS: &[u32] = &[
    0xFF5500FF, // orange
    0xFFAA00FF, // chrome yellow
    0xFFFF55FF, // icterine
    0xFF55AAFF, // brilliant rose
    0x55FFFFFF, // electric blue
];
/// Large fish palette (RGBA).
const BIG_FISH_COLORS: &[u32] = &[
    0xAA5500FF, // windsor tan
    0x5555AAFF, // liberty
    0xAA0055FF, // jazzberry
];
const SEAWEED_COLORS: &[u32] = &[0x00AA55FF, 0x55AA00FF, 0x005500FF];
const OCTOPUS_COLORS: &[u32] = &[0xAA00AAFF, 0xFF5555FF];
const JELLY_COLORS: &[u32] = &[0xFFAAFFFF, 0xAAAAFFFF, 0xFFFFFFFF];

/// One in this many fish is large.
const LARGE_FISH_ODDS: u32 = 4;

fn pick(rng: &mut fastrand::Rng, palette: &[u32]) -> u32 {
    palette[rng.usize(0..palette.len())]
}

impl Fish {
    /// A fish placed anywhere in its rows, used when the tank is first filled.
    pub fn seed(rng: &mut fastrand::Rng, bounds: Bounds) -> Self {
        let mut fish = Self {
            active: true,
            pos: IVec2::ZERO,
            direction: 1,
            speed: 1,
            size: FishSize::Small,
            tail: Phase::default(),
            color: 0,
            cell: 0,
        };
        fish.reincarnate(rng, bounds);
        fish.pos.x = random::range_inclusive(rng, 0, bounds.width);
        fish
    }

    /// Reinitialize in place with fresh parameters, entering from the edge
    /// matching the newly rolled direction.
    pub fn reincarnate(&mut self, rng: &mut fastrand::Rng, bounds: Bounds) {
        let rows = bounds.fish_rows();
        self.size = if rng.u32(0..LARGE_FISH_ODDS) == 0 {
            FishSize::Large
        } else {
            FishSize::Small
        };
        self.direction = random::direction(rng);
        self.speed = match self.size {
            FishSize::Small => random::range_inclusive(rng, 1, 3),
            FishSize::Large => random::range_inclusive(rng, 1, 2),
        };
        self.pos = IVec2::new(
            bounds.entry_x(self.direction),
            random::range_inclusive(rng, rows.min.y, rows.max.y),
        );
        self.tail = Phase::random(rng);
        self.color = match self.size {
            FishSize::Small => pick(rng, FISH_COLORS),
            FishSize::Large => pick(rng, BIG_FISH_COLORS),
        };
        self.active = true;
    }
}

impl Shark {
    /// A shark waiting off screen for its first appearance.
    pub fn dormant(rng: &mut fastrand::Rng, config: &SimConfig) -> Self {
        let [lo, hi] = config.shark_first_delay;
        Self {
            state: SharkState::Inactive {
                timer: random::ticks(rng, lo, hi),
            },
            pos: IVec2::new(-1, 0),
            direction: 1,
            speed: config.shark_speed,
            jaw: Phase::default(),
            appearances: 0,
        }
    }

    /// Inactive -> Active: pick a start edge and a row.
    pub fn emerge(&mut self, rng: &mut fastrand::Rng, bounds: Bounds, config: &SimConfig) {
        let rows = bounds.shark_rows();
        self.direction = random::direction(rng);
        self.speed = config.shark_speed;
        self.pos = IVec2::new(
            bounds.entry_x(self.direction),
            random::range_inclusive(rng, rows.min.y, rows.max.y),
        );
        self.jaw = Phase::default();
        self.appearances += 1;
        self.state = SharkState::Active;
    }

    /// Active -> Inactive with a fresh, longer countdown.
    pub fn retire(&mut self, rng: &mut fastrand::Rng, config: &SimConfig) {
        let [lo, hi] = config.shark_return_delay;
        self.state = SharkState::Inactive {
            timer: random::ticks(rng, lo, hi),
        };
    }
}

impl Seaweed {
    pub fn seed(rng: &mut fastrand::Rng, bounds: Bounds, slot: usize) -> Self {
        // Spread the stalks across the sand, one per column.
        let column = bounds.width / SEAWEED_COUNT as i32;
        let x = column * slot as i32 + random::range(rng, 2, column.max(3) - 1);
        Self {
            base: IVec2::new(x, bounds.sand_top() + random::range(rng, 2, 8)),
            height: random::range_inclusive(rng, 18, 40),
            sway: Phase::random(rng),
            speed: rng.u16(1..=3),
            color: pick(rng, SEAWEED_COLORS),
        }
    }
}

impl Bubble {
    pub fn idle() -> Self {
        Self {
            active: false,
            pos: IVec2::ZERO,
            radius: 1,
            speed: 1,
            wobble: Phase::default(),
        }
    }

    /// A bubble rising from `at`.
    pub fn release(&mut self, rng: &mut fastrand::Rng, at: IVec2) {
        self.active = true;
        self.pos = at;
        self.radius = random::range_inclusive(rng, 1, 3);
        self.speed = random::range_inclusive(rng, 1, 2);
        self.wobble = Phase::random(rng);
    }
}

impl Plankton {
    pub fn seed(rng: &mut fastrand::Rng, bounds: Bounds) -> Self {
        Self {
            active: true,
            pos: bounds.plankton_band().random_point(rng),
        }
    }

    pub fn reincarnate(&mut self, rng: &mut fastrand::Rng, bounds: Bounds) {
        *self = Self::seed(rng, bounds);
    }
}

impl Octopus {
    pub fn seed(rng: &mut fastrand::Rng, bounds: Bounds) -> Self {
        Self {
            pos: bounds.octopus_band().random_point(rng),
            tentacles: Phase::random(rng),
            speed: rng.u16(1..=2),
            color: pick(rng, OCTOPUS_COLORS),
        }
    }
}

impl Turtle {
    pub fn seed(rng: &mut fastrand::Rng, bounds: Bounds) -> Self {
        let mut turtle = Self {
            pos: IVec2::ZERO,
            direction: 1,
            speed: 1,
            flippers: Phase::default(),
        };
        turtle.reincarnate(rng, bounds);
        turtle.pos.x = random::range_inclusive(rng, 0, bounds.width);
        turtle
    }

    pub fn reincarnate(&mut self, rng: &mut fastrand::Rng, bounds: Bounds) {
        let rows = bounds.turtle_rows();
        self.direction = random::direction(rng);
        self.speed = 1;
        self.pos = IVec2::new(
            bounds.entry_x(self.direction),
            random::range_inclusive(rng, rows.min.y, rows.max.y),
        );
        self.flippers = Phase::random(rng);
    }
}

impl Jellyfish {
    pub fn seed(rng: &mut fastrand::Rng, bounds: Bounds) -> Self {
        Self {
            pos: bounds.jellyfish_band().random_point(rng),
            pulse: Phase::random(rng),
            tentacles: Phase::random(rng),
            speed: rng.u16(1..=2),
            bell: random::range_inclusive(rng, 5, 7),
            color: pick(rng, JELLY_COLORS),
        }
    }
}

impl Seahorse {
    pub fn seed(rng: &mut fastrand::Rng, bounds: Bounds) -> Self {
        Self {
            pos: bounds.seahorse_band().random_point(rng),
            bob: Phase::random(rng),
            fin: Phase::random(rng),
        }
    }
}

impl Crab {
    pub fn seed(rng: &mut fastrand::Rng, bounds: Bounds) -> Self {
        let (min_x, max_x) = bounds.crab_span();
        Self {
            pos: IVec2::new(
                random::range_inclusive(rng, min_x, max_x),
                bounds.height - random::range_inclusive(rng, 8, 12),
            ),
            direction: random::direction(rng),
            speed: 1,
            legs: Phase::random(rng),
        }
    }
}

impl Clam {
    pub fn seed(rng: &mut fastrand::Rng, bounds: Bounds, slot: usize) -> Self {
        let column = bounds.width / CLAM_COUNT as i32;
        Self {
            pos: IVec2::new(
                column * slot as i32 + column / 2 + random::range_inclusive(rng, -8, 8),
                bounds.height - random::range_inclusive(rng, 5, 8),
            ),
            open_ticks: 0,
        }
    }
}
