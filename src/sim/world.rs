use super::components::*;
use crate::config::SimConfig;
use crate::util::pool::Pool;

/// All simulation state, owned by value.
///
/// Every population is a fixed-capacity pool built once here; later ticks
/// only toggle slots and reinitialize them in place.
pub struct World {
    pub bounds: Bounds,
    pub config: SimConfig,
    pub rng: fastrand::Rng,

    pub fish: Pool<Fish, FISH_COUNT>,
    pub shark: Shark,
    pub seaweed: Pool<Seaweed, SEAWEED_COUNT>,
    pub bubbles: Pool<Bubble, BUBBLE_COUNT>,
    pub plankton: Pool<Plankton, PLANKTON_COUNT>,
    pub octopus: Octopus,
    pub turtle: Turtle,
    pub jellyfish: Pool<Jellyfish, JELLYFISH_COUNT>,
    pub seahorse: Seahorse,
    pub crabs: Pool<Crab, CRAB_COUNT>,
    pub clams: Pool<Clam, CLAM_COUNT>,
}

impl World {
    /// Seed every population with randomized parameters.
    pub fn new(config: SimConfig) -> Self {
        let mut rng = match config.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        let bounds = Bounds::new(config.canvas_width, config.canvas_height);

        let fish = Pool::from_fn(|_| Fish::seed(&mut rng, bounds));
        let shark = Shark::dormant(&mut rng, &config);
        let seaweed = Pool::from_fn(|slot| Seaweed::seed(&mut rng, bounds, slot));
        let bubbles = Pool::from_fn(|_| Bubble::idle());
        let plankton = Pool::from_fn(|_| Plankton::seed(&mut rng, bounds));
        let octopus = Octopus::seed(&mut rng, bounds);
        let turtle = Turtle::seed(&mut rng, bounds);
        let jellyfish = Pool::from_fn(|_| Jellyfish::seed(&mut rng, bounds));
        let seahorse = Seahorse::seed(&mut rng, bounds);
        let crabs = Pool::from_fn(|_| Crab::seed(&mut rng, bounds));
        let clams = Pool::from_fn(|slot| Clam::seed(&mut rng, bounds, slot));

        Self {
            bounds,
            config,
            rng,
            fish,
            shark,
            seaweed,
            bubbles,
            plankton,
            octopus,
            turtle,
            jellyfish,
            seahorse,
            crabs,
            clams,
        }
    }

    /// Number of on-screen actors of `species`.
    pub fn population(&self, species: Species) -> usize {
        match species {
            Species::Fish => self.fish.active_count(),
            Species::Shark => usize::from(self.shark.is_active()),
            Species::Seaweed => self.seaweed.active_count(),
            Species::Bubble => self.bubbles.active_count(),
            Species::Plankton => self.plankton.active_count(),
            Species::Octopus | Species::Turtle | Species::Seahorse => 1,
            Species::Jellyfish => self.jellyfish.active_count(),
            Species::Crab => self.crabs.active_count(),
            Species::Clam => self.clams.active_count(),
        }
    }
}
