use crate::config::SimConfig;
use crate::sim::components::*;
use crate::sim::world::World;
use crate::util::pool::{Pool, Slot};
use crate::util::random;

// Phase steps per tick, in 1/65536 of a turn, scaled by each entity's speed.
const FISH_TAIL_STEP: u16 = 0x0C00;
const SHARK_JAW_STEP: u16 = 0x0300;
const SEAWEED_SWAY_STEP: u16 = 0x0280;
const BUBBLE_WOBBLE_STEP: u16 = 0x1000;
const OCTOPUS_TENTACLE_STEP: u16 = 0x0700;
const TURTLE_FLIPPER_STEP: u16 = 0x0900;
const JELLY_PULSE_STEP: u16 = 0x0600;
const JELLY_TENTACLE_STEP: u16 = 0x0A00;
const SEAHORSE_BOB_STEP: u16 = 0x0400;
const SEAHORSE_FIN_STEP: u16 = 0x2000;
const CRAB_LEG_STEP: u16 = 0x2400;

/// Per-tick chance (percent) a plankton speck takes a step on each axis.
const PLANKTON_STEP_CHANCE: u32 = 30;
const OCTOPUS_STEP_CHANCE: u32 = 10;
const JELLY_JITTER_CHANCE: u32 = 10;
const JELLY_SINK_CHANCE: u32 = 25;
/// Pixels a jellyfish rises on each completed pulse.
const JELLY_PULSE_RISE: i32 = 3;
const SEAHORSE_STEP_CHANCE: u32 = 10;
/// Clam opening chance per closed tick, and how long it stays open.
const CLAM_OPEN_CHANCE: u32 = 1;
const CLAM_OPEN_TICKS: u32 = 30;

/// What a motion rule may touch besides its own record.
pub struct MotionCtx<'a> {
    pub rng: &'a mut fastrand::Rng,
    pub bounds: Bounds,
    pub config: &'a SimConfig,
}

/// A species' per-tick state-advance rule. Rules only mutate their own record.
pub trait Behavior {
    fn advance(&mut self, ctx: &mut MotionCtx);
}

fn scaled(step: u16, speed: i32) -> u16 {
    step.wrapping_mul(speed.unsigned_abs() as u16)
}

/// Advance every active slot of a pool.
fn advance_all<T: Behavior + Slot, const N: usize>(pool: &mut Pool<T, N>, ctx: &mut MotionCtx) {
    for item in pool.iter_mut() {
        if item.is_active() {
            item.advance(ctx);
        }
    }
}

/// Run every species' motion rule for one tick.
pub fn update(world: &mut World) {
    let World {
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
    } = world;
    let mut ctx = MotionCtx {
        rng,
        bounds: *bounds,
        config,
    };

    advance_all(fish, &mut ctx);
    shark.advance(&mut ctx);
    advance_all(seaweed, &mut ctx);
    advance_all(bubbles, &mut ctx);
    advance_all(plankton, &mut ctx);
    octopus.advance(&mut ctx);
    turtle.advance(&mut ctx);
    advance_all(jellyfish, &mut ctx);
    seahorse.advance(&mut ctx);
    advance_all(crabs, &mut ctx);
    advance_all(clams, &mut ctx);
}

impl Behavior for Fish {
    fn advance(&mut self, ctx: &mut MotionCtx) {
        self.pos.x += self.direction * self.speed;
        self.tail.advance(scaled(FISH_TAIL_STEP, self.speed));
        if ctx.bounds.exited(self.pos.x, self.direction) {
            self.reincarnate(ctx.rng, ctx.bounds);
        }
    }
}

impl Behavior for Shark {
    fn advance(&mut self, ctx: &mut MotionCtx) {
        if !self.is_active() {
            return;
        }
        self.pos.x += self.direction * self.speed;
        self.jaw.advance(scaled(SHARK_JAW_STEP, self.speed));
        if ctx.bounds.exited(self.pos.x, self.direction) {
            self.retire(ctx.rng, ctx.config);
            log::debug!("shark leaves the tank after {} appearances", self.appearances);
        }
    }
}

impl Behavior for Seaweed {
    fn advance(&mut self, _ctx: &mut MotionCtx) {
        self.sway.advance(SEAWEED_SWAY_STEP.wrapping_mul(self.speed));
    }
}

impl Behavior for Bubble {
    fn advance(&mut self, _ctx: &mut MotionCtx) {
        self.pos.y -= self.speed;
        self.wobble.advance(BUBBLE_WOBBLE_STEP);
        if self.pos.y <= 0 {
            self.pos.y = 0;
            self.active = false;
        }
    }
}

impl Behavior for Plankton {
    fn advance(&mut self, ctx: &mut MotionCtx) {
        if random::chance(ctx.rng, PLANKTON_STEP_CHANCE) {
            self.pos.x += random::step(ctx.rng);
        }
        if random::chance(ctx.rng, PLANKTON_STEP_CHANCE) {
            self.pos.y += random::step(ctx.rng);
        }
        self.pos = ctx.bounds.plankton_band().clamp(self.pos);
    }
}

impl Behavior for Octopus {
    fn advance(&mut self, ctx: &mut MotionCtx) {
        if random::chance(ctx.rng, OCTOPUS_STEP_CHANCE) {
            self.pos.x += random::step(ctx.rng);
            self.pos.y += random::step(ctx.rng);
        }
        self.pos = ctx.bounds.octopus_band().clamp(self.pos);
        self.tentacles
            .advance(OCTOPUS_TENTACLE_STEP.wrapping_mul(self.speed));
    }
}

impl Behavior for Turtle {
    fn advance(&mut self, ctx: &mut MotionCtx) {
        self.pos.x += self.direction * self.speed;
        self.flippers.advance(scaled(TURTLE_FLIPPER_STEP, self.speed));
        if ctx.bounds.exited(self.pos.x, self.direction) {
            self.reincarnate(ctx.rng, ctx.bounds);
        }
    }
}

impl Behavior for Jellyfish {
    fn advance(&mut self, ctx: &mut MotionCtx) {
        if self.pulse.advance(JELLY_PULSE_STEP.wrapping_mul(self.speed)) {
            self.pos.y -= JELLY_PULSE_RISE;
        } else if random::chance(ctx.rng, JELLY_SINK_CHANCE) {
            self.pos.y += 1;
        }
        if random::chance(ctx.rng, JELLY_JITTER_CHANCE) {
            self.pos.x += random::step(ctx.rng);
        }
        self.tentacles.advance(JELLY_TENTACLE_STEP);
        self.pos = ctx.bounds.jellyfish_band().clamp(self.pos);
    }
}

impl Behavior for Seahorse {
    fn advance(&mut self, ctx: &mut MotionCtx) {
        if random::chance(ctx.rng, SEAHORSE_STEP_CHANCE) {
            self.pos.y += random::step(ctx.rng);
        }
        self.pos = ctx.bounds.seahorse_band().clamp(self.pos);
        self.bob.advance(SEAHORSE_BOB_STEP);
        self.fin.advance(SEAHORSE_FIN_STEP);
    }
}

impl Behavior for Crab {
    fn advance(&mut self, ctx: &mut MotionCtx) {
        let (min_x, max_x) = ctx.bounds.crab_span();
        self.pos.x += self.direction * self.speed;
        if self.pos.x <= min_x {
            self.pos.x = min_x;
            self.direction = 1;
        } else if self.pos.x >= max_x {
            self.pos.x = max_x;
            self.direction = -1;
        }
        self.legs.advance(scaled(CRAB_LEG_STEP, self.speed));
    }
}

impl Behavior for Clam {
    fn advance(&mut self, ctx: &mut MotionCtx) {
        if self.open_ticks > 0 {
            self.open_ticks -= 1;
        } else if random::chance(ctx.rng, CLAM_OPEN_CHANCE) {
            self.open_ticks = CLAM_OPEN_TICKS;
        }
    }
}
