use glam::IVec2;

use crate::util::pool::Slot;
use crate::util::trig::Phase;

pub const FISH_COUNT: usize = 10;
pub const SEAWEED_COUNT: usize = 6;
pub const BUBBLE_COUNT: usize = 16;
pub const PLANKTON_COUNT: usize = 12;
pub const JELLYFISH_COUNT: usize = 2;
pub const CRAB_COUNT: usize = 2;
pub const CLAM_COUNT: usize = 3;

/// Height of the sand strip at the bottom of the canvas.
pub const SAND_HEIGHT: i32 = 20;

/// Every species in the tank. Fixed at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Species {
    Fish,
    Shark,
    Seaweed,
    Bubble,
    Plankton,
    Octopus,
    Turtle,
    Jellyfish,
    Seahorse,
    Crab,
    Clam,
}

impl Species {
    pub const ALL: [Species; 11] = [
        Self::Fish,
        Self::Shark,
        Self::Seaweed,
        Self::Bubble,
        Self::Plankton,
        Self::Octopus,
        Self::Turtle,
        Self::Jellyfish,
        Self::Seahorse,
        Self::Crab,
        Self::Clam,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Fish => "fish",
            Self::Shark => "shark",
            Self::Seaweed => "seaweed",
            Self::Bubble => "bubble",
            Self::Plankton => "plankton",
            Self::Octopus => "octopus",
            Self::Turtle => "turtle",
            Self::Jellyfish => "jellyfish",
            Self::Seahorse => "seahorse",
            Self::Crab => "crab",
            Self::Clam => "clam",
        }
    }
}

/// Canvas rectangle plus the sub-rectangles each species is kept inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub width: i32,
    pub height: i32,
}

/// Inclusive integer rectangle used for clamping walkers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band {
    pub min: IVec2,
    pub max: IVec2,
}

impl Band {
    pub fn clamp(self, pos: IVec2) -> IVec2 {
        pos.clamp(self.min, self.max)
    }

    pub fn contains(self, pos: IVec2) -> bool {
        pos.cmpge(self.min).all() && pos.cmple(self.max).all()
    }

    pub fn random_point(self, rng: &mut fastrand::Rng) -> IVec2 {
        IVec2::new(
            rng.i32(self.min.x..=self.max.x),
            rng.i32(self.min.y..=self.max.y),
        )
    }
}

impl Bounds {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// First row of sand.
    pub fn sand_top(self) -> i32 {
        self.height - SAND_HEIGHT
    }

    pub fn contains(self, pos: IVec2) -> bool {
        (0..=self.width).contains(&pos.x) && (0..=self.height).contains(&pos.y)
    }

    /// Edge x a drifter enters from when heading `direction`.
    pub fn entry_x(self, direction: i32) -> i32 {
        if direction > 0 {
            0
        } else {
            self.width
        }
    }

    /// True once a drifter at `x` heading `direction` has left the canvas.
    pub fn exited(self, x: i32, direction: i32) -> bool {
        if direction > 0 {
            x > self.width
        } else {
            x < 0
        }
    }

    /// Band clipped to the canvas; collapses to a line when the canvas is
    /// too small for the requested extent.
    fn band(self, x0: i32, y0: i32, x1: i32, y1: i32) -> Band {
        let min = IVec2::new(x0.clamp(0, self.width), y0.clamp(0, self.height));
        Band {
            min,
            max: IVec2::new(x1.clamp(min.x, self.width), y1.clamp(min.y, self.height)),
        }
    }

    /// Swimming rows for fish.
    pub fn fish_rows(self) -> Band {
        self.band(0, 12, self.width, self.sand_top() - 16)
    }

    pub fn shark_rows(self) -> Band {
        self.band(0, 20, self.width, self.sand_top() - 30)
    }

    pub fn turtle_rows(self) -> Band {
        self.band(0, 20, self.width, self.sand_top() - 40)
    }

    pub fn plankton_band(self) -> Band {
        self.band(2, 2, self.width - 2, self.sand_top() - 2)
    }

    pub fn octopus_band(self) -> Band {
        self.band(20, self.sand_top() - 50, self.width - 20, self.sand_top() - 14)
    }

    pub fn jellyfish_band(self) -> Band {
        self.band(16, 16, self.width - 16, self.sand_top() - 36)
    }

    pub fn seahorse_band(self) -> Band {
        self.band(12, 30, self.width - 12, self.sand_top() - 30)
    }

    /// Horizontal limits the crabs walk between.
    pub fn crab_span(self) -> (i32, i32) {
        (10, self.width - 10)
    }
}

/// Fish size class. Large fish eat small fish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum FishSize {
    Small = 1,
    Large = 2,
}

impl FishSize {
    /// Collision radius in pixels.
    pub fn radius(self) -> i32 {
        match self {
            Self::Small => 4,
            Self::Large => 7,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Fish {
    pub active: bool,
    pub pos: IVec2,
    /// -1 swims left, +1 swims right.
    pub direction: i32,
    pub speed: i32,
    pub size: FishSize,
    pub tail: Phase,
    /// RGBA packed as u32.
    pub color: u32,
    /// Grid cell recorded at the last rebuild.
    pub cell: u8,
}

/// Shark appearance state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SharkState {
    /// Off screen; emerges when the countdown reaches zero.
    Inactive { timer: u32 },
    Active,
}

#[derive(Debug, Clone, Copy)]
pub struct Shark {
    pub state: SharkState,
    pub pos: IVec2,
    pub direction: i32,
    pub speed: i32,
    pub jaw: Phase,
    /// Number of times the shark has emerged.
    pub appearances: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct Seaweed {
    /// Root of the stalk, on the sand.
    pub base: IVec2,
    pub height: i32,
    pub sway: Phase,
    pub speed: u16,
    pub color: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct Bubble {
    pub active: bool,
    pub pos: IVec2,
    pub radius: i32,
    /// Rise in pixels per tick.
    pub speed: i32,
    pub wobble: Phase,
}

#[derive(Debug, Clone, Copy)]
pub struct Plankton {
    pub active: bool,
    pub pos: IVec2,
}

#[derive(Debug, Clone, Copy)]
pub struct Octopus {
    pub pos: IVec2,
    pub tentacles: Phase,
    pub speed: u16,
    pub color: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct Turtle {
    pub pos: IVec2,
    pub direction: i32,
    pub speed: i32,
    pub flippers: Phase,
}

#[derive(Debug, Clone, Copy)]
pub struct Jellyfish {
    pub pos: IVec2,
    /// Bell contraction. A full cycle pushes the jellyfish up.
    pub pulse: Phase,
    pub tentacles: Phase,
    pub speed: u16,
    /// Resting bell radius.
    pub bell: i32,
    pub color: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct Seahorse {
    pub pos: IVec2,
    pub bob: Phase,
    pub fin: Phase,
}

#[derive(Debug, Clone, Copy)]
pub struct Crab {
    pub pos: IVec2,
    pub direction: i32,
    pub speed: i32,
    pub legs: Phase,
}

#[derive(Debug, Clone, Copy)]
pub struct Clam {
    pub pos: IVec2,
    /// Ticks left open. Zero means closed.
    pub open_ticks: u32,
}

impl Jellyfish {
    /// Bell radius at the current point of the pulse.
    pub fn bell_radius(&self) -> i32 {
        self.bell + self.pulse.wave(2)
    }
}

impl Clam {
    pub fn is_open(&self) -> bool {
        self.open_ticks > 0
    }
}

impl Shark {
    pub fn is_active(&self) -> bool {
        self.state == SharkState::Active
    }
}

impl Slot for Fish {
    fn is_active(&self) -> bool {
        self.active
    }
}

impl Slot for Bubble {
    fn is_active(&self) -> bool {
        self.active
    }
}

impl Slot for Plankton {
    fn is_active(&self) -> bool {
        self.active
    }
}

// Decorations never leave the tank.
impl Slot for Seaweed {
    fn is_active(&self) -> bool {
        true
    }
}

impl Slot for Jellyfish {
    fn is_active(&self) -> bool {
        true
    }
}

impl Slot for Crab {
    fn is_active(&self) -> bool {
        true
    }
}

impl Slot for Clam {
    fn is_active(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_and_exit_edges() {
        let b = Bounds::new(144, 168);
        assert_eq!(b.entry_x(1), 0);
        assert_eq!(b.entry_x(-1), 144);
        assert!(b.exited(147, 1));
        assert!(!b.exited(144, 1));
        assert!(b.exited(-1, -1));
        assert!(!b.exited(0, -1));
    }

    #[test]
    fn bands_fit_inside_canvas() {
        let b = Bounds::new(144, 168);
        for band in [
            b.fish_rows(),
            b.shark_rows(),
            b.turtle_rows(),
            b.plankton_band(),
            b.octopus_band(),
            b.jellyfish_band(),
            b.seahorse_band(),
        ] {
            assert!(b.contains(band.min));
            assert!(b.contains(band.max));
            assert!(band.min.cmple(band.max).all());
        }
    }

    #[test]
    fn band_clamp() {
        let band = Band {
            min: IVec2::new(2, 2),
            max: IVec2::new(10, 10),
        };
        assert_eq!(band.clamp(IVec2::new(-5, 20)), IVec2::new(2, 10));
        assert!(band.contains(IVec2::new(10, 2)));
        assert!(!band.contains(IVec2::new(11, 2)));
    }

    #[test]
    fn bands_stay_inside_small_canvas() {
        let bounds = Bounds::new(64, 64);
        for band in [
            bounds.fish_rows(),
            bounds.shark_rows(),
            bounds.turtle_rows(),
            bounds.plankton_band(),
            bounds.octopus_band(),
            bounds.jellyfish_band(),
            bounds.seahorse_band(),
        ] {
            assert!(bounds.contains(band.min), "band min {} off canvas", band.min);
            assert!(bounds.contains(band.max), "band max {} off canvas", band.max);
            assert!(band.min.cmple(band.max).all());
        }
    }
}
