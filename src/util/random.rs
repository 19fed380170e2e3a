//! Bounded random helpers shared by every spawn and behavior rule.

/// Uniform integer in `[lo, hi)`. A degenerate range yields `lo`.
pub fn range(rng: &mut fastrand::Rng, lo: i32, hi: i32) -> i32 {
    if hi <= lo {
        return lo;
    }
    rng.i32(lo..hi)
}

/// Uniform integer in `[lo, hi]`. A degenerate range yields `lo`.
pub fn range_inclusive(rng: &mut fastrand::Rng, lo: i32, hi: i32) -> i32 {
    if hi <= lo {
        return lo;
    }
    rng.i32(lo..=hi)
}

/// Uniform tick count in `[lo, hi)`.
pub fn ticks(rng: &mut fastrand::Rng, lo: u32, hi: u32) -> u32 {
    if hi <= lo {
        return lo;
    }
    rng.u32(lo..hi)
}

/// True with probability `percent / 100`.
pub fn chance(rng: &mut fastrand::Rng, percent: u32) -> bool {
    rng.u32(0..100) < percent
}

/// Random horizontal heading, -1 or +1.
pub fn direction(rng: &mut fastrand::Rng) -> i32 {
    if rng.bool() {
        1
    } else {
        -1
    }
}

/// Random unit step for walkers. Same distribution as [`direction`].
pub fn step(rng: &mut fastrand::Rng) -> i32 {
    direction(rng)
}
