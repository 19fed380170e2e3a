//! Integer trig on a 16-bit angle circle, the way watch firmware does it.

/// One full turn.
pub const TRIG_MAX_ANGLE: i32 = 0x10000;
/// Fixed-point 1.0 returned by the lookups.
pub const TRIG_MAX_RATIO: i32 = 0xffff;

/// Sine of `angle` (in `TRIG_MAX_ANGLE` units) scaled to `[-TRIG_MAX_RATIO, TRIG_MAX_RATIO]`.
pub fn sin_lookup(angle: i32) -> i32 {
    let turns = angle.rem_euclid(TRIG_MAX_ANGLE) as f32 / TRIG_MAX_ANGLE as f32;
    let s = (turns * std::f32::consts::TAU).sin();
    (s * TRIG_MAX_RATIO as f32).round() as i32
}

pub fn cos_lookup(angle: i32) -> i32 {
    sin_lookup(angle + TRIG_MAX_ANGLE / 4)
}

/// A phase accumulator. `u16` wrap-around is exactly one full cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Phase(pub u16);

impl Phase {
    pub fn random(rng: &mut fastrand::Rng) -> Self {
        Self(rng.u16(..))
    }

    pub fn advance(&mut self, step: u16) -> bool {
        let (next, wrapped) = self.0.overflowing_add(step);
        self.0 = next;
        wrapped
    }

    pub fn angle(self) -> i32 {
        self.0 as i32
    }

    /// Bounded waveform offset in `[-amplitude, amplitude]`.
    pub fn wave(self, amplitude: i32) -> i32 {
        sin_lookup(self.angle()) * amplitude / TRIG_MAX_RATIO
    }

    /// Same as [`Phase::wave`], shifted a quarter turn.
    pub fn wave_cos(self, amplitude: i32) -> i32 {
        cos_lookup(self.angle()) * amplitude / TRIG_MAX_RATIO
    }

    /// This phase offset by `delta` without mutating it.
    pub fn offset(self, delta: u16) -> Self {
        Self(self.0.wrapping_add(delta))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quarter_turns() {
        assert_eq!(sin_lookup(0), 0);
        assert_eq!(sin_lookup(TRIG_MAX_ANGLE / 4), TRIG_MAX_RATIO);
        assert_eq!(sin_lookup(TRIG_MAX_ANGLE / 2), 0);
        assert_eq!(sin_lookup(3 * TRIG_MAX_ANGLE / 4), -TRIG_MAX_RATIO);
        assert_eq!(cos_lookup(0), TRIG_MAX_RATIO);
    }

    #[test]
    fn angles_wrap() {
        assert_eq!(sin_lookup(TRIG_MAX_ANGLE + 100), sin_lookup(100));
        assert_eq!(sin_lookup(-TRIG_MAX_ANGLE / 4), -TRIG_MAX_RATIO);
    }

    #[test]
    fn phase_wraps_and_reports_cycle() {
        let mut p = Phase(0xff00);
        assert!(!p.advance(0x80));
        assert!(p.advance(0x100));
        assert_eq!(p.0, 0x0080);
    }

    #[test]
    fn wave_is_bounded() {
        for raw in (0..=u16::MAX).step_by(97) {
            let w = Phase(raw).wave(5);
            assert!((-5..=5).contains(&w));
        }
    }
}
