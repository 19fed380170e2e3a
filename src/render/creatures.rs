//! Per-species shapes. Offsets come from each entity's phase accumulators,
//! so nothing here needs to remember anything between frames.

use glam::IVec2;

use super::{Color, GraphicsContext, Rect};
use crate::sim::components::*;

const EYE: Color = Color::BLACK;
const BUBBLE: Color = Color(0xAAFFFFFF);
const PLANKTON: Color = Color(0xAAFFAAFF);
const SHARK_BACK: Color = Color(0x555555FF);
const SHARK_BELLY: Color = Color(0xAAAAAAFF);
const TURTLE_SHELL: Color = Color(0x005500FF);
const TURTLE_SKIN: Color = Color(0x55AA55FF);
const SEAHORSE: Color = Color(0xAAAA00FF);
const CRAB: Color = Color(0xFF0000FF);
const CLAM_SHELL: Color = Color(0xAAAAAAFF);
const PEARL: Color = Color::WHITE;

/// Seaweed stalk segments.
const SEAWEED_SEGMENTS: i32 = 4;
/// Octopus tentacles, spread a quarter turn apart in phase.
const OCTOPUS_ARMS: i32 = 4;

pub trait Draw {
    fn draw<G: GraphicsContext + ?Sized>(&self, ctx: &mut G);
}

impl Draw for Fish {
    fn draw<G: GraphicsContext + ?Sized>(&self, ctx: &mut G) {
        let r = self.size.radius();
        let d = self.direction;
        let flap = self.tail.wave(2);

        ctx.set_color(Color(self.color));
        ctx.fill_circle(self.pos, r - 1);
        let root = self.pos - IVec2::new(d * (r - 2), 0);
        let tip = self.pos - IVec2::new(d * (r + 3), 0);
        ctx.fill_path(&[
            root,
            tip + IVec2::new(0, -r / 2 - 1 + flap),
            tip + IVec2::new(0, r / 2 + 1 + flap),
        ]);

        ctx.set_color(EYE);
        ctx.fill_rect(Rect::new(self.pos.x + d * (r / 2), self.pos.y - 1, 1, 1), 0);
    }
}

impl Draw for Shark {
    fn draw<G: GraphicsContext + ?Sized>(&self, ctx: &mut G) {
        if !self.is_active() {
            return;
        }
        let d = self.direction;
        let p = self.pos;
        let at = |dx: i32, dy: i32| p + IVec2::new(d * dx, dy);
        let gape = self.jaw.wave(3).abs();

        ctx.set_color(SHARK_BACK);
        // Body, nose forward.
        ctx.fill_path(&[at(20, 0), at(8, -6), at(-14, -4), at(-20, 0), at(-14, 3), at(8, 5)]);
        // Dorsal fin and tail.
        ctx.fill_path(&[at(2, -5), at(-4, -12), at(-8, -4)]);
        ctx.fill_path(&[at(-18, 0), at(-26, -8), at(-24, 0), at(-26, 7)]);

        ctx.set_color(SHARK_BELLY);
        ctx.fill_path(&[at(16, 1), at(8, 5), at(-12, 3)]);

        ctx.set_color(EYE);
        ctx.fill_rect(Rect::new(p.x + d * 12, p.y - 3, 1, 1), 0);
        // Jaw opens and closes with the jaw phase.
        ctx.draw_line(at(18, 1), at(10, 1 + gape));
    }
}

impl Draw for Seaweed {
    fn draw<G: GraphicsContext + ?Sized>(&self, ctx: &mut G) {
        ctx.set_color(Color(self.color));
        let seg = self.height / SEAWEED_SEGMENTS;
        let mut prev = self.base;
        for k in 1..=SEAWEED_SEGMENTS {
            // Upper segments lag behind and sway further.
            let sway = self.sway.offset((k as u16) * 0x1800).wave(1 + k);
            let next = IVec2::new(self.base.x + sway, self.base.y - seg * k);
            ctx.draw_line(prev, next);
            prev = next;
        }
    }
}

impl Draw for Bubble {
    fn draw<G: GraphicsContext + ?Sized>(&self, ctx: &mut G) {
        ctx.set_color(BUBBLE);
        ctx.draw_circle(self.pos + IVec2::new(self.wobble.wave(1), 0), self.radius);
    }
}

impl Draw for Plankton {
    fn draw<G: GraphicsContext + ?Sized>(&self, ctx: &mut G) {
        ctx.set_color(PLANKTON);
        ctx.fill_rect(Rect::new(self.pos.x, self.pos.y, 1, 1), 0);
    }
}

impl Draw for Octopus {
    fn draw<G: GraphicsContext + ?Sized>(&self, ctx: &mut G) {
        ctx.set_color(Color(self.color));
        ctx.fill_circle(self.pos, 6);
        for arm in 0..OCTOPUS_ARMS {
            let x = self.pos.x - 5 + arm * 3;
            let phase = self.tentacles.offset((arm as u16) * 0x4000);
            let mid = IVec2::new(x + phase.wave(2), self.pos.y + 8);
            let tip = IVec2::new(x + phase.wave_cos(3), self.pos.y + 13);
            ctx.draw_line(IVec2::new(x, self.pos.y + 4), mid);
            ctx.draw_line(mid, tip);
        }
        ctx.set_color(EYE);
        ctx.fill_rect(Rect::new(self.pos.x - 3, self.pos.y - 1, 1, 2), 0);
        ctx.fill_rect(Rect::new(self.pos.x + 2, self.pos.y - 1, 1, 2), 0);
    }
}

impl Draw for Turtle {
    fn draw<G: GraphicsContext + ?Sized>(&self, ctx: &mut G) {
        let d = self.direction;
        let swing = self.flippers.wave(3);

        ctx.set_color(TURTLE_SKIN);
        ctx.fill_circle(self.pos + IVec2::new(d * 8, -1), 2);
        ctx.draw_line(self.pos + IVec2::new(d * 3, 3), self.pos + IVec2::new(d * 6, 6 + swing));
        ctx.draw_line(self.pos + IVec2::new(-d * 3, 3), self.pos + IVec2::new(-d * 6, 6 - swing));

        ctx.set_color(TURTLE_SHELL);
        ctx.fill_rect(Rect::new(self.pos.x - 6, self.pos.y - 4, 12, 7), 3);
    }
}

impl Draw for Jellyfish {
    fn draw<G: GraphicsContext + ?Sized>(&self, ctx: &mut G) {
        let r = self.bell_radius();
        ctx.set_color(Color(self.color));
        ctx.fill_circle(self.pos, r);
        for k in -1..=1 {
            let root = self.pos + IVec2::new(k * (r / 2), 1);
            let ripple = self.tentacles.offset(((k + 1) as u16) * 0x3000).wave(2);
            ctx.draw_line(root, root + IVec2::new(ripple, 6 + r / 2));
        }
        // Flat underside of the bell.
        ctx.set_color(Color::WATER);
        ctx.fill_rect(Rect::new(self.pos.x - r, self.pos.y + 1, 2 * r + 1, r), 0);
    }
}

impl Draw for Seahorse {
    fn draw<G: GraphicsContext + ?Sized>(&self, ctx: &mut G) {
        let p = self.pos + IVec2::new(0, self.bob.wave(3));
        ctx.set_color(SEAHORSE);
        ctx.fill_circle(p, 3);
        ctx.draw_line(p + IVec2::new(2, -1), p + IVec2::new(6, 0));
        ctx.draw_line(p + IVec2::new(0, 3), p + IVec2::new(1, 10));
        ctx.draw_line(p + IVec2::new(1, 10), p + IVec2::new(-2, 14));
        ctx.draw_line(p + IVec2::new(-1, 5), p + IVec2::new(-4 + self.fin.wave(1), 7));
        ctx.set_color(EYE);
        ctx.fill_rect(Rect::new(p.x + 1, p.y - 1, 1, 1), 0);
    }
}

impl Draw for Crab {
    fn draw<G: GraphicsContext + ?Sized>(&self, ctx: &mut G) {
        ctx.set_color(CRAB);
        ctx.fill_circle(self.pos, 4);
        for (k, side) in [(0u16, -1), (1, 1)] {
            let step = self.legs.offset(k * 0x8000).wave(2);
            for leg in 1..=2 {
                let root = self.pos + IVec2::new(side * 3, leg);
                ctx.draw_line(root, root + IVec2::new(side * 3, 2 + step));
            }
            ctx.fill_circle(self.pos + IVec2::new(side * 6, -4), 2);
        }
    }
}

impl Draw for Clam {
    fn draw<G: GraphicsContext + ?Sized>(&self, ctx: &mut G) {
        let p = self.pos;
        let lift = if self.is_open() { 4 } else { 0 };

        ctx.set_color(CLAM_SHELL);
        ctx.fill_path(&[
            p + IVec2::new(-6, 0),
            p + IVec2::new(6, 0),
            p + IVec2::new(4, 3),
            p + IVec2::new(-4, 3),
        ]);
        if self.is_open() {
            ctx.set_color(PEARL);
            ctx.fill_circle(p + IVec2::new(0, -1), 1);
            ctx.set_color(CLAM_SHELL);
        }
        ctx.fill_path(&[
            p + IVec2::new(-6, -lift),
            p + IVec2::new(6, -lift),
            p + IVec2::new(4, -3 - lift),
            p + IVec2::new(-4, -3 - lift),
        ]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::command::{CommandList, DrawCommand};
    use crate::util::trig::Phase;

    #[test]
    fn fish_faces_its_heading() {
        let mut fish = Fish {
            active: true,
            pos: IVec2::new(50, 50),
            direction: 1,
            speed: 1,
            size: FishSize::Large,
            tail: Phase::default(),
            color: 0xFF5500FF,
            cell: 0,
        };
        let mut list = CommandList::new();
        fish.draw(&mut list);
        let tail = list.path(&list.commands()[1]);
        assert!(tail.iter().all(|p| p.x < 50));

        fish.direction = -1;
        list.clear();
        fish.draw(&mut list);
        let tail = list.path(&list.commands()[1]);
        assert!(tail.iter().all(|p| p.x > 50));
    }

    #[test]
    fn open_clam_shows_pearl() {
        let mut clam = Clam {
            pos: IVec2::new(40, 160),
            open_ticks: 0,
        };
        let mut list = CommandList::new();
        clam.draw(&mut list);
        let has_pearl = |list: &CommandList| {
            list.commands().iter().any(|cmd| {
                matches!(cmd, DrawCommand::FillCircle { color, .. } if *color == PEARL)
            })
        };
        assert!(!has_pearl(&list));

        clam.open_ticks = 10;
        list.clear();
        clam.draw(&mut list);
        assert!(has_pearl(&list));
    }
}
