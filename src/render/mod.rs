pub mod command;
pub mod creatures;

use glam::IVec2;

use self::creatures::Draw;
use crate::sim::components::Bounds;
use crate::sim::world::World;
use crate::util::pool::{Pool, Slot};

/// RGBA packed as u32.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub u32);

impl Color {
    pub const BLACK: Color = Color(0x000000FF);
    pub const WHITE: Color = Color(0xFFFFFFFF);
    pub const WATER: Color = Color(0x0055AAFF);
    pub const SAND: Color = Color(0xFFAA55FF);
}

/// Axis-aligned rectangle, origin plus size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub origin: IVec2,
    pub size: IVec2,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self {
            origin: IVec2::new(x, y),
            size: IVec2::new(w, h),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Small,
    Large,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// Drawing primitives provided by the host graphics layer.
///
/// A single current color applies to every fill and stroke that follows.
pub trait GraphicsContext {
    fn set_color(&mut self, color: Color);
    fn fill_circle(&mut self, center: IVec2, radius: i32);
    fn draw_circle(&mut self, center: IVec2, radius: i32);
    fn draw_line(&mut self, from: IVec2, to: IVec2);
    fn fill_rect(&mut self, rect: Rect, corner_radius: i32);
    fn draw_rect(&mut self, rect: Rect, corner_radius: i32);
    fn fill_path(&mut self, points: &[IVec2]);
    fn draw_text(&mut self, text: &str, rect: Rect, font: Font, align: TextAlign);
}

/// Host surface that can be asked to redraw on its next event-loop turn.
pub trait Invalidate {
    fn mark_dirty(&mut self);
}

/// Draw the whole tank, back to front. Reads the world, never mutates it.
pub fn draw_scene<G: GraphicsContext + ?Sized>(ctx: &mut G, world: &World) {
    draw_backdrop(ctx, world.bounds);

    draw_pool(ctx, &world.seaweed);
    draw_pool(ctx, &world.clams);
    draw_pool(ctx, &world.crabs);
    draw_pool(ctx, &world.plankton);
    world.octopus.draw(ctx);
    world.seahorse.draw(ctx);
    draw_pool(ctx, &world.jellyfish);
    world.turtle.draw(ctx);
    draw_pool(ctx, &world.fish);
    world.shark.draw(ctx);
    // Bubbles last so bursts show on top of the fish that caused them.
    draw_pool(ctx, &world.bubbles);
}

fn draw_backdrop<G: GraphicsContext + ?Sized>(ctx: &mut G, bounds: Bounds) {
    ctx.set_color(Color::WATER);
    ctx.fill_rect(Rect::new(0, 0, bounds.width, bounds.height), 0);
    ctx.set_color(Color::SAND);
    ctx.fill_rect(
        Rect::new(0, bounds.sand_top(), bounds.width, bounds.height - bounds.sand_top()),
        0,
    );
}

/// Draw every active slot; inactive slots draw nothing.
fn draw_pool<G, T, const N: usize>(ctx: &mut G, pool: &Pool<T, N>)
where
    G: GraphicsContext + ?Sized,
    T: Draw + Slot,
{
    for item in pool.active() {
        item.draw(ctx);
    }
}
