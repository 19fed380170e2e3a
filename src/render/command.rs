use glam::IVec2;

use super::{Color, Font, GraphicsContext, Rect, TextAlign};

/// One recorded primitive, with the color that was current when issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawCommand {
    FillCircle {
        color: Color,
        center: IVec2,
        radius: i32,
    },
    DrawCircle {
        color: Color,
        center: IVec2,
        radius: i32,
    },
    Line {
        color: Color,
        from: IVec2,
        to: IVec2,
    },
    FillRect {
        color: Color,
        rect: Rect,
        corner_radius: i32,
    },
    DrawRect {
        color: Color,
        rect: Rect,
        corner_radius: i32,
    },
    /// Points live in the list's shared path buffer.
    FillPath {
        color: Color,
        start: usize,
        len: usize,
    },
    /// Bytes live in the list's shared text buffer.
    Text {
        color: Color,
        rect: Rect,
        font: Font,
        align: TextAlign,
        start: usize,
        len: usize,
    },
}

/// A [`GraphicsContext`] that records primitives instead of rasterizing them.
///
/// Buffers are kept across frames; `clear()` keeps the allocation.
pub struct CommandList {
    color: Color,
    commands: Vec<DrawCommand>,
    path_points: Vec<IVec2>,
    text: String,
}

impl CommandList {
    pub fn new() -> Self {
        Self {
            color: Color::BLACK,
            commands: Vec::with_capacity(256),
            path_points: Vec::with_capacity(256),
            text: String::new(),
        }
    }

    pub fn clear(&mut self) {
        self.color = Color::BLACK;
        self.commands.clear();
        self.path_points.clear();
        self.text.clear();
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Points of a recorded `FillPath`, empty for any other command.
    pub fn path(&self, cmd: &DrawCommand) -> &[IVec2] {
        match *cmd {
            DrawCommand::FillPath { start, len, .. } => &self.path_points[start..start + len],
            _ => &[],
        }
    }

    /// String of a recorded `Text`, empty for any other command.
    pub fn text(&self, cmd: &DrawCommand) -> &str {
        match *cmd {
            DrawCommand::Text { start, len, .. } => &self.text[start..start + len],
            _ => "",
        }
    }
}

impl GraphicsContext for CommandList {
    fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    fn fill_circle(&mut self, center: IVec2, radius: i32) {
        self.commands.push(DrawCommand::FillCircle {
            color: self.color,
            center,
            radius,
        });
    }

    fn draw_circle(&mut self, center: IVec2, radius: i32) {
        self.commands.push(DrawCommand::DrawCircle {
            color: self.color,
            center,
            radius,
        });
    }

    fn draw_line(&mut self, from: IVec2, to: IVec2) {
        self.commands.push(DrawCommand::Line {
            color: self.color,
            from,
            to,
        });
    }

    fn fill_rect(&mut self, rect: Rect, corner_radius: i32) {
        self.commands.push(DrawCommand::FillRect {
            color: self.color,
            rect,
            corner_radius,
        });
    }

    fn draw_rect(&mut self, rect: Rect, corner_radius: i32) {
        self.commands.push(DrawCommand::DrawRect {
            color: self.color,
            rect,
            corner_radius,
        });
    }

    fn fill_path(&mut self, points: &[IVec2]) {
        let start = self.path_points.len();
        self.path_points.extend_from_slice(points);
        self.commands.push(DrawCommand::FillPath {
            color: self.color,
            start,
            len: points.len(),
        });
    }

    fn draw_text(&mut self, text: &str, rect: Rect, font: Font, align: TextAlign) {
        let start = self.text.len();
        self.text.push_str(text);
        self.commands.push(DrawCommand::Text {
            color: self.color,
            rect,
            font,
            align,
            start,
            len: text.len(),
        });
    }
}
