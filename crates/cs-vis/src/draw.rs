//! Draw primitives emitted by goal renderers.

use cs_core::Vec3;

/// Linear RGB color, components in `[0, 1]`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);
    pub const GOAL: Color = Color::new(0.75, 0.75, 0.2);
    pub const HIGHLIGHT: Color = Color::new(1.0, 0.5, 0.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

/// One primitive in world coordinates.
///
/// Outlines lie on the ground plane (`y == 0`).
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// A small marker of `size` meters centered on `at`.
    Marker { at: Vec3, size: f32, color: Color },
    /// A circle outline.
    Circle { center: Vec3, radius: f32, color: Color },
    /// An axis-aligned rectangle outline with corners `min`, `max`.
    Rect { min: Vec3, max: Vec3, color: Color },
    /// A text label anchored at `at`.
    Label { at: Vec3, text: String, color: Color },
}

impl DrawCommand {
    pub fn color(&self) -> Color {
        match self {
            DrawCommand::Marker { color, .. }
            | DrawCommand::Circle { color, .. }
            | DrawCommand::Rect { color, .. }
            | DrawCommand::Label { color, .. } => *color,
        }
    }
}
