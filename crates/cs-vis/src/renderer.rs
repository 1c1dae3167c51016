//! The `GoalRenderer` trait and the renderers shipped with the core.

use cs_fsm::{Goal, GoalShape};

use crate::{Color, DrawCommand};

/// Turns a goal into draw primitives.
///
/// Renderers are bound to goal kinds through [`GoalRendererDb`][crate::GoalRendererDb].
/// A renderer may be handed a goal whose shape it does not specialize in
/// (for instance a plugin goal kind bound to a built-in renderer); it should
/// still draw something sensible for it.
pub trait GoalRenderer: Send {
    /// Short identifier, used in logs and tests.
    fn name(&self) -> &str;

    fn draw(&self, goal: &Goal, highlight: bool) -> Vec<DrawCommand>;
}

fn color_for(highlight: bool) -> Color {
    if highlight { Color::HIGHLIGHT } else { Color::GOAL }
}

/// Marker at the goal's centroid.  The registry default.
pub struct MarkerRenderer;

impl GoalRenderer for MarkerRenderer {
    fn name(&self) -> &str {
        "marker"
    }

    fn draw(&self, goal: &Goal, highlight: bool) -> Vec<DrawCommand> {
        vec![DrawCommand::Marker { at: goal.shape.centroid().to_xz(), size: 0.25, color: color_for(highlight) }]
    }
}

pub struct PointRenderer;

impl GoalRenderer for PointRenderer {
    fn name(&self) -> &str {
        "point"
    }

    fn draw(&self, goal: &Goal, highlight: bool) -> Vec<DrawCommand> {
        let color = color_for(highlight);
        vec![
            DrawCommand::Marker { at: goal.shape.centroid().to_xz(), size: 0.15, color },
            DrawCommand::Label { at: goal.shape.centroid().to_xz(), text: goal.name.clone(), color },
        ]
    }
}

pub struct CircleRenderer;

impl GoalRenderer for CircleRenderer {
    fn name(&self) -> &str {
        "circle"
    }

    fn draw(&self, goal: &Goal, highlight: bool) -> Vec<DrawCommand> {
        let color = color_for(highlight);
        match goal.shape {
            GoalShape::Circle { center, radius } => {
                vec![DrawCommand::Circle { center: center.to_xz(), radius, color }]
            }
            _ => fallback(self.name(), goal, highlight),
        }
    }
}

pub struct AabbRenderer;

impl GoalRenderer for AabbRenderer {
    fn name(&self) -> &str {
        "aabb"
    }

    fn draw(&self, goal: &Goal, highlight: bool) -> Vec<DrawCommand> {
        let color = color_for(highlight);
        match goal.shape {
            GoalShape::Aabb { min, max } => {
                vec![DrawCommand::Rect { min: min.to_xz(), max: max.to_xz(), color }]
            }
            _ => fallback(self.name(), goal, highlight),
        }
    }
}

/// Marker drawing for a goal whose shape the bound renderer cannot draw.
fn fallback(renderer: &str, goal: &Goal, highlight: bool) -> Vec<DrawCommand> {
    log::debug!("{renderer} renderer cannot draw goal {:?} ({}); drawing a marker", goal.name, goal.kind);
    MarkerRenderer.draw(goal, highlight)
}
