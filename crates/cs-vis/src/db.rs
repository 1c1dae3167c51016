//! The goal renderer registry.

use cs_fsm::{Goal, GoalSet};
use cs_registry::{ElementKind, Registry};

use crate::{AabbRenderer, CircleRenderer, DrawCommand, GoalRenderer, MarkerRenderer, PointRenderer};

/// Registry flavor binding [`GoalRenderer`]s to goal kinds.
pub struct GoalRendererKind;

impl ElementKind for GoalRendererKind {
    type Product = dyn GoalRenderer;
    type Key = Goal;

    fn key_type_name(goal: &Goal) -> &str {
        goal.kind()
    }

    fn element_name() -> &'static str {
        "goal renderer"
    }

    fn default_element() -> Box<dyn GoalRenderer> {
        Box::new(MarkerRenderer)
    }

    fn add_builtins(registry: &mut Registry<Self>) {
        registry.register_element("point", || Box::new(PointRenderer) as Box<dyn GoalRenderer>);
        registry.register_element("circle", || Box::new(CircleRenderer) as Box<dyn GoalRenderer>);
        registry.register_element("aabb", || Box::new(AabbRenderer) as Box<dyn GoalRenderer>);
    }
}

pub type GoalRendererDb = Registry<GoalRendererKind>;

/// Draw every goal in id order with the renderer bound to its kind.
pub fn draw_goals(db: &GoalRendererDb, goals: &GoalSet) -> Vec<DrawCommand> {
    goals
        .iter()
        .flat_map(|goal| db.get_element_for(goal).draw(goal, false))
        .collect()
}
