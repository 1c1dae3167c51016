//! Transitions between states.

use cs_core::{StateId, Vec2};

use crate::Goal;

/// When a transition fires.
#[derive(Clone, Debug, PartialEq)]
pub enum Condition {
    /// Immediately on the next evaluation.
    Auto,
    /// Once the agent is within `distance` of its goal region.  Never fires
    /// for an agent without a goal.
    GoalReached { distance: f32 },
    /// After `secs` seconds in the state.
    Timer { secs: f32 },
}

impl Condition {
    pub fn is_met(&self, position: Vec2, goal: Option<&Goal>, secs_in_state: f32) -> bool {
        match *self {
            Condition::Auto => true,
            Condition::GoalReached { distance } => {
                goal.is_some_and(|g| g.shape.distance(position) <= distance)
            }
            Condition::Timer { secs } => secs_in_state >= secs,
        }
    }
}

/// Directed edge of the behavior graph.
///
/// Transitions leaving a state are evaluated in declaration order; the first
/// whose condition holds fires.  At most one transition fires per agent per
/// tick.
#[derive(Clone, Debug)]
pub struct Transition {
    pub from:      StateId,
    pub to:        StateId,
    pub condition: Condition,
}
