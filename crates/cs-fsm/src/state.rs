//! State nodes of the behavior graph and their goal selectors.

use cs_core::{GoalId, SimRng, StateId, Vec2};

use crate::GoalSet;

/// How an agent entering a state picks its goal.
#[derive(Clone, Debug, PartialEq)]
pub enum GoalSelector {
    /// No goal; the agent stands still.
    None,
    /// Always the same goal.
    Fixed(GoalId),
    /// The candidate closest to the agent at entry time.  Ties go to the
    /// earlier candidate.
    Nearest(Vec<GoalId>),
    /// A uniformly random candidate drawn from the simulation RNG.
    Random(Vec<GoalId>),
}

impl GoalSelector {
    pub fn select(&self, position: Vec2, goals: &GoalSet, rng: &mut SimRng) -> Option<GoalId> {
        match self {
            GoalSelector::None => None,
            GoalSelector::Fixed(id) => Some(*id),
            GoalSelector::Nearest(candidates) => {
                let mut best: Option<(GoalId, f32)> = None;
                for &id in candidates {
                    let Some(goal) = goals.get(id) else { continue };
                    let d = goal.shape.distance(position);
                    if best.is_none_or(|(_, bd)| d < bd) {
                        best = Some((id, d));
                    }
                }
                best.map(|(id, _)| id)
            }
            GoalSelector::Random(candidates) => rng.choose(candidates).copied(),
        }
    }
}

/// What preferred velocity a state produces.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum VelocityComponent {
    /// Stand still.
    Zero,
    /// Walk toward the nearest point of the assigned goal at preferred speed.
    TowardGoal,
}

/// A node of the behavior graph.
#[derive(Clone, Debug)]
pub struct State {
    pub id:       StateId,
    pub name:     String,
    pub selector: GoalSelector,
    pub velocity: VelocityComponent,
    /// Agents in a final state are done; the run ends when all agents are.
    pub is_final: bool,
}
