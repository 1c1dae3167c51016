//! Goals — named targets that states steer agents toward.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use cs_core::{GoalId, Vec2};

use crate::{FsmError, FsmResult};

/// Geometric region of a goal on the ground plane.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GoalShape {
    Point { at: Vec2 },
    Circle { center: Vec2, radius: f32 },
    Aabb { min: Vec2, max: Vec2 },
}

impl GoalShape {
    /// Name of the shape, used as the goal kind when none is given.
    pub fn type_name(&self) -> &'static str {
        match self {
            GoalShape::Point { .. } => "point",
            GoalShape::Circle { .. } => "circle",
            GoalShape::Aabb { .. } => "aabb",
        }
    }

    pub fn centroid(&self) -> Vec2 {
        match *self {
            GoalShape::Point { at } => at,
            GoalShape::Circle { center, .. } => center,
            GoalShape::Aabb { min, max } => (min + max) * 0.5,
        }
    }

    /// The point of the region closest to `from` (`from` itself if inside).
    pub fn nearest_point(&self, from: Vec2) -> Vec2 {
        match *self {
            GoalShape::Point { at } => at,
            GoalShape::Circle { center, radius } => {
                let offset = from - center;
                if offset.length() <= radius {
                    from
                } else {
                    // `offset` is non-zero here since its length exceeds radius >= 0.
                    center + offset.normalized().unwrap_or(Vec2::ZERO) * radius
                }
            }
            GoalShape::Aabb { min, max } => {
                Vec2::new(from.x.clamp(min.x, max.x), from.y.clamp(min.y, max.y))
            }
        }
    }

    /// Distance from `p` to the region; zero inside.
    pub fn distance(&self, p: Vec2) -> f32 {
        self.nearest_point(p).distance(p)
    }
}

/// A named target.
///
/// `kind` is the goal's type name: the key renderer registries bind on.
/// Plugins may use any kind string to introduce new goal types.
#[derive(Clone, Debug, PartialEq)]
pub struct Goal {
    pub id:    GoalId,
    pub name:  String,
    pub kind:  String,
    pub shape: GoalShape,
}

impl Goal {
    #[inline]
    pub fn kind(&self) -> &str {
        &self.kind
    }
}

/// All goals of a behavior graph, addressable by id or name.
#[derive(Clone, Debug, Default)]
pub struct GoalSet {
    goals:   Vec<Goal>,
    by_name: HashMap<String, GoalId>,
}

impl GoalSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a goal; names must be unique.
    pub fn add(&mut self, name: impl Into<String>, kind: impl Into<String>, shape: GoalShape) -> FsmResult<GoalId> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(FsmError::Behavior(format!("duplicate goal name {name:?}")));
        }
        let id = GoalId(self.goals.len() as u32);
        self.by_name.insert(name.clone(), id);
        self.goals.push(Goal { id, name, kind: kind.into(), shape });
        Ok(id)
    }

    pub fn get(&self, id: GoalId) -> Option<&Goal> {
        self.goals.get(id.index())
    }

    pub fn id_of(&self, name: &str) -> Option<GoalId> {
        self.by_name.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Goal> + '_ {
        self.goals.iter()
    }

    pub fn len(&self) -> usize {
        self.goals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }
}
