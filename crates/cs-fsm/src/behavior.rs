//! Behavior file loader.
//!
//! # JSON format
//!
//! ```json
//! {
//!   "config":  { "time_step": 0.1, "total_ticks": 600, "seed": 7 },
//!   "required_plugins": ["stress"],
//!   "initial_state": "walk",
//!   "goals": [
//!     { "name": "exit", "shape": { "type": "circle", "center": { "x": 20, "y": 0 }, "radius": 1.0 } }
//!   ],
//!   "states": [
//!     { "name": "walk", "goal": { "type": "fixed", "goal": "exit" } },
//!     { "name": "done", "final": true }
//!   ],
//!   "transitions": [
//!     { "from": "walk", "to": "done", "condition": { "type": "goal_reached", "distance": 0.5 } }
//!   ],
//!   "tasks": [
//!     { "type": "stress", "params": { "radius": 2.0, "decay": 0.1 } }
//!   ]
//! }
//! ```
//!
//! | Key                 | Default                                           |
//! |---------------------|---------------------------------------------------|
//! | `config`            | `SimConfig::default()` (fields individually)      |
//! | `required_plugins`  | none                                              |
//! | `initial_state`     | first entry of `states`                           |
//! | goal `kind`         | the shape type (`point`, `circle`, `aabb`)        |
//! | state `goal`        | `{ "type": "none" }`                              |
//! | state `velocity`    | `goal` if the state has a goal selector, else `zero` |
//! | task `params`       | `null`                                            |
//!
//! Names are resolved to ids by [`FsmBuilder`][crate::FsmBuilder]; this
//! module only parses.

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use cs_core::SimConfig;

use crate::{FsmResult, GoalShape};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BehaviorSpec {
    #[serde(default)]
    pub config: Option<SimConfig>,

    #[serde(default)]
    pub required_plugins: Vec<String>,

    #[serde(default)]
    pub initial_state: Option<String>,

    #[serde(default)]
    pub goals: Vec<GoalSpec>,

    pub states: Vec<StateSpec>,

    #[serde(default)]
    pub transitions: Vec<TransitionSpec>,

    #[serde(default)]
    pub tasks: Vec<TaskSpec>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GoalSpec {
    pub name: String,
    #[serde(default)]
    pub kind: Option<String>,
    pub shape: GoalShape,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SelectorSpec {
    #[default]
    None,
    Fixed { goal: String },
    Nearest { goals: Vec<String> },
    Random { goals: Vec<String> },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VelocitySpec {
    Zero,
    Goal,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StateSpec {
    pub name: String,
    #[serde(default)]
    pub goal: SelectorSpec,
    #[serde(default)]
    pub velocity: Option<VelocitySpec>,
    #[serde(default, rename = "final")]
    pub is_final: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConditionSpec {
    Auto,
    GoalReached {
        #[serde(default)]
        distance: f32,
    },
    Timer { secs: f32 },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransitionSpec {
    pub from: String,
    pub to: String,
    pub condition: ConditionSpec,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskSpec {
    #[serde(rename = "type")]
    pub task_type: String,
    #[serde(default)]
    pub params: Value,
}

/// Parse a behavior file from disk.
pub fn load_behavior(path: &Path) -> FsmResult<BehaviorSpec> {
    let file = std::fs::File::open(path)?;
    load_behavior_reader(std::io::BufReader::new(file))
}

/// Like [`load_behavior`] but accepts any `Read` source.
pub fn load_behavior_reader<R: Read>(reader: R) -> FsmResult<BehaviorSpec> {
    Ok(serde_json::from_reader(reader)?)
}
