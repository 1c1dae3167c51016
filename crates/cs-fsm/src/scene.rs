//! CSV scene loader.
//!
//! # CSV format
//!
//! One row per agent, in `AgentId` order.
//!
//! ```csv
//! class,x,y,radius,pref_speed,max_speed,state
//! 0,0.0,0.0,0.2,1.3,2.0,walk
//! 0,1.0,0.0,,,,
//! 1,0.0,2.0,0.25,1.1,1.8,wait
//! ```
//!
//! Empty `radius`, `pref_speed` and `max_speed` take the `AgentSpec`
//! defaults.  An empty `state` puts the agent in the behavior's initial
//! state.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use cs_agent::AgentSpec;
use cs_core::Vec2;

use crate::{FsmError, FsmResult};

#[derive(Deserialize)]
struct SceneRecord {
    class:      u32,
    x:          f32,
    y:          f32,
    radius:     Option<f32>,
    pref_speed: Option<f32>,
    max_speed:  Option<f32>,
    state:      Option<String>,
}

/// The initial population.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    pub agents: Vec<AgentSpec>,
    /// Per-agent initial state name; `None` means the behavior default.
    pub initial_states: Vec<Option<String>>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an agent (chaining form, used by programmatic scenes).
    pub fn agent(mut self, spec: AgentSpec, state: Option<&str>) -> Self {
        self.agents.push(spec);
        self.initial_states.push(state.map(str::to_owned));
        self
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

/// Load a scene from a CSV file.
pub fn load_scene(path: &Path) -> FsmResult<Scene> {
    let file = std::fs::File::open(path)?;
    load_scene_reader(file)
}

/// Like [`load_scene`] but accepts any `Read` source.
pub fn load_scene_reader<R: Read>(reader: R) -> FsmResult<Scene> {
    let defaults = AgentSpec::default();
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut scene = Scene::new();

    for (row, result) in csv_reader.deserialize::<SceneRecord>().enumerate() {
        let r = result?;
        let spec = AgentSpec {
            class_id:   r.class,
            position:   Vec2::new(r.x, r.y),
            radius:     r.radius.unwrap_or(defaults.radius),
            pref_speed: r.pref_speed.unwrap_or(defaults.pref_speed),
            max_speed:  r.max_speed.unwrap_or(defaults.max_speed),
        };
        if !spec.position.is_finite() || !(spec.radius > 0.0) || spec.pref_speed < 0.0 || spec.max_speed < 0.0 {
            return Err(FsmError::Behavior(format!("scene row {}: invalid agent {spec:?}", row + 1)));
        }
        scene.agents.push(spec);
        scene.initial_states.push(r.state.filter(|s| !s.is_empty()));
    }

    Ok(scene)
}
