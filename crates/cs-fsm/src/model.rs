//! The `PedestrianModel` trait — the velocity-computation extension point.
//!
//! The core does not prescribe a dynamics algorithm.  A model receives the
//! agent's preferred velocity (from its state) and read-only access to the
//! population, and returns the velocity it wants the agent to move with this
//! tick.  The FSM clamps the result to the agent's `max_speed` and integrates.

use std::collections::HashMap;

use cs_agent::{AgentStore, NeighborIndex};
use cs_core::{AgentId, Vec2};

use crate::{FsmError, FsmResult};

/// Read-only inputs shared by every velocity computation in one tick.
pub struct ModelContext<'a> {
    pub agents:    &'a AgentStore,
    pub neighbors: &'a NeighborIndex,
    pub time_step: f32,
}

/// Pluggable pedestrian dynamics.
///
/// With the `parallel` feature, `compute_velocity` is called for many agents
/// concurrently, so implementations must be `Send + Sync` and keep no
/// per-call mutable state.
pub trait PedestrianModel: Send + Sync + 'static {
    /// Name the model is selected by at initialization.
    fn name(&self) -> &str;

    fn compute_velocity(&self, agent: AgentId, pref_velocity: Vec2, ctx: &ModelContext<'_>) -> Vec2;
}

/// Moves every agent exactly at its preferred velocity.
pub struct DirectModel;

impl PedestrianModel for DirectModel {
    fn name(&self) -> &str {
        "direct"
    }

    fn compute_velocity(&self, _agent: AgentId, pref_velocity: Vec2, _ctx: &ModelContext<'_>) -> Vec2 {
        pref_velocity
    }
}

/// Approaches the preferred velocity with bounded acceleration.
pub struct DampedModel {
    /// Maximum change in velocity per second, m/s².
    pub max_accel: f32,
}

impl Default for DampedModel {
    fn default() -> Self {
        Self { max_accel: 5.0 }
    }
}

impl PedestrianModel for DampedModel {
    fn name(&self) -> &str {
        "damped"
    }

    fn compute_velocity(&self, agent: AgentId, pref_velocity: Vec2, ctx: &ModelContext<'_>) -> Vec2 {
        let current = ctx.agents.velocity[agent.index()];
        let delta = (pref_velocity - current).clamp_length(self.max_accel * ctx.time_step);
        current + delta
    }
}

type ModelFactory = Box<dyn Fn() -> Box<dyn PedestrianModel> + Send + Sync>;

/// Model name → constructor.
///
/// Selecting an unknown model name is an initialization error.
#[derive(Default)]
pub struct ModelCatalog {
    factories: HashMap<String, ModelFactory>,
}

impl ModelCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A catalog holding the `direct` and `damped` models.
    pub fn with_builtins() -> Self {
        let mut catalog = Self::new();
        catalog.register("direct", || Box::new(DirectModel) as Box<dyn PedestrianModel>);
        catalog.register("damped", || Box::new(DampedModel::default()) as Box<dyn PedestrianModel>);
        catalog
    }

    /// Register a model constructor.  Returns `true` if it replaced one.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F) -> bool
    where
        F: Fn() -> Box<dyn PedestrianModel> + Send + Sync + 'static,
    {
        self.insert(name.into(), Box::new(factory))
    }

    /// Move every constructor of `other` into `self`, replacing on collision.
    pub fn merge(&mut self, other: ModelCatalog) {
        let mut factories: Vec<_> = other.factories.into_iter().collect();
        factories.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        for (name, factory) in factories {
            self.insert(name, factory);
        }
    }

    fn insert(&mut self, name: String, factory: ModelFactory) -> bool {
        let replaced = self.factories.insert(name.clone(), factory).is_some();
        if replaced {
            log::info!("pedestrian model {name:?} replaced");
        }
        replaced
    }

    pub fn create(&self, name: &str) -> FsmResult<Box<dyn PedestrianModel>> {
        self.factories
            .get(name)
            .map(|f| f())
            .ok_or_else(|| FsmError::UnknownModel(name.to_owned()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered model names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
