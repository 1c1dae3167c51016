//! Fluent builder for constructing an `AgentStore`.
//!
//! # Usage
//!
//! ```rust
//! use cs_agent::{AgentSpec, AgentStoreBuilder};
//! use cs_core::Vec2;
//!
//! let mut builder = AgentStoreBuilder::with_capacity(2);
//! builder.push(AgentSpec { position: Vec2::new(0.0, 0.0), ..AgentSpec::default() });
//! builder.push(AgentSpec { position: Vec2::new(1.0, 0.0), class_id: 1, ..AgentSpec::default() });
//! let store = builder.build();
//!
//! assert_eq!(store.count, 2);
//! assert_eq!(store.class_id[1], 1);
//! ```

use cs_core::{AgentId, Vec2};

use crate::AgentStore;

/// Initial properties of one pedestrian, as read from a scene file.
#[derive(Clone, Debug, PartialEq)]
pub struct AgentSpec {
    pub class_id:   u32,
    pub position:   Vec2,
    pub radius:     f32,
    pub pref_speed: f32,
    pub max_speed:  f32,
}

impl Default for AgentSpec {
    fn default() -> Self {
        Self {
            class_id:   0,
            position:   Vec2::ZERO,
            radius:     0.19,
            pref_speed: 1.34,
            max_speed:  2.0,
        }
    }
}

/// Fluent builder for [`AgentStore`].
///
/// Agents receive ids in push order; velocity starts at zero and orientation
/// faces `+x`.
pub struct AgentStoreBuilder {
    store: AgentStore,
}

impl Default for AgentStoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentStoreBuilder {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Pre-allocate for `capacity` agents (typically the scene row count).
    pub fn with_capacity(capacity: usize) -> Self {
        Self { store: AgentStore::with_capacity(capacity) }
    }

    /// Append one agent and return its id.
    pub fn push(&mut self, spec: AgentSpec) -> AgentId {
        let id = AgentId(self.store.count as u32);
        let s = &mut self.store;
        s.position.push(spec.position);
        s.velocity.push(Vec2::ZERO);
        s.orientation.push(Vec2::new(1.0, 0.0));
        s.radius.push(spec.radius);
        s.pref_speed.push(spec.pref_speed);
        s.max_speed.push(spec.max_speed);
        s.class_id.push(spec.class_id);
        s.count += 1;
        id
    }

    /// Chaining form of [`push`](Self::push).
    pub fn agent(mut self, spec: AgentSpec) -> Self {
        self.push(spec);
        self
    }

    /// Number of agents pushed so far.
    pub fn len(&self) -> usize {
        self.store.count
    }

    pub fn is_empty(&self) -> bool {
        self.store.count == 0
    }

    /// Freeze the population.
    pub fn build(self) -> AgentStore {
        self.store
    }
}
