//! Core agent storage: `AgentStore` (SoA data).
//!
//! Every field is a plain `pub Vec` so the pedestrian model and tasks can
//! address a single agent with `store.position[agent.index()]` on the hot path.

use cs_core::{AgentId, CsError, CsResult, Vec2};

/// Structure-of-Arrays storage for all pedestrian state.
///
/// Every `Vec` field has exactly `count` elements; the `AgentId` value is the
/// index into all of them:
///
/// ```ignore
/// let pos = store.position[agent.index()];  // O(1), cache-friendly
/// ```
///
/// Do not push into the vectors directly; the count is fixed at build time
/// and the host query API relies on it.  Build through
/// [`AgentStoreBuilder`][crate::AgentStoreBuilder].
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentStore {
    /// Number of agents.  Equals the length of every SoA `Vec`.
    pub count: usize,

    /// Position on the ground plane, metres.
    pub position: Vec<Vec2>,

    /// Current velocity, metres per second.
    pub velocity: Vec<Vec2>,

    /// Unit facing direction.  Only updated while the agent is moving.
    pub orientation: Vec<Vec2>,

    /// Body radius, metres.
    pub radius: Vec<f32>,

    /// Speed the agent would like to walk at.
    pub pref_speed: Vec<f32>,

    /// Hard upper bound on speed.
    pub max_speed: Vec<f32>,

    /// Population class from the scene file.
    pub class_id: Vec<u32>,
}

impl AgentStore {
    /// `true` if there are no agents.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// `true` if `agent` addresses a slot in this store.
    #[inline]
    pub fn contains(&self, agent: AgentId) -> bool {
        agent.index() < self.count
    }

    /// Iterator over all `AgentId`s in ascending index order.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        (0..self.count as u32).map(AgentId)
    }

    /// Check that every kinematic field of every agent is finite.
    ///
    /// Returns the first offending agent in ascending index order.
    pub fn check_finite(&self) -> CsResult<()> {
        for i in 0..self.count {
            let agent = AgentId(i as u32);
            if !self.position[i].is_finite() {
                return Err(CsError::NonFinite { agent, field: "position" });
            }
            if !self.velocity[i].is_finite() {
                return Err(CsError::NonFinite { agent, field: "velocity" });
            }
        }
        Ok(())
    }

    // ── Package-private constructor used by AgentStoreBuilder ─────────────

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            count:       0,
            position:    Vec::with_capacity(capacity),
            velocity:    Vec::with_capacity(capacity),
            orientation: Vec::with_capacity(capacity),
            radius:      Vec::with_capacity(capacity),
            pref_speed:  Vec::with_capacity(capacity),
            max_speed:   Vec::with_capacity(capacity),
            class_id:    Vec::with_capacity(capacity),
        }
    }
}
