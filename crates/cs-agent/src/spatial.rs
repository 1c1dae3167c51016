//! Radius queries over agent positions.
//!
//! An R-tree (via `rstar`) is bulk-loaded from the current positions.  The
//! index is a snapshot: callers rebuild it whenever positions change (once
//! per tick) and never hold it across ticks, so agents joining or leaving the
//! tracked set need no bookkeeping.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use cs_core::{AgentId, Vec2};

use crate::AgentStore;

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// Entry stored in the R-tree: a 2-D `[x, y]` point with its `AgentId`.
#[derive(Clone)]
struct AgentEntry {
    point: [f32; 2],
    id:    AgentId,
}

impl RTreeObject for AgentEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for AgentEntry {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── NeighborIndex ─────────────────────────────────────────────────────────────

/// Snapshot spatial index over agent positions.
///
/// Agents with a non-finite position are left out of the index.
pub struct NeighborIndex {
    tree: RTree<AgentEntry>,
}

impl NeighborIndex {
    /// Bulk-load an index from the store's current positions.
    pub fn build(store: &AgentStore) -> Self {
        let entries: Vec<AgentEntry> = store
            .position
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_finite())
            .map(|(i, p)| AgentEntry { point: p.to_array(), id: AgentId(i as u32) })
            .collect();
        Self { tree: RTree::bulk_load(entries) }
    }

    /// Number of indexed agents.
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// All agents strictly within `radius` of `center`, with their distance.
    ///
    /// Results are sorted by ascending `AgentId` so that callers summing over
    /// neighbors get bit-identical floats run to run.
    pub fn within(&self, center: Vec2, radius: f32) -> Vec<(AgentId, f32)> {
        let mut out: Vec<(AgentId, f32)> = self
            .tree
            .locate_within_distance(center.to_array(), radius * radius)
            .map(|e| (e.id, Vec2::from(e.point).distance(center)))
            .filter(|&(_, d)| d < radius)
            .collect();
        out.sort_unstable_by_key(|&(id, _)| id);
        out
    }

    /// Like [`within`](Self::within) but excludes `agent` itself.
    pub fn neighbors_of(&self, agent: AgentId, center: Vec2, radius: f32) -> Vec<(AgentId, f32)> {
        let mut out = self.within(center, radius);
        out.retain(|&(id, _)| id != agent);
        out
    }
}
