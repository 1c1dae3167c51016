//! Plain data row types written by output backends.

/// One agent's kinematic state at the end of a tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TrajectoryRow {
    pub agent_id:  u32,
    pub tick:      u64,
    /// Simulated seconds at the end of the tick.
    pub time_secs: f32,
    pub x:         f32,
    pub y:         f32,
    pub vx:        f32,
    pub vy:        f32,
    /// Name of the agent's behavior state.
    pub state:     String,
    pub class_id:  u32,
}

/// Summary statistics for one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSummaryRow {
    pub tick:            u64,
    pub time_secs:       f32,
    pub transitions:     u64,
    pub tasks_ok:        u64,
    pub tasks_recovered: u64,
}
