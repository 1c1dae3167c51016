//! Mutable simulation state passed to every task.

use cs_agent::AgentStore;
use cs_core::{StateId, Tick};

/// The view of FSM state a [`Task`][crate::Task] may read and mutate during
/// its `do_work` call.
///
/// Built by the FSM once per tick after state advancement and handed to each
/// task in turn.  Borrows end when the task pass ends; tasks must not retain
/// references across ticks.  Agent indices are stable for the run, so
/// per-agent task state may be keyed by `AgentId`.
pub struct TaskContext<'a> {
    /// The tick whose state advancement just completed.
    pub tick: Tick,

    /// Seconds of simulated time covered by this tick.
    pub time_step: f32,

    /// Simulated seconds since tick 0, after this tick.
    pub elapsed_secs: f32,

    /// All agent state.  Tasks may write to any field.
    pub agents: &'a mut AgentStore,

    /// Current behavior-graph state of each agent, indexed by `AgentId`.
    pub agent_states: &'a [StateId],
}

impl<'a> TaskContext<'a> {
    #[inline]
    pub fn new(
        tick:         Tick,
        time_step:    f32,
        elapsed_secs: f32,
        agents:       &'a mut AgentStore,
        agent_states: &'a [StateId],
    ) -> Self {
        Self { tick, time_step, elapsed_secs, agents, agent_states }
    }
}
