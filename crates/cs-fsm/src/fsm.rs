//! The `Fsm` struct and its per-tick advancement.

use cs_agent::{AgentStore, NeighborIndex};
use cs_core::{AgentId, GoalId, SimClock, SimConfig, SimRng, StateId, Tick, Vec2};
use cs_task::{TaskContext, TaskList, TaskReport};

use crate::{
    FsmResult, GoalSet, ModelContext, PedestrianModel, State, Transition, VelocityComponent,
};

/// What one call to [`Fsm::advance`] did.
#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    /// The tick that was simulated.
    pub tick:         Tick,
    /// Simulated seconds at the end of the tick.
    pub elapsed_secs: f32,
    /// Agents that changed state this tick.
    pub transitions:  usize,
    /// Outcome of the task pass.
    pub tasks:        TaskReport,
}

/// The behavior graph: owns the agents, their state and goal assignments, the
/// pedestrian model and the task list.
///
/// One tick ([`advance`](Self::advance)) runs, in order:
///
/// 1. **Transitions**: for each agent (ascending id), the first outgoing
///    transition of its state whose condition holds fires; the agent enters
///    the target state and picks a goal.
/// 2. **Preferred velocity**: from each state's velocity component.
/// 3. **Velocity**: [`PedestrianModel::compute_velocity`] for every agent
///    (parallel with the `parallel` feature; read-only).
/// 4. **Integrate**: sequential apply in ascending id order: clamp to
///    `max_speed`, move, update orientation.
/// 5. **Tasks**: [`TaskList::run_all`] once.
///
/// Create via [`FsmBuilder`][crate::FsmBuilder].  The agent count never
/// changes after construction.
pub struct Fsm {
    pub(crate) config:        SimConfig,
    pub(crate) clock:         SimClock,
    pub(crate) agents:        AgentStore,
    pub(crate) agent_states:  Vec<StateId>,
    pub(crate) agent_goals:   Vec<Option<GoalId>>,
    pub(crate) state_entered: Vec<f32>,
    pub(crate) states:        Vec<State>,
    pub(crate) transitions:   Vec<Vec<Transition>>,
    pub(crate) goals:         GoalSet,
    pub(crate) tasks:         TaskList,
    pub(crate) model:         Box<dyn PedestrianModel>,
    pub(crate) rng:           SimRng,
    #[cfg(feature = "parallel")]
    pub(crate) pool:          Option<rayon::ThreadPool>,
}

impl Fsm {
    // ── Public API ────────────────────────────────────────────────────────

    /// Simulate one tick.
    ///
    /// Both halting failures consume the tick: the clock advances past it
    /// before the error is returned.
    ///
    /// * A non-finite position after integration is returned as
    ///   [`FsmError::Core`][crate::FsmError::Core] and the task pass is skipped.
    /// * A fatal task failure is returned as
    ///   [`FsmError::TaskFatal`][crate::FsmError::TaskFatal].
    pub fn advance(&mut self) -> FsmResult<StepReport> {
        let now = self.clock.current_tick;
        let dt = self.clock.time_step;

        let transitions = self.fire_transitions();

        let preferred = self.preferred_velocities(dt);
        let velocities = self.compute_velocities(&preferred, dt);
        self.integrate(&velocities, dt);
        if let Err(e) = self.agents.check_finite() {
            self.clock.advance();
            return Err(e.into());
        }

        let elapsed = self.clock.elapsed_secs() + dt;
        let mut ctx = TaskContext::new(now, dt, elapsed, &mut self.agents, &self.agent_states);
        let result = self.tasks.run_all(&mut ctx);
        self.clock.advance();

        let tasks = result?;
        log::debug!(
            "{now}: {transitions} transitions, {} tasks ok, {} skipped",
            tasks.succeeded,
            tasks.recovered.len()
        );
        Ok(StepReport { tick: now, elapsed_secs: self.clock.elapsed_secs(), transitions, tasks })
    }

    /// `true` once the configured tick budget is spent or every agent sits in
    /// a final state.  A population of zero is finished immediately.
    pub fn is_finished(&self) -> bool {
        self.clock.current_tick >= self.config.end_tick()
            || self.agent_states.iter().all(|s| self.states[s.index()].is_final)
    }

    /// Change the time step used from the next tick on.
    pub fn set_time_step(&mut self, time_step: f32) {
        self.clock.time_step = time_step;
        self.config.time_step = time_step;
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn agent_count(&self) -> usize {
        self.agents.count
    }

    pub fn agents(&self) -> &AgentStore {
        &self.agents
    }

    pub fn goals(&self) -> &GoalSet {
        &self.goals
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// Look up a state id by name.
    pub fn state_id(&self, name: &str) -> Option<StateId> {
        self.states.iter().find(|s| s.name == name).map(|s| s.id)
    }

    /// Current state of `agent`, or `None` for an out-of-range id.
    pub fn state_of(&self, agent: AgentId) -> Option<&State> {
        self.agent_states.get(agent.index()).map(|s| &self.states[s.index()])
    }

    /// Current goal of `agent`.
    pub fn goal_of(&self, agent: AgentId) -> Option<GoalId> {
        self.agent_goals.get(agent.index()).copied().flatten()
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    /// Mutable task list, for plugins attaching tasks after construction.
    pub fn tasks_mut(&mut self) -> &mut TaskList {
        &mut self.tasks
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    // ── Tick phases ───────────────────────────────────────────────────────

    pub(crate) fn enter_state(&mut self, agent: AgentId, state: StateId) {
        let i = agent.index();
        self.agent_states[i] = state;
        self.state_entered[i] = self.clock.elapsed_secs();
        self.agent_goals[i] = self.states[state.index()].selector.select(
            self.agents.position[i],
            &self.goals,
            &mut self.rng,
        );
    }

    fn fire_transitions(&mut self) -> usize {
        let elapsed = self.clock.elapsed_secs();
        let mut fired = 0;
        for i in 0..self.agents.count {
            let state = self.agent_states[i];
            let position = self.agents.position[i];
            let goal = self.agent_goals[i].and_then(|g| self.goals.get(g));
            let in_state = elapsed - self.state_entered[i];

            let target = self.transitions[state.index()]
                .iter()
                .find(|t| t.condition.is_met(position, goal, in_state))
                .map(|t| t.to);

            if let Some(to) = target {
                log::trace!(
                    "agent {i}: {} -> {}",
                    self.states[state.index()].name,
                    self.states[to.index()].name
                );
                self.enter_state(AgentId(i as u32), to);
                fired += 1;
            }
        }
        fired
    }

    fn preferred_velocities(&self, dt: f32) -> Vec<Vec2> {
        (0..self.agents.count)
            .map(|i| {
                let state = &self.states[self.agent_states[i].index()];
                let goal = self.agent_goals[i].and_then(|g| self.goals.get(g));
                match (state.velocity, goal) {
                    (VelocityComponent::TowardGoal, Some(goal)) => {
                        let position = self.agents.position[i];
                        let to_goal = goal.shape.nearest_point(position) - position;
                        // Do not overshoot the goal within one tick.
                        let speed = self.agents.pref_speed[i].min(to_goal.length() / dt);
                        to_goal.normalized().map_or(Vec2::ZERO, |dir| dir * speed)
                    }
                    _ => Vec2::ZERO,
                }
            })
            .collect()
    }

    fn compute_velocities(&self, preferred: &[Vec2], dt: f32) -> Vec<Vec2> {
        let neighbors = NeighborIndex::build(&self.agents);
        let ctx = ModelContext { agents: &self.agents, neighbors: &neighbors, time_step: dt };
        let model = self.model.as_ref();

        #[cfg(not(feature = "parallel"))]
        {
            preferred
                .iter()
                .enumerate()
                .map(|(i, &pref)| model.compute_velocity(AgentId(i as u32), pref, &ctx))
                .collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            let compute = || {
                preferred
                    .par_iter()
                    .enumerate()
                    .map(|(i, &pref)| model.compute_velocity(AgentId(i as u32), pref, &ctx))
                    .collect()
            };
            match &self.pool {
                Some(pool) => pool.install(compute),
                None => compute(),
            }
        }
    }

    fn integrate(&mut self, velocities: &[Vec2], dt: f32) {
        let agents = &mut self.agents;
        for (i, &v) in velocities.iter().enumerate() {
            let v = v.clamp_length(agents.max_speed[i]);
            agents.velocity[i] = v;
            agents.position[i] += v * dt;
            if let Some(dir) = v.normalized() {
                agents.orientation[i] = dir;
            }
        }
    }
}
