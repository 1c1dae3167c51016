//! `StressTask` — proximity-driven stress accumulation.
//!
//! # Law
//!
//! Per tick, with time step `dt` and contact radius `r`:
//!
//! ```text
//! exposure_i = Σ_{j ≠ i, d_ij < r} (1 − d_ij / r)
//! s_i       ← clamp(s_i · (1 − decay · dt) + accumulation · exposure_i · dt, 0, 1)
//! ```
//!
//! With `speed_relief > 0` stressed agents hurry:
//! `pref_speed_i = base_i · (1 + speed_relief · s_i)`, where `base_i` is the
//! agent's preferred speed the first time the task saw it.

use std::any::Any;
use std::fmt;

use cs_agent::NeighborIndex;
use cs_core::AgentId;
use cs_task::{Task, TaskContext, TaskError, TaskResult};

/// Keeps one stress level in `[0, 1]` per agent.
#[derive(Clone, Debug)]
pub struct StressTask {
    /// Distance under which agents stress each other, meters.
    pub contact_radius: f32,
    /// Fraction of stress shed per second.
    pub decay:          f32,
    /// Stress gained per second per unit of exposure.
    pub accumulation:   f32,
    /// How strongly stress raises preferred speed; 0 disables.
    pub speed_relief:   f32,

    levels:     Vec<f32>,
    base_speed: Vec<f32>,
    scratch:    Vec<f32>,
}

impl StressTask {
    pub fn new(contact_radius: f32, decay: f32, accumulation: f32) -> Self {
        Self {
            contact_radius,
            decay,
            accumulation,
            speed_relief: 0.0,
            levels: Vec::new(),
            base_speed: Vec::new(),
            scratch: Vec::new(),
        }
    }

    pub fn with_speed_relief(mut self, speed_relief: f32) -> Self {
        self.speed_relief = speed_relief;
        self
    }

    /// Current stress of `agent`; `None` before the agent was first seen.
    pub fn stress(&self, agent: AgentId) -> Option<f32> {
        self.levels.get(agent.index()).copied()
    }

    /// Stress of every tracked agent, indexed by `AgentId`.
    pub fn stress_levels(&self) -> &[f32] {
        &self.levels
    }

    fn check_params(&self) -> TaskResult<()> {
        let ok = self.contact_radius.is_finite()
            && self.contact_radius > 0.0
            && [self.decay, self.accumulation, self.speed_relief]
                .iter()
                .all(|v| v.is_finite() && *v >= 0.0);
        if ok { Ok(()) } else { Err(TaskError::fatal(format!("{self} has invalid parameters"))) }
    }
}

impl Default for StressTask {
    fn default() -> Self {
        Self::new(2.0, 0.1, 0.5)
    }
}

impl fmt::Display for StressTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "StressTask(radius={}, decay={}, accumulation={}, relief={})",
            self.contact_radius, self.decay, self.accumulation, self.speed_relief
        )
    }
}

impl Task for StressTask {
    fn do_work(&mut self, ctx: &mut TaskContext<'_>) -> TaskResult<()> {
        self.check_params()?;

        let agents = &mut *ctx.agents;
        if let Some(i) = agents.position.iter().position(|p| !p.is_finite()) {
            return Err(TaskError::recoverable(format!("agent {i} has a non-finite position")));
        }

        let n = agents.count;
        self.levels.resize(n, 0.0);
        while self.base_speed.len() < n {
            self.base_speed.push(agents.pref_speed[self.base_speed.len()]);
        }

        let r = self.contact_radius;
        let retain = 1.0 - self.decay * ctx.time_step;
        let gain = self.accumulation * ctx.time_step;
        let index = NeighborIndex::build(agents);

        self.scratch.clear();
        for i in 0..n {
            let exposure: f32 = index
                .neighbors_of(AgentId(i as u32), agents.position[i], r)
                .iter()
                .map(|&(_, d)| 1.0 - d / r)
                .sum();
            self.scratch.push((self.levels[i] * retain + gain * exposure).clamp(0.0, 1.0));
        }
        std::mem::swap(&mut self.levels, &mut self.scratch);

        if self.speed_relief > 0.0 {
            for i in 0..n {
                agents.pref_speed[i] = self.base_speed[i] * (1.0 + self.speed_relief * self.levels[i]);
            }
        }
        Ok(())
    }

    fn is_equivalent(&self, other: &dyn Task) -> bool {
        other.as_any().downcast_ref::<StressTask>().is_some_and(|o| {
            o.contact_radius == self.contact_radius
                && o.decay == self.decay
                && o.accumulation == self.accumulation
                && o.speed_relief == self.speed_relief
        })
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
