//! The `Simulator` facade.

use std::path::Path;

use cs_core::{Tick, Vec2, Vec3};
use cs_fsm::{Fsm, Goal, StepReport};
use cs_plugin::LoadedPlugins;
use cs_vis::{DrawCommand, GoalRenderer, GoalRendererDb, draw_goals};

use crate::{SimBuilder, SimError, SimObserver, SimResult};

/// A running simulation: the behavior graph plus the tables plugins extended.
///
/// Stepping is single-threaded and synchronous: each successful
/// [`step`](Self::step) advances every agent once and runs every task once.
/// A fatal failure halts the simulator for good; later steps are refused.
///
/// Agent accessors take an index in `0..agent_count()` and return `None`
/// outside it.  Indices are fixed for the whole run.
///
/// Create via [`SimBuilder`] or [`Simulator::init`].
pub struct Simulator {
    fsm:       Fsm,
    renderers: GoalRendererDb,
    plugins:   LoadedPlugins,
    halted:    bool,
}

impl Simulator {
    pub(crate) fn new(fsm: Fsm, renderers: GoalRendererDb, plugins: LoadedPlugins) -> Self {
        Self { fsm, renderers, plugins, halted: false }
    }

    /// Initialize from files with every linked plugin available.
    ///
    /// Returns `None` (after logging the cause) if initialization fails.
    pub fn init(behavior: &Path, scene: &Path, model: &str, plugin_path: Option<&Path>) -> Option<Simulator> {
        let mut builder = SimBuilder::new(behavior, scene, model).linked_plugins();
        if let Some(dir) = plugin_path {
            builder = builder.plugin_path(dir);
        }
        match builder.build() {
            Ok(sim) => Some(sim),
            Err(e) => {
                log::error!("initialization failed: {e}");
                None
            }
        }
    }

    // ── Stepping ──────────────────────────────────────────────────────────

    /// Advance one tick.
    ///
    /// Returns `false`, without doing anything, once the run is finished or
    /// halted, and `false` for the tick on which a fatal failure occurs.
    pub fn step(&mut self) -> bool {
        match self.try_step() {
            Ok(_) => true,
            Err(SimError::Finished(_) | SimError::Halted) => false,
            Err(e) => {
                log::error!("{e}");
                false
            }
        }
    }

    /// Like [`step`](Self::step) but reports what happened.
    pub fn try_step(&mut self) -> SimResult<StepReport> {
        if self.halted {
            return Err(SimError::Halted);
        }
        if self.fsm.is_finished() {
            return Err(SimError::Finished(self.current_tick()));
        }
        self.fsm.advance().map_err(|e| {
            self.halted = true;
            SimError::from(e)
        })
    }

    /// Step until finished, reporting to `observer`.
    ///
    /// Returns the error that halted the run, if any.  `on_sim_end` is called
    /// either way.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let result = loop {
            if self.halted {
                break Err(SimError::Halted);
            }
            if self.fsm.is_finished() {
                break Ok(());
            }
            if let Err(e) = self.tick_observed(observer) {
                break Err(e);
            }
        };
        observer.on_sim_end(self.current_tick());
        result
    }

    /// Run exactly `n` ticks from the current position (ignores the tick
    /// budget and final states).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            if self.halted {
                return Err(SimError::Halted);
            }
            self.tick_observed(observer)?;
        }
        Ok(())
    }

    fn tick_observed<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let now = self.current_tick();
        observer.on_tick_start(now);
        let report = self.fsm.advance().map_err(|e| {
            self.halted = true;
            SimError::from(e)
        })?;
        observer.on_tick_end(now, &report);
        let interval = self.fsm.config().output_interval_ticks;
        if interval > 0 && now.0.is_multiple_of(interval) {
            observer.on_snapshot(now, &self.fsm);
        }
        Ok(())
    }

    /// Change the time step from the next tick on.
    pub fn set_time_step(&mut self, time_step: f32) -> SimResult<()> {
        if !(time_step.is_finite() && time_step > 0.0) {
            return Err(SimError::Config(format!("time step must be positive, got {time_step}")));
        }
        self.fsm.set_time_step(time_step);
        Ok(())
    }

    // ── State ─────────────────────────────────────────────────────────────

    pub fn current_tick(&self) -> Tick {
        self.fsm.clock().current_tick
    }

    pub fn elapsed_secs(&self) -> f32 {
        self.fsm.clock().elapsed_secs()
    }

    pub fn is_finished(&self) -> bool {
        self.fsm.is_finished()
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn fsm(&self) -> &Fsm {
        &self.fsm
    }

    pub fn fsm_mut(&mut self) -> &mut Fsm {
        &mut self.fsm
    }

    pub fn plugins(&self) -> &LoadedPlugins {
        &self.plugins
    }

    // ── Agent queries ─────────────────────────────────────────────────────

    pub fn agent_count(&self) -> usize {
        self.fsm.agent_count()
    }

    /// Position on the `xz` plane.
    pub fn agent_position(&self, i: usize) -> Option<Vec3> {
        self.fsm.agents().position.get(i).map(|p| p.to_xz())
    }

    /// Velocity on the `xz` plane.
    pub fn agent_velocity(&self, i: usize) -> Option<Vec3> {
        self.fsm.agents().velocity.get(i).map(|v| v.to_xz())
    }

    /// Unit facing direction on the ground plane.
    pub fn agent_orientation(&self, i: usize) -> Option<Vec2> {
        self.fsm.agents().orientation.get(i).copied()
    }

    pub fn agent_class(&self, i: usize) -> Option<u32> {
        self.fsm.agents().class_id.get(i).copied()
    }

    pub fn agent_radius(&self, i: usize) -> Option<f32> {
        self.fsm.agents().radius.get(i).copied()
    }

    // ── Goal drawing ──────────────────────────────────────────────────────

    pub fn goal_renderers(&self) -> &GoalRendererDb {
        &self.renderers
    }

    /// The renderer bound to `goal`'s kind (the default marker if none is).
    pub fn goal_renderer(&self, goal: &Goal) -> Box<dyn GoalRenderer> {
        self.renderers.get_element_for(goal)
    }

    /// Draw commands for every goal of the behavior.
    pub fn draw_goals(&self) -> Vec<DrawCommand> {
        draw_goals(&self.renderers, self.fsm.goals())
    }
}
