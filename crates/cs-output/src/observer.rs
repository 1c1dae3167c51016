//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use cs_core::{AgentId, Tick};
use cs_fsm::{Fsm, StepReport};
use cs_sim::SimObserver;

use crate::row::{TickSummaryRow, TrajectoryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes agent trajectories and tick summaries to
/// any [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                log::warn!("output write failed: {e}");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_tick_end(&mut self, tick: Tick, report: &StepReport) {
        let row = TickSummaryRow {
            tick:            tick.0,
            time_secs:       report.elapsed_secs,
            transitions:     report.transitions as u64,
            tasks_ok:        report.tasks.succeeded as u64,
            tasks_recovered: report.tasks.recovered.len() as u64,
        };
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, fsm: &Fsm) {
        let time_secs = fsm.clock().elapsed_secs();
        let agents = fsm.agents();
        let rows: Vec<TrajectoryRow> = agents
            .agent_ids()
            .map(|id: AgentId| {
                let i = id.index();
                TrajectoryRow {
                    agent_id: id.0,
                    tick: tick.0,
                    time_secs,
                    x: agents.position[i].x,
                    y: agents.position[i].y,
                    vx: agents.velocity[i].x,
                    vy: agents.velocity[i].y,
                    state: fsm.state_of(id).map(|s| s.name.clone()).unwrap_or_default(),
                    class_id: agents.class_id[i],
                }
            })
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_trajectories(&rows);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
