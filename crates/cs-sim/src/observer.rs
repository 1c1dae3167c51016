//! Simulation observer trait for progress reporting and data collection.

use cs_core::Tick;
use cs_fsm::{Fsm, StepReport};

/// Callbacks invoked by [`Simulator::run`][crate::Simulator::run] at key
/// points in the tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, tick: Tick, report: &StepReport) {
///         if tick.0 % self.interval == 0 {
///             println!("{tick}: {} transitions", report.transitions);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called after the tick's state and task passes succeeded.
    fn on_tick_end(&mut self, _tick: Tick, _report: &StepReport) {}

    /// Called at snapshot intervals (every `config.output_interval_ticks`
    /// ticks) with read-only access to the whole behavior graph, so output
    /// writers can record agent state without the simulator knowing any
    /// output format.
    fn on_snapshot(&mut self, _tick: Tick, _fsm: &Fsm) {}

    /// Called once when `run` stops, whether it finished or failed.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
