//! The `OutputWriter` trait implemented by output backends.

use crate::{OutputResult, TickSummaryRow, TrajectoryRow};

/// A sink for simulation output.
///
/// All methods are infallible from the observer's perspective: errors are
/// stored and retrieved with
/// [`SimOutputObserver::take_error`][crate::SimOutputObserver::take_error].
pub trait OutputWriter {
    /// Write one snapshot's worth of agent rows.
    fn write_trajectories(&mut self, rows: &[TrajectoryRow]) -> OutputResult<()>;

    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent, safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
