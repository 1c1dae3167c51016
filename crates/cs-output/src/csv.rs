//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `agent_trajectories.csv`
//! - `tick_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{OutputResult, TickSummaryRow, TrajectoryRow};

pub const TRAJECTORY_FILE: &str = "agent_trajectories.csv";
pub const SUMMARY_FILE: &str = "tick_summaries.csv";

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    trajectories: Writer<File>,
    summaries:    Writer<File>,
    finished:     bool,
}

impl CsvWriter {
    /// Create the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut trajectories = Writer::from_path(dir.join(TRAJECTORY_FILE))?;
        trajectories.write_record(["agent_id", "tick", "time_secs", "x", "y", "vx", "vy", "state", "class"])?;

        let mut summaries = Writer::from_path(dir.join(SUMMARY_FILE))?;
        summaries.write_record(["tick", "time_secs", "transitions", "tasks_ok", "tasks_recovered"])?;

        log::debug!("writing CSV output to {}", dir.display());
        Ok(Self { trajectories, summaries, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_trajectories(&mut self, rows: &[TrajectoryRow]) -> OutputResult<()> {
        for row in rows {
            self.trajectories.write_record(&[
                row.agent_id.to_string(),
                row.tick.to_string(),
                row.time_secs.to_string(),
                row.x.to_string(),
                row.y.to_string(),
                row.vx.to_string(),
                row.vy.to_string(),
                row.state.clone(),
                row.class_id.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.time_secs.to_string(),
            row.transitions.to_string(),
            row.tasks_ok.to_string(),
            row.tasks_recovered.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.trajectories.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
