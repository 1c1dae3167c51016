//! `cs-output` — simulation output writers for crowdsim.
//!
//! | Backend | Files created                                        |
//! |---------|------------------------------------------------------|
//! | CSV     | `agent_trajectories.csv`, `tick_summaries.csv`       |
//!
//! Backends implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `cs_sim::SimObserver`.
//! Trajectories get one row per agent per snapshot; snapshot frequency is
//! `SimConfig::output_interval_ticks`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use cs_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer);
//! sim.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use crate::csv::{CsvWriter, SUMMARY_FILE, TRAJECTORY_FILE};
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{TickSummaryRow, TrajectoryRow};
pub use writer::OutputWriter;
