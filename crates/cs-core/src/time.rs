//! Simulation time model.
//!
//! # Design
//!
//! Time is represented as a monotonically increasing `Tick` counter.  The
//! mapping to simulated seconds is held in `SimClock`:
//!
//!   elapsed_secs = tick * time_step
//!
//! The time step is a float (pedestrian models integrate in seconds) but the
//! canonical ordering is always the integer tick, so comparisons are exact.
//! The time step may be changed between ticks by the host; elapsed time is
//! accumulated rather than recomputed so a change does not rewrite history.

use std::fmt;

use crate::{CsError, CsResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Tracks the current tick and the simulated seconds elapsed so far.
///
/// `SimClock` is cheap to copy and intentionally holds no heap data.
#[derive(Clone, Debug)]
pub struct SimClock {
    /// Seconds of simulated time per tick.
    pub time_step: f32,
    /// The current tick, advanced by `SimClock::advance()` each iteration.
    pub current_tick: Tick,
    elapsed_secs: f64,
}

impl SimClock {
    pub fn new(time_step: f32) -> Self {
        Self {
            time_step,
            current_tick: Tick::ZERO,
            elapsed_secs: 0.0,
        }
    }

    /// Advance the clock by one tick of the current time step.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
        self.elapsed_secs += self.time_step as f64;
    }

    /// Simulated seconds since tick 0.
    #[inline]
    pub fn elapsed_secs(&self) -> f32 {
        self.elapsed_secs as f32
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.2} s)", self.current_tick, self.elapsed_secs)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Loaded from the `config` section of a behavior file; every field has a
/// default so the section may be partial or absent.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct SimConfig {
    /// Seconds of simulated time per tick.  Default: 0.1.
    pub time_step: f32,

    /// Upper bound on ticks simulated.  The run also ends early once every
    /// agent sits in a final state.
    pub total_ticks: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Worker thread count passed to Rayon.  `None` uses all logical cores.
    pub num_threads: Option<usize>,

    /// Emit a snapshot every N ticks.  0 disables snapshots.
    pub output_interval_ticks: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            time_step:             0.1,
            total_ticks:           10_000,
            seed:                  42,
            num_threads:           None,
            output_interval_ticks: 1,
        }
    }
}

impl SimConfig {
    /// The tick at which the simulation ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.time_step)
    }

    /// Reject configurations the tick loop cannot honour.
    pub fn validate(&self) -> CsResult<()> {
        if !(self.time_step.is_finite() && self.time_step > 0.0) {
            return Err(CsError::Config(format!(
                "time_step must be positive and finite, got {}",
                self.time_step
            )));
        }
        if self.num_threads == Some(0) {
            return Err(CsError::Config("num_threads must be at least 1".into()));
        }
        Ok(())
    }
}
