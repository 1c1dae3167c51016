//! `cs-core` — foundational types for the `crowdsim` pedestrian simulator.
//!
//! This crate is a dependency of every other `cs-*` crate.  It intentionally
//! has no `cs-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `StateId`, `GoalId`                        |
//! | [`geo`]         | `Vec2` (simulation plane), `Vec3` (host-facing xz)    |
//! | [`time`]        | `Tick`, `SimClock`, `SimConfig`                       |
//! | [`rng`]         | `SimRng` (seeded, deterministic)                      |
//! | [`error`]       | `CsError`, `CsResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |
//!           | Required by `cs-fsm` to read `SimConfig` from JSON.        |

pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CsError, CsResult};
pub use geo::{Vec2, Vec3};
pub use ids::{AgentId, GoalId, StateId};
pub use rng::SimRng;
pub use time::{SimClock, SimConfig, Tick};
