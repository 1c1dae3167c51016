//! `cs-agent` — Structure-of-Arrays pedestrian storage for `crowdsim`.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`store`]       | `AgentStore` (SoA arrays, stable `AgentId` indexing)      |
//! | [`builder`]     | `AgentSpec`, `AgentStoreBuilder` (fluent construction)    |
//! | [`spatial`]     | `NeighborIndex` — R-tree radius queries over positions    |
//!
//! The agent count is fixed once the store is built.  Every per-agent `Vec`
//! has exactly `count` elements and `AgentId(i)` addresses element `i` of all
//! of them for the whole run.

pub mod builder;
pub mod spatial;
pub mod store;


pub use builder::{AgentSpec, AgentStoreBuilder};
pub use spatial::NeighborIndex;
pub use store::AgentStore;
