//! `cs-sim` — the simulation facade for host applications.
//!
//! # Host API
//!
//! ```text
//! init(behavior, scene, model, plugin_path) → Simulator | None
//! step()                → bool (false once finished or halted)
//! set_time_step(dt)
//! agent_count()
//! agent_position(i)     → Option<Vec3>   (ground plane mapped onto xz)
//! agent_velocity(i)     → Option<Vec3>
//! agent_orientation(i)  → Option<Vec2>
//! agent_class(i)        → Option<u32>
//! agent_radius(i)       → Option<f32>
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the velocity phase on Rayon's thread pool.        |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use cs_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new("behavior.json", "scene.csv", "direct")
//!     .plugin_path("plugins")
//!     .linked_plugins()
//!     .build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;


pub use builder::{SimBuilder, linked_plugins};
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::Simulator;
