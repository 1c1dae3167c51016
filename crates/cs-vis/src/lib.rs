//! `cs-vis` — goal visualization without a graphics back end.
//!
//! Renderers turn a [`Goal`][cs_fsm::Goal] into a list of [`DrawCommand`]s
//! in world space (ground plane mapped onto `xz`).  A host viewer replays the
//! commands with whatever graphics API it uses.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                     |
//! |--------------|--------------------------------------------------------------|
//! | [`draw`]     | `DrawCommand`, `Color`                                       |
//! | [`renderer`] | `GoalRenderer` trait and the built-in renderers              |
//! | [`db`]       | `GoalRendererKind`, `GoalRendererDb`, `draw_goals`           |
//!
//! # Built-in bindings
//!
//! | Goal kind | Renderer          |
//! |-----------|-------------------|
//! | `point`   | `PointRenderer`   |
//! | `circle`  | `CircleRenderer`  |
//! | `aabb`    | `AabbRenderer`    |
//! | anything else | `MarkerRenderer` (default, with a warning) |

pub mod db;
pub mod draw;
pub mod renderer;

#[cfg(test)]
mod tests;

pub use db::{GoalRendererDb, GoalRendererKind, draw_goals};
pub use draw::{Color, DrawCommand};
pub use renderer::{AabbRenderer, CircleRenderer, GoalRenderer, MarkerRenderer, PointRenderer};
