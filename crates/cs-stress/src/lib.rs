//! `cs-stress` — stress propagation, the reference plugin.
//!
//! Agents close to each other grow stressed; stress fades without contact.
//! See [`task`] for the exact law.
//!
//! | Module      | Contents                                       |
//! |-------------|------------------------------------------------|
//! | [`task`]    | `StressTask`                                   |
//! | [`factory`] | `StressTaskFactory` (task type `"stress"`)     |
//! | [`plugin`]  | `StressPlugin`, `StressZoneRenderer`           |

pub mod factory;
pub mod plugin;
pub mod task;

#[cfg(test)]
mod tests;

pub use factory::{STRESS_TASK_TYPE, StressTaskFactory};
pub use plugin::{STRESS_ZONE_KIND, StressPlugin, StressZoneRenderer};
pub use task::StressTask;
