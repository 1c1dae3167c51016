//! `cs-task` — the per-step task engine.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                          |
//! |-------------|-------------------------------------------------------------------|
//! | [`task`]    | `Task` trait (`do_work`, `Display`, `is_equivalent`)              |
//! | [`context`] | `TaskContext<'a>` — mutable view of FSM state handed to tasks     |
//! | [`list`]    | `TaskList`, `TaskReport` — ordered, deduplicating scheduler       |
//! | [`catalog`] | `TaskFactory` trait, `TaskCatalog` (task type name → factory)     |
//! | [`error`]   | `TaskError`, `FatalTaskError`, `TaskBuildError`                   |
//!
//! # Execution model
//!
//! Once per tick, after the FSM has advanced every agent, the task list runs
//! each task exactly once in insertion order on the simulation thread:
//!
//! ```text
//! for task in list:
//!     Ok                        → counted as succeeded
//!     Err(Recoverable(msg))     → logged, recorded, next task runs
//!     Err(Fatal(msg))           → logged, remaining tasks skipped,
//!                                 FatalTaskError returned to the driver
//! ```
//!
//! A recoverable failure is retried simply by running the task again next
//! tick.  Deduplication happens only at insertion time: `TaskList::add`
//! discards a task equivalent to one already present.

pub mod catalog;
pub mod context;
pub mod error;
pub mod list;
pub mod task;

#[cfg(test)]
mod tests;

pub use catalog::{TaskCatalog, TaskFactory};
pub use context::TaskContext;
pub use error::{FatalTaskError, RecoveredFailure, TaskBuildError, TaskError, TaskResult};
pub use list::{TaskList, TaskReport};
pub use task::Task;
