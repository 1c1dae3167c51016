//! The `Task` trait — the per-step extension point for behavior logic.

use std::any::Any;
use std::fmt;

use crate::{TaskContext, TaskResult};

/// A per-tick behavior mutator.
///
/// Tasks are created once while the FSM (or a plugin) is being set up, owned
/// exclusively by a [`TaskList`][crate::TaskList], and dropped with it.
///
/// # Required methods
///
/// * [`do_work`][Self::do_work] — called once per tick, for the whole run.
///   Must leave internal state consistent whether it succeeds or fails, so a
///   skipped tick never corrupts later ones.
/// * [`Display`][fmt::Display] — a stable, deterministic description used in
///   logs and deduplication diagnostics.
/// * [`is_equivalent`][Self::is_equivalent] — semantic equality.  Two
///   instances of the same kind with the same configuration are equivalent;
///   the same kind with different parameters is not.
/// * [`as_any`][Self::as_any] — enables downcasting in `is_equivalent`,
///   tooling and tests.
///
/// # Example
///
/// ```rust
/// use std::any::Any;
/// use std::fmt;
/// use cs_task::{Task, TaskContext, TaskResult};
///
/// struct Damping { factor: f32 }
///
/// impl fmt::Display for Damping {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         write!(f, "Damping(factor={})", self.factor)
///     }
/// }
///
/// impl Task for Damping {
///     fn do_work(&mut self, ctx: &mut TaskContext<'_>) -> TaskResult<()> {
///         for v in ctx.agents.velocity.iter_mut() {
///             *v = *v * self.factor;
///         }
///         Ok(())
///     }
///
///     fn is_equivalent(&self, other: &dyn Task) -> bool {
///         other
///             .as_any()
///             .downcast_ref::<Damping>()
///             .is_some_and(|o| o.factor == self.factor)
///     }
///
///     fn as_any(&self) -> &dyn Any {
///         self
///     }
/// }
/// ```
pub trait Task: fmt::Display + Send + 'static {
    /// Perform this tick's work against the shared simulation state.
    fn do_work(&mut self, ctx: &mut TaskContext<'_>) -> TaskResult<()>;

    /// `true` iff `other` would do functionally redundant work if both were
    /// in the same list.
    fn is_equivalent(&self, other: &dyn Task) -> bool;

    #[doc(hidden)]
    fn as_any(&self) -> &dyn Any;
}
