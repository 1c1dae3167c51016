//! `TaskList` — ordered owner of tasks and the unit of per-tick failure
//! isolation.

use crate::{FatalTaskError, RecoveredFailure, Task, TaskContext, TaskError};

/// Outcome of one non-fatal pass over a [`TaskList`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskReport {
    /// Tasks whose `do_work` returned `Ok`.
    pub succeeded: usize,
    /// Tasks that failed recoverably this tick, in execution order.
    pub recovered: Vec<RecoveredFailure>,
}

impl TaskReport {
    /// Total tasks that ran this tick.
    pub fn executed(&self) -> usize {
        self.succeeded + self.recovered.len()
    }

    /// `true` if no task failed.
    pub fn is_clean(&self) -> bool {
        self.recovered.is_empty()
    }
}

/// Ordered collection of [`Task`]s executed once per tick.
///
/// Insertion order is execution order.  Equivalent tasks are rejected at
/// insertion time, so behavior files and plugins may each request the same
/// task without doubling the work.
#[derive(Default)]
pub struct TaskList {
    tasks: Vec<Box<dyn Task>>,
}

impl TaskList {
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    /// Append `task` unless an equivalent task is already present.
    ///
    /// Returns `false` (and drops `task`) for a duplicate.  This is expected,
    /// idempotent behavior, not an error.
    pub fn add(&mut self, task: Box<dyn Task>) -> bool {
        if let Some(existing) = self.tasks.iter().find(|t| t.is_equivalent(task.as_ref())) {
            log::debug!("task {task} is equivalent to queued task {existing}; discarding");
            return false;
        }
        log::debug!("task {task} queued at position {}", self.tasks.len());
        self.tasks.push(task);
        true
    }

    /// Run every task once, in insertion order.
    ///
    /// Recoverable failures are logged and collected in the report.  The
    /// first fatal failure aborts the pass; tasks after it do not run this
    /// tick.
    pub fn run_all(&mut self, ctx: &mut TaskContext<'_>) -> Result<TaskReport, FatalTaskError> {
        let mut report = TaskReport::default();

        for (index, task) in self.tasks.iter_mut().enumerate() {
            match task.do_work(ctx) {
                Ok(()) => report.succeeded += 1,

                Err(TaskError::Recoverable(message)) => {
                    log::warn!("{}: task {task} skipped this tick: {message}", ctx.tick);
                    report.recovered.push(RecoveredFailure {
                        index,
                        task: task.to_string(),
                        message,
                    });
                }

                Err(TaskError::Fatal(message)) => {
                    log::error!("{}: task {task} failed fatally: {message}", ctx.tick);
                    return Err(FatalTaskError {
                        index,
                        task: task.to_string(),
                        message,
                        completed: report.executed(),
                    });
                }
            }
        }

        Ok(report)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Tasks in execution order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Task> + '_ {
        self.tasks.iter().map(|t| t.as_ref())
    }

    /// First task of concrete type `T`, if any.
    pub fn find<T: Task>(&self) -> Option<&T> {
        self.tasks.iter().find_map(|t| t.as_any().downcast_ref::<T>())
    }

    /// `Display` descriptions of all tasks, in execution order.
    pub fn descriptions(&self) -> Vec<String> {
        self.tasks.iter().map(|t| t.to_string()).collect()
    }
}
