use thiserror::Error;

/// Failure signalled by a single [`Task::do_work`][crate::Task::do_work] call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TaskError {
    /// This tick's contribution is skipped; the simulation continues and the
    /// task runs again next tick.
    #[error("recoverable task error: {0}")]
    Recoverable(String),

    /// Continuing would be unsafe or meaningless; the driver must stop.
    #[error("fatal task error: {0}")]
    Fatal(String),
}

impl TaskError {
    pub fn recoverable(msg: impl Into<String>) -> Self {
        TaskError::Recoverable(msg.into())
    }

    pub fn fatal(msg: impl Into<String>) -> Self {
        TaskError::Fatal(msg.into())
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, TaskError::Fatal(_))
    }
}

pub type TaskResult<T> = Result<T, TaskError>;

/// A recoverable failure recorded by [`TaskList::run_all`][crate::TaskList::run_all].
#[derive(Debug, Clone, PartialEq)]
pub struct RecoveredFailure {
    /// Position of the task in the list.
    pub index:   usize,
    /// The task's `Display` description.
    pub task:    String,
    pub message: String,
}

/// A fatal failure that cut a task pass short.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("task #{index} ({task}) failed fatally: {message}")]
pub struct FatalTaskError {
    /// Position of the failing task in the list.
    pub index:     usize,
    /// The task's `Display` description.
    pub task:      String,
    pub message:   String,
    /// Tasks that ran (successfully or recoverably) before the failure.
    pub completed: usize,
}

/// Errors raised while constructing a task from a declarative description.
#[derive(Debug, Error)]
pub enum TaskBuildError {
    #[error("unknown task type {0:?}")]
    UnknownType(String),

    #[error("invalid parameters for task {task_type:?}: {reason}")]
    InvalidParams {
        task_type: String,
        reason:    String,
    },

    #[error("task parameter JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
