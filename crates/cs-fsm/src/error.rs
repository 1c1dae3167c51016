use cs_core::CsError;
use cs_task::{FatalTaskError, TaskBuildError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FsmError {
    #[error("behavior specification error: {0}")]
    Behavior(String),

    #[error("unknown state {0:?}")]
    UnknownState(String),

    #[error("unknown goal {0:?}")]
    UnknownGoal(String),

    #[error("unknown pedestrian model {0:?}")]
    UnknownModel(String),

    #[error("{what} length {got} does not match agent count {expected}")]
    AgentCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error(transparent)]
    Core(#[from] CsError),

    #[error("task construction failed: {0}")]
    TaskBuild(#[from] TaskBuildError),

    #[error("simulation halted: {0}")]
    TaskFatal(#[from] FatalTaskError),

    #[error("behavior JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("scene CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type FsmResult<T> = Result<T, FsmError>;
