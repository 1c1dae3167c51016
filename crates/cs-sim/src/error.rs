use cs_core::Tick;
use cs_fsm::FsmError;
use cs_plugin::PluginError;
use cs_task::FatalTaskError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Fsm(FsmError),

    #[error(transparent)]
    Plugin(#[from] PluginError),

    #[error("simulation halted: {0}")]
    TaskFatal(FatalTaskError),

    #[error("simulation already halted by an earlier failure")]
    Halted,

    #[error("simulation finished at {0}")]
    Finished(Tick),
}

impl From<FsmError> for SimError {
    fn from(e: FsmError) -> Self {
        match e {
            FsmError::TaskFatal(fatal) => SimError::TaskFatal(fatal),
            other => SimError::Fsm(other),
        }
    }
}

pub type SimResult<T> = Result<T, SimError>;
