use thiserror::Error;

#[derive(Debug, Error)]
pub enum PluginError {
    #[error("plugin {plugin:?} failed to register: {reason}")]
    Registration { plugin: String, reason: String },

    #[error("required plugins not loaded: {}", .0.join(", "))]
    MissingRequired(Vec<String>),

    #[error("plugin manifest {path}: {source}")]
    Manifest {
        path:   String,
        #[source]
        source: std::io::Error,
    },
}

pub type PluginResult<T> = Result<T, PluginError>;
