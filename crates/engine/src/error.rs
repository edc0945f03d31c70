/// Errors from the container-engine boundary.
#[derive(Debug, Clone, thiserror::Error)]
pub enum EngineError {
    /// The engine API could not be reached or returned a failure status.
    #[error("engine unreachable: {0}")]
    Unreachable(String),
    /// The engine responded with a body this client could not decode.
    #[error("engine protocol error: {0}")]
    Protocol(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
