/// Errors raised while assembling an environment or interpolating a
/// configuration document.
///
/// Interpolation is a pure transform on static configuration, so every
/// variant reflects an authoring mistake and is fail-fast: no retries, no
/// fallback values.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigurationError {
    /// The environment file exists but could not be read.
    #[error("{file}: {message}")]
    EnvFile { file: String, message: String },
    /// A line in the environment file that is not an assignment, a blank
    /// line, or a `#` comment.
    #[error("{file}:{line}: not a KEY=VALUE assignment: '{text}'")]
    EnvFileLine { file: String, line: usize, text: String },
    /// A `$...` span that is not a recognized reference form.
    #[error("{path}: invalid interpolation reference '{reference}'")]
    InvalidReference { path: String, reference: String },
    /// A `${NAME:?message}` reference whose variable is unset or empty.
    #[error("{path}: required variable '{name}' is missing: {message}")]
    MissingVariable { path: String, name: String, message: String },
    /// A command substitution whose command ran and failed, or produced
    /// output that is not text.
    #[error("{path}: command substitution '{command}' failed: {message}")]
    Command { path: String, command: String, message: String },
    /// A command substitution on a platform without a usable POSIX shell.
    #[error("{path}: cannot run command substitution '{command}': {message}")]
    ShellUnavailable { path: String, command: String, message: String },
}

pub type Result<T> = std::result::Result<T, ConfigurationError>;
