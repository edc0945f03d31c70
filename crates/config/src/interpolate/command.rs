/// Failure of a command substitution, before document context is attached.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandError {
    /// The platform has no POSIX shell, or the shell could not be started.
    Unavailable(String),
    /// The command ran and exited non-zero, or its output is not text.
    Failed(String),
}

/// Executes the command text of a `$(( ... ))` reference.
///
/// The interpolator takes this as an injected port so the tree walk stays
/// testable without spawning real processes.
pub trait CommandExecutor: Send + Sync {
    fn run(&self, command: &str) -> Result<String, CommandError>;
}

/// Runs command text with `/bin/sh -c`, blocking until completion.
///
/// There is deliberately no timeout: a hung command hangs interpolation
/// rather than silently changing behavior. Unsupported outside unix.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellExecutor;

#[cfg(unix)]
impl CommandExecutor for ShellExecutor {
    fn run(&self, command: &str) -> Result<String, CommandError> {
        tracing::debug!(command, "running command substitution");
        let output = std::process::Command::new("/bin/sh")
            .arg("-c")
            .arg(command)
            .output()
            .map_err(|e| CommandError::Unavailable(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CommandError::Failed(format!(
                "{}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let mut stdout = String::from_utf8(output.stdout)
            .map_err(|_| CommandError::Failed("output is not valid UTF-8".to_owned()))?;
        // Strip a single trailing newline, the way shells do for captures.
        if stdout.ends_with('\n') {
            stdout.pop();
            if stdout.ends_with('\r') {
                stdout.pop();
            }
        }
        Ok(stdout)
    }
}

#[cfg(not(unix))]
impl CommandExecutor for ShellExecutor {
    fn run(&self, _command: &str) -> Result<String, CommandError> {
        Err(CommandError::Unavailable(
            "command substitution requires a POSIX shell".to_owned(),
        ))
    }
}
