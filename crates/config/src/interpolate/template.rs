use super::command::{CommandError, CommandExecutor};
use crate::environment::Environment;
use crate::error::{ConfigurationError, Result};

/// Resolve every variable and command reference in `input`, left to right.
///
/// `path` is the dotted document location, used only for error context.
/// Captured command output is inserted verbatim and never re-scanned.
pub(crate) fn resolve(
    input: &str,
    path: &str,
    env: &Environment,
    executor: &dyn CommandExecutor,
) -> Result<String> {
    if !input.contains('$') {
        return Ok(input.to_owned());
    }

    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find('$') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        let bytes = tail.as_bytes();
        let consumed = match bytes.get(1) {
            // `$$` escapes a literal dollar.
            Some(&b'$') => {
                out.push('$');
                2
            }
            // `$(( command ))` captures the stdout of a shell command.
            Some(&b'(') if bytes.get(2) == Some(&b'(') => {
                let Some(end) = tail[3..].find("))") else {
                    return Err(invalid(path, tail));
                };
                let command = &tail[3..3 + end];
                match executor.run(command) {
                    Ok(text) => out.push_str(&text),
                    Err(CommandError::Unavailable(message)) => {
                        return Err(ConfigurationError::ShellUnavailable {
                            path: path.to_owned(),
                            command: command.to_owned(),
                            message,
                        });
                    }
                    Err(CommandError::Failed(message)) => {
                        return Err(ConfigurationError::Command {
                            path: path.to_owned(),
                            command: command.to_owned(),
                            message,
                        });
                    }
                }
                3 + end + 2
            }
            // `${NAME}` and its modifier forms.
            Some(&b'{') => {
                let Some(close) = tail[2..].find('}') else {
                    return Err(invalid(path, tail));
                };
                let body = &tail[2..2 + close];
                let reference = &tail[..2 + close + 1];
                out.push_str(&resolve_braced(body, reference, path, env)?);
                2 + close + 1
            }
            // `$NAME`, where a name is `[A-Za-z_][A-Za-z0-9_]*`.
            Some(&c) if c == b'_' || c.is_ascii_alphabetic() => {
                let len = tail[1..]
                    .find(|ch: char| !(ch.is_ascii_alphanumeric() || ch == '_'))
                    .unwrap_or(tail.len() - 1);
                out.push_str(env.get(&tail[1..1 + len]).unwrap_or_default());
                1 + len
            }
            // A lone `$`, or `$` before a digit or punctuation, is never a
            // valid reference; reject it rather than ship a literal `$`.
            _ => return Err(invalid(path, tail)),
        };
        rest = &tail[consumed..];
    }
    out.push_str(rest);
    Ok(out)
}

/// Resolve the body of a `${...}` reference.
///
/// Supported forms: `NAME`, `NAME:-default` (unset or empty falls back),
/// `NAME:?message` (unset or empty is fatal). Anything else is rejected
/// so a stale placeholder can never reach a container spec.
fn resolve_braced(
    body: &str,
    reference: &str,
    path: &str,
    env: &Environment,
) -> Result<String> {
    let name_end = body
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(body.len());
    let (name, modifier) = body.split_at(name_end);
    if name.is_empty() || name.as_bytes()[0].is_ascii_digit() {
        return Err(invalid(path, reference));
    }

    if modifier.is_empty() {
        return Ok(env.get(name).unwrap_or_default().to_owned());
    }
    if let Some(default) = modifier.strip_prefix(":-") {
        return Ok(match env.get(name) {
            Some(value) if !value.is_empty() => value.to_owned(),
            _ => default.to_owned(),
        });
    }
    if let Some(message) = modifier.strip_prefix(":?") {
        return match env.get(name) {
            Some(value) if !value.is_empty() => Ok(value.to_owned()),
            _ => Err(ConfigurationError::MissingVariable {
                path: path.to_owned(),
                name: name.to_owned(),
                message: if message.is_empty() {
                    "variable is required".to_owned()
                } else {
                    message.to_owned()
                },
            }),
        };
    }
    Err(invalid(path, reference))
}

fn invalid(path: &str, reference: &str) -> ConfigurationError {
    ConfigurationError::InvalidReference {
        path: path.to_owned(),
        reference: reference.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Fails the test if the tree walk reaches for the shell on a
    /// variable-only string.
    struct NoCommands;

    impl CommandExecutor for NoCommands {
        fn run(&self, command: &str) -> std::result::Result<String, CommandError> {
            panic!("unexpected command substitution: {command}");
        }
    }

    /// Echoes the command text back, uppercased, to make substitution
    /// visible in assertions.
    struct Upper;

    impl CommandExecutor for Upper {
        fn run(&self, command: &str) -> std::result::Result<String, CommandError> {
            Ok(command.to_uppercase())
        }
    }

    struct Broken;

    impl CommandExecutor for Broken {
        fn run(&self, _command: &str) -> std::result::Result<String, CommandError> {
            Err(CommandError::Failed("exit status: 127".to_owned()))
        }
    }

    struct NoShell;

    impl CommandExecutor for NoShell {
        fn run(&self, _command: &str) -> std::result::Result<String, CommandError> {
            Err(CommandError::Unavailable("no POSIX shell".to_owned()))
        }
    }

    fn env() -> Environment {
        Environment::from_vars([("USER", "jenny"), ("FOO", "bar"), ("EMPTY", "")])
    }

    fn run(input: &str) -> Result<String> {
        resolve(input, "service.a.image", &env(), &NoCommands)
    }

    #[test]
    fn plain_strings_pass_through() {
        assert_eq!(run("nginx:alpine").expect("resolve"), "nginx:alpine");
        assert_eq!(run("").expect("resolve"), "");
    }

    #[test]
    fn bare_and_braced_forms_resolve_identically() {
        assert_eq!(run("$FOO").expect("resolve"), "bar");
        assert_eq!(run("${FOO}").expect("resolve"), "bar");
    }

    #[test]
    fn unset_variable_resolves_to_empty_string() {
        assert_eq!(run("a${NOPE}b").expect("resolve"), "ab");
        assert_eq!(run("a$NOPE-b").expect("resolve"), "a-b");
    }

    #[test]
    fn bare_name_stops_at_non_name_character() {
        assert_eq!(run("$FOO:/target").expect("resolve"), "bar:/target");
        assert_eq!(run("example:$USER").expect("resolve"), "example:jenny");
    }

    #[test]
    fn multiple_references_in_one_string() {
        assert_eq!(run("${USER}@${FOO}:$USER").expect("resolve"), "jenny@bar:jenny");
    }

    #[test]
    fn double_dollar_escapes() {
        assert_eq!(run("pa$$word").expect("resolve"), "pa$word");
        // The escaped dollar is not re-scanned.
        assert_eq!(run("$$FOO").expect("resolve"), "$FOO");
    }

    #[test]
    fn default_modifier() {
        assert_eq!(run("${NOPE:-fallback}").expect("resolve"), "fallback");
        assert_eq!(run("${FOO:-fallback}").expect("resolve"), "bar");
        // Empty counts as unset for the `:` forms.
        assert_eq!(run("${EMPTY:-fallback}").expect("resolve"), "fallback");
        assert_eq!(run("${NOPE:-}").expect("resolve"), "");
    }

    #[test]
    fn required_modifier() {
        assert_eq!(run("${FOO:?must be set}").expect("resolve"), "bar");
        let err = run("${NOPE:?db name is required}").unwrap_err();
        match err {
            ConfigurationError::MissingVariable { path, name, message } => {
                assert_eq!(path, "service.a.image");
                assert_eq!(name, "NOPE");
                assert_eq!(message, "db name is required");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn required_modifier_with_empty_message() {
        let err = run("${NOPE:?}").unwrap_err();
        assert!(err.to_string().contains("required"), "got: {err}");
    }

    #[test]
    fn malformed_references_are_rejected() {
        for input in ["${FOO", "${}", "${1BAD}", "${FOO:+x}", "${FOO.bar}", "$1", "$ ", "100$"] {
            let err = run(input).unwrap_err();
            assert!(
                matches!(err, ConfigurationError::InvalidReference { .. }),
                "{input}: unexpected error {err:?}"
            );
        }
    }

    #[test]
    fn command_reference_substitutes_captured_output() {
        let out = resolve("image:$((echo foo))", "p", &env(), &Upper).expect("resolve");
        assert_eq!(out, "image:ECHO FOO");
    }

    #[test]
    fn command_output_is_not_rescanned() {
        // $FOO survives in the output because captured text is literal.
        let out = resolve("$(($foo))", "p", &env(), &Upper).expect("resolve");
        assert_eq!(out, "$FOO");
    }

    #[test]
    fn unterminated_command_reference_is_rejected() {
        let err = resolve("$((echo foo", "p", &env(), &Upper).unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidReference { .. }));
    }

    #[test]
    fn failed_command_carries_path_and_command() {
        let err = resolve("$((this is a bad command))", "service.a.user", &env(), &Broken)
            .unwrap_err();
        match err {
            ConfigurationError::Command { path, command, .. } => {
                assert_eq!(path, "service.a.user");
                assert_eq!(command, "this is a bad command");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_shell_is_its_own_error() {
        let err = resolve("$((echo hi))", "p", &env(), &NoShell).unwrap_err();
        assert!(matches!(err, ConfigurationError::ShellUnavailable { .. }));
    }
}
