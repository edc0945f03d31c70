use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{ConfigurationError, Result};

/// The name → value bindings available for substitution.
///
/// Assembled once per configuration load from an optional env file plus
/// the process environment, then shared read-only for the duration of
/// interpolation. Never mutated after construction; lookups are
/// case-sensitive and iteration order is deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
    vars: BTreeMap<String, String>,
}

impl Environment {
    /// Build an environment from an optional `KEY=VALUE` file overlaid
    /// with the process environment. Process variables win on collision.
    ///
    /// File values are taken verbatim: no quoting rules, no inline
    /// comments, no expansion. Blank lines and lines starting with `#`
    /// are skipped; any other line without `=` is an error, so typos
    /// surface at load time instead of silently dropping a binding.
    /// A `None` path or a nonexistent file starts from an empty map.
    pub fn from_env_file(path: Option<&Path>) -> Result<Self> {
        let mut vars = BTreeMap::new();

        if let Some(path) = path
            && path.exists()
        {
            let text = std::fs::read_to_string(path).map_err(|e| ConfigurationError::EnvFile {
                file: path.display().to_string(),
                message: e.to_string(),
            })?;
            for (idx, raw) in text.lines().enumerate() {
                let line = raw.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }
                let Some((key, value)) = line.split_once('=') else {
                    return Err(ConfigurationError::EnvFileLine {
                        file: path.display().to_string(),
                        line: idx + 1,
                        text: line.to_owned(),
                    });
                };
                vars.insert(key.to_owned(), value.to_owned());
            }
            tracing::debug!(file = %path.display(), count = vars.len(), "loaded env file");
        }

        for (key, value) in std::env::vars() {
            vars.insert(key, value);
        }

        Ok(Self { vars })
    }

    /// Build an environment from explicit pairs, without reading the
    /// process environment. Used by embedders and test fixtures.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self { vars: vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }

    /// Exact, case-sensitive lookup.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Lookup with a default for unset names.
    pub fn get_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.get(name).unwrap_or(default)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}
