mod command;
mod template;

use std::borrow::Cow;

use serde_yaml::{Mapping, Value};

pub use command::{CommandError, CommandExecutor, ShellExecutor};

use crate::environment::Environment;
use crate::error::Result;
use crate::section::SectionKind;

/// Resolves variable and command references in one top-level
/// configuration section.
///
/// The walk is depth-first and builds a fully new tree: the input is
/// never mutated, so on error no partially substituted document can
/// escape. Interpolation is not idempotent (substituted values that
/// themselves contain `$` sequences would be re-scanned), so a document
/// must be interpolated exactly once.
pub struct Interpolator<'a> {
    kind: SectionKind,
    env: &'a Environment,
    executor: &'a dyn CommandExecutor,
}

impl<'a> Interpolator<'a> {
    pub fn new(
        kind: SectionKind,
        env: &'a Environment,
        executor: &'a dyn CommandExecutor,
    ) -> Self {
        Self { kind, env, executor }
    }

    /// Interpolate every string value under `document`, applying the
    /// empty-shorthand normalization to its top-level entries.
    pub fn interpolate(&self, document: &Mapping) -> Result<Mapping> {
        let mut out = Mapping::with_capacity(document.len());
        for (name, body) in document {
            let path = format!("{}.{}", self.kind, key_display(name));
            let value = if body.is_null() && self.kind.allows_empty_shorthand() {
                // `other:` with no body means "use defaults".
                Value::Mapping(Mapping::new())
            } else {
                self.value(&path, body)?
            };
            out.insert(name.clone(), value);
        }
        Ok(out)
    }

    fn value(&self, path: &str, value: &Value) -> Result<Value> {
        match value {
            Value::String(s) => {
                template::resolve(s, path, self.env, self.executor).map(Value::String)
            }
            Value::Mapping(map) => {
                let mut out = Mapping::with_capacity(map.len());
                for (key, val) in map {
                    let child = format!("{path}.{}", key_display(key));
                    out.insert(key.clone(), self.value(&child, val)?);
                }
                Ok(Value::Mapping(out))
            }
            Value::Sequence(seq) => {
                let mut out = Vec::with_capacity(seq.len());
                for (i, val) in seq.iter().enumerate() {
                    out.push(self.value(&format!("{path}[{i}]"), val)?);
                }
                Ok(Value::Sequence(out))
            }
            // Numbers, booleans, nested nulls, and tagged values pass
            // through untouched; interpolation never coerces types.
            other => Ok(other.clone()),
        }
    }
}

/// Mapping keys are almost always strings; render the odd non-string key
/// for error paths without failing the walk over it.
fn key_display(key: &Value) -> Cow<'_, str> {
    match key {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        other => match serde_yaml::to_string(other) {
            Ok(rendered) => Cow::Owned(rendered.trim_end().to_owned()),
            Err(_) => Cow::Borrowed("?"),
        },
    }
}
