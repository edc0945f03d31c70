#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

mod environment;
mod error;
mod interpolate;
mod section;

pub use environment::Environment;
pub use error::{ConfigurationError, Result};
pub use interpolate::{CommandError, CommandExecutor, Interpolator, ShellExecutor};
pub use section::SectionKind;

// The document node types, re-exported so callers name a single crate.
pub use serde_yaml::{Mapping, Value};

/// Interpolate one top-level configuration section with the real shell
/// executor.
///
/// Called once per section (`services`, `volumes`, `networks`) with that
/// section's subtree and kind tag. The returned mapping is a fully new
/// tree; on error the caller must discard the attempt. Do not feed an
/// already interpolated document back in: substituted text that happens
/// to contain `$` sequences would be scanned again.
pub fn interpolate_environment_variables(
    document: &Mapping,
    kind: SectionKind,
    env: &Environment,
) -> Result<Mapping> {
    Interpolator::new(kind, env, &ShellExecutor).interpolate(document)
}
