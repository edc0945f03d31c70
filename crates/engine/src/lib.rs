#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

mod client;
mod cluster;
mod error;
mod names;

pub use client::{EngineVersion, HttpEngineClient, VersionInfo};
pub use cluster::ClusterMode;
pub use error::{EngineError, Result};
pub use names::name_without_host;
