use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

const VERSION_TIMEOUT: Duration = Duration::from_secs(5);

/// Subset of the engine's `GET /version` response this crate inspects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionInfo {
    #[serde(rename = "Version")]
    pub version: String,
    #[serde(rename = "ApiVersion", default)]
    pub api_version: Option<String>,
    #[serde(rename = "Os", default)]
    pub os: Option<String>,
    #[serde(rename = "Arch", default)]
    pub arch: Option<String>,
}

/// Port for the engine version query.
///
/// `ClusterMode` holds one of these; tests inject counting fakes so no
/// engine is needed to exercise the cache.
pub trait EngineVersion: Send + Sync {
    fn version(&self) -> Result<VersionInfo>;
}

/// Blocking HTTP client for an engine API reachable over TCP.
pub struct HttpEngineClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl HttpEngineClient {
    /// `base_url` is the API root without a trailing slash, e.g.
    /// `http://127.0.0.1:2375`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = reqwest::blocking::Client::builder()
            .timeout(VERSION_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self { http, base_url: base_url.into() }
    }
}

impl EngineVersion for HttpEngineClient {
    fn version(&self) -> Result<VersionInfo> {
        self.http
            .get(format!("{}/version", self.base_url))
            .send()
            .map_err(map_err)?
            .error_for_status()
            .map_err(map_err)?
            .json()
            .map_err(|e| EngineError::Protocol(e.to_string()))
    }
}

fn map_err(e: reqwest::Error) -> EngineError {
    EngineError::Unreachable(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_info_decodes_engine_casing() {
        let json = r#"{"Version": "swarm/1.2.8", "ApiVersion": "1.22", "Os": "linux"}"#;
        let info: VersionInfo = serde_json::from_str(json).expect("decode");
        assert_eq!(info.version, "swarm/1.2.8");
        assert_eq!(info.api_version.as_deref(), Some("1.22"));
        assert_eq!(info.os.as_deref(), Some("linux"));
        assert_eq!(info.arch, None);
    }
}
