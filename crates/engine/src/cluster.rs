use std::sync::{Arc, OnceLock};

use parking_lot::Mutex;

use crate::client::EngineVersion;
use crate::error::Result;

/// Version prefix reported by a clustered engine runtime.
const CLUSTER_VERSION_PREFIX: &str = "swarm/";

/// Process-lifetime cluster-mode flag.
///
/// The first successful call queries the engine once and publishes the
/// result; every later call replays it without touching the engine.
/// Construct one next to the engine client and hand clones to consumers
/// instead of reading ambient global state.
#[derive(Clone)]
pub struct ClusterMode {
    inner: Arc<Inner>,
}

struct Inner {
    client: Arc<dyn EngineVersion>,
    flag: OnceLock<bool>,
    init: Mutex<()>,
}

impl ClusterMode {
    pub fn new(client: Arc<dyn EngineVersion>) -> Self {
        Self { inner: Arc::new(Inner { client, flag: OnceLock::new(), init: Mutex::new(()) }) }
    }

    /// Whether the engine runs in clustered mode.
    ///
    /// Concurrent first calls are serialized: one caller performs the
    /// version query, the rest block on the guard and replay the
    /// published value. A failed query publishes nothing, so the next
    /// call retries.
    pub fn is_cluster_mode(&self) -> Result<bool> {
        if let Some(&flag) = self.inner.flag.get() {
            return Ok(flag);
        }
        let _guard = self.inner.init.lock();
        if let Some(&flag) = self.inner.flag.get() {
            return Ok(flag);
        }
        let info = self.inner.client.version()?;
        let flag = info.version.starts_with(CLUSTER_VERSION_PREFIX);
        tracing::debug!(version = %info.version, cluster = flag, "detected engine mode");
        let _ = self.inner.flag.set(flag);
        Ok(flag)
    }
}
