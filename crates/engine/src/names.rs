use crate::cluster::ClusterMode;
use crate::error::Result;

impl ClusterMode {
    /// Pick the canonical short name from the qualified names the engine
    /// reports for a container.
    ///
    /// Qualified names carry `host/node/name` segments when clustered and
    /// `host/name` otherwise; the first name with the expected segment
    /// count yields its final segment. Returns `None` when no name
    /// matches the expected arity.
    pub fn short_name(&self, names: &[String]) -> Result<Option<String>> {
        let expected = self.expected_segments()?;
        for name in names {
            let parts: Vec<&str> = segments(name).collect();
            if parts.len() == expected {
                return Ok(parts.last().map(|s| (*s).to_owned()));
            }
        }
        Ok(None)
    }

    /// Like [`short_name`](Self::short_name), but returns the whole
    /// host-qualified name instead of its final segment.
    pub fn qualified_name(&self, names: &[String]) -> Result<Option<String>> {
        let expected = self.expected_segments()?;
        for name in names {
            if segments(name).count() == expected {
                return Ok(Some(name.clone()));
            }
        }
        Ok(None)
    }

    fn expected_segments(&self) -> Result<usize> {
        Ok(if self.is_cluster_mode()? { 3 } else { 2 })
    }
}

/// The final slash-delimited segment of a single qualified name.
pub fn name_without_host(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name)
}

fn segments(name: &str) -> impl Iterator<Item = &str> {
    name.strip_prefix('/').unwrap_or(name).split('/')
}
