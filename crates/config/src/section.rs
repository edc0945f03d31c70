use serde::{Deserialize, Serialize};

/// The category of top-level configuration block a subtree belongs to.
///
/// A kind selects which normalization rules apply during interpolation;
/// it never changes the substitution syntax itself. Adding a kind means
/// adding a variant and a row in `allows_empty_shorthand`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Service,
    Volume,
    Network,
}

impl SectionKind {
    /// Singular name used in error paths (`service.web.image`).
    pub fn as_str(self) -> &'static str {
        match self {
            SectionKind::Service => "service",
            SectionKind::Volume => "volume",
            SectionKind::Network => "network",
        }
    }

    /// Whether a top-level entry of this kind may be declared with no
    /// body (`other:`), meaning "use defaults". Such `null` entries are
    /// rewritten to an empty mapping during interpolation. A bodiless
    /// service is a schema error for the downstream validator instead.
    pub fn allows_empty_shorthand(self) -> bool {
        match self {
            SectionKind::Service => false,
            SectionKind::Volume | SectionKind::Network => true,
        }
    }
}

impl std::fmt::Display for SectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
