//! SED-ML level/version pairs and their XML namespaces.
//!
//! SED-ML evolves through (level, version) pairs. Every element remembers the
//! pair it was created for, and attribute legality is decided against it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Namespace of SED-ML Level 1 Version 1.
pub const SEDML_L1V1_NAMESPACE: &str = "http://sed-ml.org/";
/// Namespace of SED-ML Level 1 Version 2.
pub const SEDML_L1V2_NAMESPACE: &str = "http://sed-ml.org/sed-ml/level1/version2";
/// Namespace of SED-ML Level 1 Version 3.
pub const SEDML_L1V3_NAMESPACE: &str = "http://sed-ml.org/sed-ml/level1/version3";
/// Namespace of SED-ML Level 1 Version 4.
pub const SEDML_L1V4_NAMESPACE: &str = "http://sed-ml.org/sed-ml/level1/version4";

/// A SED-ML (level, version) pair.
///
/// Ordering is lexicographic, so `L1V2 < L1V4` holds and range checks such as
/// "introduced in L1V2" read naturally.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct LevelVersion {
    pub level: u32,
    pub version: u32,
}

impl LevelVersion {
    pub const L1V1: LevelVersion = LevelVersion::new(1, 1);
    pub const L1V2: LevelVersion = LevelVersion::new(1, 2);
    pub const L1V3: LevelVersion = LevelVersion::new(1, 3);
    pub const L1V4: LevelVersion = LevelVersion::new(1, 4);

    /// Every pair this crate can read and write, oldest first.
    pub const SUPPORTED: [LevelVersion; 4] = [Self::L1V1, Self::L1V2, Self::L1V3, Self::L1V4];

    pub const fn new(level: u32, version: u32) -> Self {
        LevelVersion { level, version }
    }

    /// Whether the pair is one of [`LevelVersion::SUPPORTED`].
    pub fn is_supported(&self) -> bool {
        Self::SUPPORTED.contains(self)
    }

    /// The XML namespace URI for this pair, if supported.
    pub fn namespace_uri(&self) -> Option<&'static str> {
        match (self.level, self.version) {
            (1, 1) => Some(SEDML_L1V1_NAMESPACE),
            (1, 2) => Some(SEDML_L1V2_NAMESPACE),
            (1, 3) => Some(SEDML_L1V3_NAMESPACE),
            (1, 4) => Some(SEDML_L1V4_NAMESPACE),
            _ => None,
        }
    }

    /// Map a namespace URI back to its pair.
    pub fn from_namespace(uri: &str) -> Option<Self> {
        let uri = uri.trim();
        Self::SUPPORTED
            .into_iter()
            .find(|lv| lv.namespace_uri() == Some(uri))
    }
}

impl Default for LevelVersion {
    fn default() -> Self {
        Self::L1V4
    }
}

impl fmt::Display for LevelVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}V{}", self.level, self.version)
    }
}

/// The closed range of pairs in which a schema construct is legal.
///
/// Both `since` and `until` are inclusive; `None` means the construct is still current.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Availability {
    pub since: LevelVersion,
    pub until: Option<LevelVersion>,
}

impl Availability {
    pub const ALWAYS: Availability = Availability::since(LevelVersion::L1V1);

    pub const fn since(since: LevelVersion) -> Self {
        Availability { since, until: None }
    }

    pub fn contains(&self, lv: LevelVersion) -> bool {
        lv >= self.since && self.until.is_none_or(|until| lv <= until)
    }
}
