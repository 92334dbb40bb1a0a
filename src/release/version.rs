//! Dotted numeric versions

use core::cmp::Ordering;
use core::fmt;

use heapless::Vec;

/// Most components a version keeps; extra components are ignored
pub const MAX_VERSION_COMPONENTS: usize = 8;

/// Application version such as `1.4.2`
///
/// Ordered component-wise over the common prefix; when that prefix is equal
/// the version with fewer components is lower (`1.2 < 1.2.0`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppVersion {
    components: Vec<u32, MAX_VERSION_COMPONENTS>,
}

impl AppVersion {
    /// Parse a tag like `v1.2.3`.
    ///
    /// Surrounding whitespace and one leading `v` are dropped, non-numeric
    /// components are skipped. Returns `None` when nothing numeric remains.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        let bare = trimmed.strip_prefix('v').unwrap_or(trimmed);

        let mut components = Vec::new();
        for part in bare.split('.') {
            if let Ok(value) = part.parse::<u32>() {
                if components.push(value).is_err() {
                    break;
                }
            }
        }

        if components.is_empty() {
            return None;
        }
        Some(Self { components })
    }

    /// Version of this crate
    pub fn current() -> Option<Self> {
        Self::parse(env!("CARGO_PKG_VERSION"))
    }

    pub fn components(&self) -> &[u32] {
        &self.components
    }
}

impl Ord for AppVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.components.as_slice().cmp(other.components.as_slice())
    }
}

impl PartialOrd for AppVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for AppVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, component) in self.components.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{}", component)?;
        }
        Ok(())
    }
}
