//! Platform identifiers: the social networks a post can target.
//!
//! The set is open — any identifier is valid, and new networks only need
//! a row in the display table to get a pretty name.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Display names for well-known networks.
///
/// Identifiers missing from this table fall back to the raw id,
/// so adding a platform never requires a code change elsewhere.
const DISPLAY_NAMES: &[(&str, &str)] = &[
    ("bluesky", "Bluesky"),
    ("facebook", "Facebook"),
    ("instagram", "Instagram"),
    ("linkedin", "LinkedIn"),
    ("mastodon", "Mastodon"),
    ("pinterest", "Pinterest"),
    ("threads", "Threads"),
    ("tiktok", "TikTok"),
    ("x", "X"),
    ("youtube", "YouTube"),
];

/// A social network identifier, normalized to lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Platform(String);

impl Platform {
    /// Creates a platform id, trimming whitespace and lowercasing.
    pub fn new(id: &str) -> Self {
        Platform(id.trim().to_lowercase())
    }

    /// The normalized identifier (e.g. `"tiktok"`).
    pub fn id(&self) -> &str {
        &self.0
    }

    /// Human-readable name from the display table, or the raw id
    /// when the platform is unknown.
    pub fn display_name(&self) -> &str {
        DISPLAY_NAMES
            .iter()
            .find(|(id, _)| *id == self.0)
            .map_or(self.0.as_str(), |(_, name)| name)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl From<&str> for Platform {
    fn from(id: &str) -> Self {
        Platform::new(id)
    }
}
