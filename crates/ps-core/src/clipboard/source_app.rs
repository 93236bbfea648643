use serde::{Deserialize, Serialize};

/// Application presumed to have written the clipboard.
///
/// Captured from whatever process owned UI focus when the change was
/// observed. The real writer may already have lost focus by then, so this is
/// an approximation and must never be treated as authoritative.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceApplication {
    /// Bundle path or identifier reported by the platform.
    pub location: String,
}

impl SourceApplication {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
        }
    }

    /// Human readable name: last path component without a trailing `.app`.
    pub fn display_name(&self) -> &str {
        let trimmed = self.location.trim_end_matches('/');
        let last = trimmed.rsplit('/').next().unwrap_or(trimmed);
        last.strip_suffix(".app").unwrap_or(last)
    }
}
