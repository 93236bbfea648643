use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Which system pasteboard is being observed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PasteboardKind {
    /// The general copy/paste clipboard.
    #[default]
    General,
    /// The pasteboard backing drag-and-drop sessions.
    Drag,
}

impl PasteboardKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PasteboardKind::General => "general",
            PasteboardKind::Drag => "drag",
        }
    }
}

impl fmt::Display for PasteboardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PasteboardKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "general" => Ok(PasteboardKind::General),
            "drag" => Ok(PasteboardKind::Drag),
            other => Err(anyhow::anyhow!("unknown pasteboard kind: {other}")),
        }
    }
}
