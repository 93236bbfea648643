use thiserror::Error;

use crate::clipboard::PasteboardKind;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasteboardError {
    /// The type was advertised but its payload could not be produced.
    #[error("payload for `{format}` unavailable")]
    PayloadUnavailable { format: String },

    #[error("pasteboard item {index} unavailable")]
    ItemUnavailable { index: usize },

    #[error("pasteboard rejected write: {0}")]
    WriteRejected(String),

    #[error("pasteboard unavailable: {0}")]
    Unavailable(String),
}

impl PasteboardError {
    /// The destination would not store `format` on an item being written.
    pub fn type_refused(kind: PasteboardKind, format: &str) -> Self {
        Self::WriteRejected(format!("{kind} pasteboard refused type `{format}`"))
    }
}
