use thiserror::Error;

use ps_core::ports::PasteboardError;
use ps_core::HistoryError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    IndexOutOfRange(#[from] HistoryError),

    #[error("failed to publish to pasteboard: {0}")]
    Write(#[from] PasteboardError),

    #[error("format `{format}` not found in item group {group_index}")]
    FormatNotFound { group_index: usize, format: String },

    #[error(transparent)]
    Capture(#[from] anyhow::Error),
}
