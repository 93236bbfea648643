//! Pasteboard port - abstracts one OS pasteboard (general or drag).
//!
//! Reads are synchronous and local; callers may hold their own locks across
//! them but must never hold one across an `.await`.

use crate::clipboard::{ItemGroup, PasteboardKind, SourceApplication};
use crate::ids::FormatId;

use super::errors::PasteboardError;

pub trait PasteboardPort: Send + Sync {
    fn kind(&self) -> PasteboardKind;

    /// Monotonic counter bumped by the OS on every mutation.
    ///
    /// Comparing two readings is the only reliable change signal; the content
    /// itself is never diffed.
    fn change_count(&self) -> Result<i64, PasteboardError>;

    fn item_count(&self) -> Result<usize, PasteboardError>;

    /// Types advertised by item `index`, in the order the source lists them.
    fn item_types(&self, index: usize) -> Result<Vec<FormatId>, PasteboardError>;

    fn item_data(&self, index: usize, format: &str) -> Result<Vec<u8>, PasteboardError>;

    fn clear(&self) -> Result<(), PasteboardError>;

    /// Writes each group as a separate item. Callers clear first.
    fn write_items(&self, groups: &[ItemGroup]) -> Result<(), PasteboardError>;

    /// Process owning UI focus right now; best-effort.
    fn foreground_application(&self) -> Option<SourceApplication> {
        None
    }
}
