use super::{ContentCategory, PasteboardKind};
use crate::ids::EntryId;

/// Facts about history changes, broadcast to whoever renders the history.
///
/// Subscribers re-read the history snapshot on receipt; events carry ids,
/// not positions, so a late subscriber never acts on a stale index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryEvent {
    /// A new snapshot was captured and placed at the front.
    Captured {
        entry_id: EntryId,
        category: ContentCategory,
    },
    /// The oldest entry was dropped to honour the size bound.
    Evicted { entry_id: EntryId },
    /// An entry was republished to the live pasteboard and left history.
    Promoted { entry_id: EntryId },
    /// An entry was deleted by the user.
    Removed { entry_id: EntryId },
    /// The observed pasteboard changed; history was cleared.
    SourceSwitched { kind: PasteboardKind },
    /// History was cleared without switching source.
    Cleared,
}

/// Result of one poll tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// The change counter did not move.
    Unchanged,
    /// A change was captured and prepended to history.
    Captured { entry_id: EntryId },
    /// A change was observed but the pasteboard had nothing to capture.
    DiscardedEmpty,
}
