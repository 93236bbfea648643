//! Clipboard domain models.
pub mod address;
mod category;
mod entry;
mod event;
mod pasteboard_kind;
pub mod preview;
mod source_app;

pub use address::ItemAddress;
pub use category::{classify, ContentCategory};
pub use entry::{ClipboardEntry, ItemGroup};
pub use event::{HistoryEvent, PollOutcome};
pub use pasteboard_kind::PasteboardKind;
pub use source_app::SourceApplication;
