//! # ps-core
//!
//! Domain model and ports for PasteShow: pasteboard snapshots, their
//! classification, the in-memory history and the traits platform adapters
//! implement.
//!
//! No I/O happens here.

pub mod clipboard;
pub mod config;
pub mod history;
pub mod ids;
pub mod ports;

pub use clipboard::{
    classify, ClipboardEntry, ContentCategory, HistoryEvent, ItemAddress, ItemGroup,
    PasteboardKind, PollOutcome, SourceApplication,
};
pub use config::AppConfig;
pub use history::{ClipboardHistory, HistoryError};
pub use ids::{EntryId, FormatId};
