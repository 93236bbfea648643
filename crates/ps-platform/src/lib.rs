//! Platform layer for PasteShow.
//!
//! Adapters for the ports declared in `ps-core`, plus the runtime that
//! drives the poll tick. Nothing here knows about `ps-app`.

pub mod pasteboard;
pub mod runtime;
pub mod time;

pub use pasteboard::InMemoryPasteboard;
#[cfg(target_os = "macos")]
pub use pasteboard::MacOsPasteboard;
pub use runtime::{PollingClipboardRuntime, DEFAULT_POLL_INTERVAL};
pub use time::SystemClock;
