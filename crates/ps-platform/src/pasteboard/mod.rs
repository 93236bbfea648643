//! Pasteboard adapters implementing [`ps_core::ports::PasteboardPort`].

mod memory;
#[cfg(target_os = "macos")]
mod macos;

pub use memory::InMemoryPasteboard;
#[cfg(target_os = "macos")]
pub use macos::MacOsPasteboard;
