//! PasteShow
//!
//! Headless pasteboard history: polls the system pasteboard, keeps a
//! snapshot of every change and logs what it sees.

pub mod bootstrap;
