//! Port interfaces between the use cases and platform adapters.

mod clock;
pub mod errors;
mod pasteboard;
mod poll_handler;

pub use clock::ClockPort;
pub use errors::PasteboardError;
pub use pasteboard::PasteboardPort;
pub use poll_handler::ChangePollHandler;
