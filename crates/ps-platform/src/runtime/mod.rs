mod poller;

pub use poller::{PollingClipboardRuntime, DEFAULT_POLL_INTERVAL};
