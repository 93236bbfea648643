mod capture_snapshot;
mod publish_entry;

pub use capture_snapshot::CaptureSnapshot;
pub use publish_entry::PublishEntry;
