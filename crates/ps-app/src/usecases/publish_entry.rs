use std::sync::Arc;

use tracing::{debug, info_span};

use ps_core::ports::{PasteboardError, PasteboardPort};
use ps_core::{ClipboardEntry, ItemGroup};

/// Replace the live pasteboard contents with previously captured items.
///
/// Each group becomes one pasteboard item carrying all of its type/payload
/// pairs, type identifiers unchanged. The destination bumps its change
/// counter, so the poller observes the write like any other copy.
pub struct PublishEntry {
    pasteboard: Arc<dyn PasteboardPort>,
}

impl PublishEntry {
    pub fn new(pasteboard: Arc<dyn PasteboardPort>) -> Self {
        Self { pasteboard }
    }

    pub fn execute(&self, entry: &ClipboardEntry) -> Result<(), PasteboardError> {
        let span = info_span!(
            "usecase.publish_entry.execute",
            entry_id = %entry.id(),
            groups = entry.groups().len(),
        );
        let _enter = span.enter();

        self.write_groups(entry.groups())
    }

    pub fn write_groups(&self, groups: &[ItemGroup]) -> Result<(), PasteboardError> {
        self.pasteboard.clear()?;
        self.pasteboard.write_items(groups)?;
        debug!(
            items = groups.len(),
            pasteboard = %self.pasteboard.kind(),
            "Published items to pasteboard"
        );
        Ok(())
    }
}
