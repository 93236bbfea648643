use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, debug_span};

use ps_core::ports::{ClockPort, PasteboardError, PasteboardPort};
use ps_core::{classify, ClipboardEntry, ContentCategory, FormatId, ItemGroup};

/// Build a [`ClipboardEntry`] from the current pasteboard contents.
///
/// Capture fails soft per item and per type: whatever can be read is kept
/// and the rest is logged at debug level. Only an unreadable change counter
/// or item count aborts, since then the pasteboard itself is unusable.
///
/// The result may have no groups; deciding whether to keep it is up to the
/// caller.
pub struct CaptureSnapshot {
    pasteboard: Arc<dyn PasteboardPort>,
    clock: Arc<dyn ClockPort>,
}

impl CaptureSnapshot {
    pub fn new(pasteboard: Arc<dyn PasteboardPort>, clock: Arc<dyn ClockPort>) -> Self {
        Self { pasteboard, clock }
    }

    pub fn execute(&self) -> Result<ClipboardEntry> {
        let span = debug_span!(
            "usecase.capture_snapshot.execute",
            pasteboard = %self.pasteboard.kind(),
        );
        let _enter = span.enter();

        let change_count = self
            .pasteboard
            .change_count()
            .context("failed to read pasteboard change count")?;
        let item_count = self
            .pasteboard
            .item_count()
            .context("failed to read pasteboard item count")?;

        let mut first_type: Option<FormatId> = None;
        let mut groups = Vec::with_capacity(item_count);

        for index in 0..item_count {
            let types = match self.pasteboard.item_types(index) {
                Ok(types) => types,
                Err(err) => {
                    debug!(index, error = %err, "Skipping unreadable pasteboard item");
                    continue;
                }
            };

            if first_type.is_none() {
                first_type = types.first().cloned();
            }

            let group = self.read_group(index, types);
            if group.is_empty() {
                debug!(index, "Dropping item with no readable payloads");
                continue;
            }
            groups.push(group);
        }

        let category = first_type
            .as_ref()
            .map(|format| classify(format.as_str()))
            .unwrap_or(ContentCategory::Other);

        debug!(
            change_count,
            item_count,
            captured_groups = groups.len(),
            %category,
            "Captured pasteboard snapshot"
        );

        Ok(ClipboardEntry::new(
            self.clock.now_ms(),
            change_count,
            self.pasteboard.foreground_application(),
            category,
            groups,
        ))
    }

    fn read_group(&self, index: usize, types: Vec<FormatId>) -> ItemGroup {
        let mut group = ItemGroup::new();
        for format in types {
            match self.pasteboard.item_data(index, format.as_str()) {
                Ok(data) => {
                    group.insert(format, data);
                }
                Err(PasteboardError::PayloadUnavailable { .. }) => {
                    debug!(index, %format, "Payload unavailable, type omitted");
                }
                Err(err) => {
                    debug!(index, %format, error = %err, "Failed to read payload, type omitted");
                }
            }
        }
        group
    }
}
