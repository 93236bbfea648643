//! History service: the single owner of history and polling state.
//!
//! Poll ticks and user actions all go through one mutex, so every operation
//! runs to completion before the next one starts. No lock is held across an
//! `.await`; pasteboard access is synchronous.

use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::Context;
use tokio::sync::broadcast;
use tracing::{debug, info, info_span, warn};

use ps_core::ports::{ChangePollHandler, ClockPort, PasteboardPort};
use ps_core::{
    ClipboardEntry, ClipboardHistory, FormatId, HistoryEvent, ItemGroup, PasteboardKind,
    PollOutcome,
};

use crate::error::ServiceError;
use crate::usecases::{CaptureSnapshot, PublishEntry};

const EVENT_CHANNEL_CAPACITY: usize = 64;

struct State {
    history: ClipboardHistory,
    /// `None` until the first tick after construction or a source switch.
    last_change_count: Option<i64>,
    pasteboard: Arc<dyn PasteboardPort>,
}

pub struct HistoryService {
    state: Mutex<State>,
    clock: Arc<dyn ClockPort>,
    events: broadcast::Sender<HistoryEvent>,
}

impl HistoryService {
    pub fn new(
        pasteboard: Arc<dyn PasteboardPort>,
        clock: Arc<dyn ClockPort>,
        max_entries: Option<NonZeroUsize>,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            state: Mutex::new(State {
                history: ClipboardHistory::new(max_entries),
                last_change_count: None,
                pasteboard,
            }),
            clock,
            events,
        }
    }

    /// Receives every [`HistoryEvent`] emitted after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<HistoryEvent> {
        self.events.subscribe()
    }

    /// One change check. Captures when the counter differs from the last one
    /// observed, and always on the first tick after construction or a switch.
    /// Stopping and restarting the poller does not reset this.
    pub fn poll_once(&self) -> Result<PollOutcome, ServiceError> {
        let mut events = Vec::new();
        let outcome = {
            let mut state = self.lock();
            let current = state
                .pasteboard
                .change_count()
                .context("failed to read pasteboard change count")?;

            if state.last_change_count == Some(current) {
                return Ok(PollOutcome::Unchanged);
            }

            let entry =
                CaptureSnapshot::new(state.pasteboard.clone(), self.clock.clone()).execute()?;
            state.last_change_count = Some(entry.change_count());

            if entry.is_empty() {
                debug!(change_count = entry.change_count(), "Change observed with nothing to capture");
                PollOutcome::DiscardedEmpty
            } else {
                let entry_id = entry.id().clone();
                events.push(HistoryEvent::Captured {
                    entry_id: entry_id.clone(),
                    category: entry.category(),
                });
                if let Some(evicted) = state.history.prepend(entry) {
                    events.push(HistoryEvent::Evicted {
                        entry_id: evicted.id().clone(),
                    });
                }
                PollOutcome::Captured { entry_id }
            }
        };
        self.emit(events);
        Ok(outcome)
    }

    /// Newest-first copy of the history.
    pub fn entries(&self) -> Vec<ClipboardEntry> {
        self.lock().history.entries()
    }

    pub fn get(&self, index: usize) -> Result<ClipboardEntry, ServiceError> {
        Ok(self.lock().history.get(index)?.clone())
    }

    pub fn len(&self) -> usize {
        self.lock().history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().history.is_empty()
    }

    pub fn active_kind(&self) -> PasteboardKind {
        self.lock().pasteboard.kind()
    }

    /// Republishes entry `index` to the live pasteboard and drops it from
    /// history.
    ///
    /// History is left untouched when publishing fails. On success the next
    /// tick captures the republished content afresh at the front.
    pub fn promote(&self, index: usize) -> Result<ClipboardEntry, ServiceError> {
        let span = info_span!("usecase.history.promote", index);
        let _enter = span.enter();

        let promoted = {
            let mut state = self.lock();
            let entry = state.history.get(index)?.clone();
            PublishEntry::new(state.pasteboard.clone()).execute(&entry)?;
            state.history.promote(index)?
        };

        info!(entry_id = %promoted.id(), "Promoted history entry");
        self.emit([HistoryEvent::Promoted {
            entry_id: promoted.id().clone(),
        }]);
        Ok(promoted)
    }

    pub fn remove(&self, index: usize) -> Result<(), ServiceError> {
        let removed = self.lock().history.promote(index)?;
        debug!(index, entry_id = %removed.id(), "Removed history entry");
        self.emit([HistoryEvent::Removed {
            entry_id: removed.id().clone(),
        }]);
        Ok(())
    }

    /// Starts observing a different pasteboard.
    ///
    /// History belongs to one source, so it is cleared, and the next tick
    /// captures unconditionally.
    pub fn switch_source(&self, pasteboard: Arc<dyn PasteboardPort>) {
        let kind = pasteboard.kind();
        {
            let mut state = self.lock();
            state.pasteboard = pasteboard;
            state.last_change_count = None;
            state.history.clear();
        }
        info!(%kind, "Switched pasteboard source");
        self.emit([HistoryEvent::SourceSwitched { kind }]);
    }

    pub fn clear(&self) {
        self.lock().history.clear();
        self.emit([HistoryEvent::Cleared]);
    }

    /// Replaces the live pasteboard with the type identifier itself, as
    /// plain text.
    pub fn copy_type_name(&self, format: &str) -> Result<(), ServiceError> {
        let group = ItemGroup::new().with(FormatId::utf8_plain_text(), format.as_bytes().to_vec());
        let state = self.lock();
        PublishEntry::new(state.pasteboard.clone()).write_groups(&[group])?;
        Ok(())
    }

    /// Republishes entry `index` without `format` in group `group_index`.
    ///
    /// The history entry itself is not edited; the live pasteboard changes
    /// and the result is captured on the next tick. Groups left without any
    /// type are not written.
    pub fn remove_type(
        &self,
        index: usize,
        group_index: usize,
        format: &str,
    ) -> Result<(), ServiceError> {
        let state = self.lock();
        let entry = state.history.get(index)?;
        if entry.payload(group_index, format).is_none() {
            return Err(ServiceError::FormatNotFound {
                group_index,
                format: format.to_string(),
            });
        }

        let groups: Vec<ItemGroup> = entry
            .groups()
            .iter()
            .enumerate()
            .map(|(i, group)| {
                if i == group_index {
                    group.without(format)
                } else {
                    group.clone()
                }
            })
            .filter(|group| !group.is_empty())
            .collect();

        PublishEntry::new(state.pasteboard.clone()).write_groups(&groups)?;
        debug!(index, group_index, format, "Republished entry without type");
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| {
            warn!("History state mutex poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn emit(&self, events: impl IntoIterator<Item = HistoryEvent>) {
        for event in events {
            // No subscribers is fine.
            let _ = self.events.send(event);
        }
    }
}

#[async_trait::async_trait]
impl ChangePollHandler for HistoryService {
    async fn on_tick(&self) -> anyhow::Result<PollOutcome> {
        Ok(self.poll_once()?)
    }
}
