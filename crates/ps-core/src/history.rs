//! Ordered, optionally bounded history of clipboard snapshots.
//!
//! Newest entries live at index 0. Index arguments are positions in that
//! order and are never clamped: an invalid index is a caller bug and is
//! reported as [`HistoryError::IndexOutOfRange`].

use std::collections::VecDeque;
use std::num::NonZeroUsize;

use thiserror::Error;

use crate::clipboard::ClipboardEntry;
use crate::ids::EntryId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
    #[error("history index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

#[derive(Debug, Clone, Default)]
pub struct ClipboardHistory {
    entries: VecDeque<ClipboardEntry>,
    max_entries: Option<NonZeroUsize>,
}

impl ClipboardHistory {
    pub fn new(max_entries: Option<NonZeroUsize>) -> Self {
        Self {
            entries: VecDeque::new(),
            max_entries,
        }
    }

    pub fn unbounded() -> Self {
        Self::new(None)
    }

    pub fn max_entries(&self) -> Option<NonZeroUsize> {
        self.max_entries
    }

    /// Inserts at the front. No de-duplication.
    ///
    /// Returns the oldest entry when the bound forced it out.
    pub fn prepend(&mut self, entry: ClipboardEntry) -> Option<ClipboardEntry> {
        self.entries.push_front(entry);
        match self.max_entries {
            Some(max) if self.entries.len() > max.get() => {
                let evicted = self.entries.pop_back();
                if let Some(e) = &evicted {
                    tracing::debug!(entry_id = %e.id(), max = max.get(), "history bound reached, evicting oldest");
                }
                evicted
            }
            _ => None,
        }
    }

    /// Removes and returns the entry at `index`.
    pub fn promote(&mut self, index: usize) -> Result<ClipboardEntry, HistoryError> {
        self.check(index)?;
        self.entries
            .remove(index)
            .ok_or(HistoryError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            })
    }

    pub fn remove(&mut self, index: usize) -> Result<(), HistoryError> {
        self.promote(index).map(drop)
    }

    pub fn get(&self, index: usize) -> Result<&ClipboardEntry, HistoryError> {
        self.entries.get(index).ok_or(HistoryError::IndexOutOfRange {
            index,
            len: self.entries.len(),
        })
    }

    pub fn position(&self, id: &EntryId) -> Option<usize> {
        self.entries.iter().position(|e| e.id() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClipboardEntry> {
        self.entries.iter()
    }

    /// Owned copy of all entries, newest first. Payloads are shared, not copied.
    pub fn entries(&self) -> Vec<ClipboardEntry> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn check(&self, index: usize) -> Result<(), HistoryError> {
        if index < self.entries.len() {
            Ok(())
        } else {
            Err(HistoryError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            })
        }
    }
}
