use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::address::{self, ItemAddress};
use super::{ContentCategory, SourceApplication};
use crate::ids::{EntryId, FormatId};

/// One pasteboard item: every type it offered, mapped to its raw payload.
///
/// Formats iterate in sorted order, which is the order flat offsets use.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemGroup {
    payloads: BTreeMap<FormatId, Bytes>,
}

impl ItemGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a payload, replacing any previous payload of the same format.
    pub fn insert(&mut self, format: FormatId, payload: impl Into<Bytes>) -> Option<Bytes> {
        self.payloads.insert(format, payload.into())
    }

    pub fn with(mut self, format: impl Into<FormatId>, payload: impl Into<Bytes>) -> Self {
        self.insert(format.into(), payload);
        self
    }

    pub fn get(&self, format: &str) -> Option<&Bytes> {
        self.payloads.get(format)
    }

    pub fn contains(&self, format: &str) -> bool {
        self.payloads.contains_key(format)
    }

    /// Copy of this group without `format`.
    pub fn without(&self, format: &str) -> Self {
        let mut payloads = self.payloads.clone();
        payloads.remove(format);
        Self { payloads }
    }

    pub fn formats(&self) -> impl Iterator<Item = &FormatId> {
        self.payloads.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FormatId, &Bytes)> {
        self.payloads.iter()
    }

    pub fn len(&self) -> usize {
        self.payloads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payloads.is_empty()
    }

    pub fn size_bytes(&self) -> usize {
        self.payloads.values().map(Bytes::len).sum()
    }
}

impl FromIterator<(FormatId, Bytes)> for ItemGroup {
    fn from_iter<T: IntoIterator<Item = (FormatId, Bytes)>>(iter: T) -> Self {
        Self {
            payloads: iter.into_iter().collect(),
        }
    }
}

/// Immutable snapshot of a pasteboard at the moment a change was observed.
///
/// A new copy always produces a new entry; entries are never edited in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipboardEntry {
    id: EntryId,
    captured_at_ms: i64,
    change_count: i64,
    source_application: Option<SourceApplication>,
    category: ContentCategory,
    groups: Vec<ItemGroup>,
}

impl ClipboardEntry {
    pub fn new(
        captured_at_ms: i64,
        change_count: i64,
        source_application: Option<SourceApplication>,
        category: ContentCategory,
        groups: Vec<ItemGroup>,
    ) -> Self {
        Self {
            id: EntryId::new(),
            captured_at_ms,
            change_count,
            source_application,
            category,
            groups,
        }
    }

    pub fn id(&self) -> &EntryId {
        &self.id
    }

    pub fn captured_at_ms(&self) -> i64 {
        self.captured_at_ms
    }

    /// Source change counter value that triggered this capture.
    pub fn change_count(&self) -> i64 {
        self.change_count
    }

    pub fn source_application(&self) -> Option<&SourceApplication> {
        self.source_application.as_ref()
    }

    pub fn category(&self) -> ContentCategory {
        self.category
    }

    pub fn groups(&self) -> &[ItemGroup] {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of type/payload pairs across all groups.
    pub fn format_count(&self) -> usize {
        address::total_formats(&self.groups)
    }

    pub fn total_size_bytes(&self) -> usize {
        self.groups.iter().map(ItemGroup::size_bytes).sum()
    }

    pub fn payload(&self, group_index: usize, format: &str) -> Option<&Bytes> {
        self.groups.get(group_index)?.get(format)
    }

    /// Resolves a flat selection offset within this entry.
    pub fn locate(&self, offset: usize) -> Option<ItemAddress> {
        address::locate(&self.groups, offset)
    }

    pub fn offset_of(&self, group_index: usize, format: &str) -> Option<usize> {
        address::offset_of(&self.groups, group_index, format)
    }
}
