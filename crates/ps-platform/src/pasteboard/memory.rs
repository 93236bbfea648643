//! Process-local pasteboard.
//!
//! Behaves like the OS pasteboard where it matters to the poller: every
//! clear, write or simulated external copy bumps the change counter, and
//! items keep the type order they were written with. Failure injection
//! (unreadable types/items, rejected writes) makes the soft-failure paths of
//! capture and publish reachable without an OS.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

use tracing::debug;

use ps_core::ports::{PasteboardError, PasteboardPort};
use ps_core::{FormatId, ItemGroup, PasteboardKind, SourceApplication};

type Item = Vec<(FormatId, Vec<u8>)>;

#[derive(Default)]
struct Inner {
    change_count: i64,
    items: Vec<Item>,
    unavailable_formats: HashSet<String>,
    unavailable_items: HashSet<usize>,
    write_rejection: Option<String>,
    refused_formats: HashSet<String>,
    foreground: Option<SourceApplication>,
}

pub struct InMemoryPasteboard {
    kind: PasteboardKind,
    inner: Mutex<Inner>,
}

impl InMemoryPasteboard {
    pub fn new(kind: PasteboardKind) -> Self {
        Self::with_change_count(kind, 0)
    }

    pub fn with_change_count(kind: PasteboardKind, change_count: i64) -> Self {
        Self {
            kind,
            inner: Mutex::new(Inner {
                change_count,
                ..Inner::default()
            }),
        }
    }

    /// Simulates another application copying: replaces every item and bumps
    /// the counter once.
    pub fn copy_items(&self, items: Vec<Vec<(&str, &[u8])>>) {
        let mut inner = self.lock();
        inner.items = items
            .into_iter()
            .map(|item| {
                item.into_iter()
                    .map(|(format, data)| (FormatId::from(format), data.to_vec()))
                    .collect()
            })
            .collect();
        inner.change_count += 1;
    }

    pub fn copy_text(&self, text: &str) {
        self.copy_items(vec![vec![(FormatId::UTF8_PLAIN_TEXT, text.as_bytes())]]);
    }

    /// Current items with their types in advertised order.
    pub fn items(&self) -> Vec<Vec<(FormatId, Vec<u8>)>> {
        self.lock().items.clone()
    }

    /// Makes `item_data` fail for `format` while it stays advertised.
    pub fn set_payload_unavailable(&self, format: &str) {
        self.lock().unavailable_formats.insert(format.to_string());
    }

    /// Makes `item_types` fail for item `index`.
    pub fn set_item_unavailable(&self, index: usize) {
        self.lock().unavailable_items.insert(index);
    }

    /// `Some(reason)` makes every following `write_items` fail.
    pub fn reject_writes(&self, reason: Option<&str>) {
        self.lock().write_rejection = reason.map(str::to_string);
    }

    /// Makes `write_items` fail for any group carrying `format`, the way an
    /// item refuses a type it cannot hold.
    pub fn refuse_format(&self, format: &str) {
        self.lock().refused_formats.insert(format.to_string());
    }

    pub fn set_foreground_application(&self, app: Option<SourceApplication>) {
        self.lock().foreground = app;
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl PasteboardPort for InMemoryPasteboard {
    fn kind(&self) -> PasteboardKind {
        self.kind
    }

    fn change_count(&self) -> Result<i64, PasteboardError> {
        Ok(self.lock().change_count)
    }

    fn item_count(&self) -> Result<usize, PasteboardError> {
        Ok(self.lock().items.len())
    }

    fn item_types(&self, index: usize) -> Result<Vec<FormatId>, PasteboardError> {
        let inner = self.lock();
        if inner.unavailable_items.contains(&index) {
            return Err(PasteboardError::ItemUnavailable { index });
        }
        inner
            .items
            .get(index)
            .map(|item| item.iter().map(|(format, _)| format.clone()).collect())
            .ok_or(PasteboardError::ItemUnavailable { index })
    }

    fn item_data(&self, index: usize, format: &str) -> Result<Vec<u8>, PasteboardError> {
        let inner = self.lock();
        if inner.unavailable_formats.contains(format) {
            return Err(PasteboardError::PayloadUnavailable {
                format: format.to_string(),
            });
        }
        let item = inner
            .items
            .get(index)
            .ok_or(PasteboardError::ItemUnavailable { index })?;
        item.iter()
            .find(|(f, _)| f.as_str() == format)
            .map(|(_, data)| data.clone())
            .ok_or_else(|| PasteboardError::PayloadUnavailable {
                format: format.to_string(),
            })
    }

    fn clear(&self) -> Result<(), PasteboardError> {
        let mut inner = self.lock();
        inner.items.clear();
        inner.change_count += 1;
        Ok(())
    }

    fn write_items(&self, groups: &[ItemGroup]) -> Result<(), PasteboardError> {
        let mut inner = self.lock();
        if let Some(reason) = &inner.write_rejection {
            return Err(PasteboardError::WriteRejected(reason.clone()));
        }
        if let Some(format) = groups
            .iter()
            .flat_map(|group| group.formats())
            .find(|format| inner.refused_formats.contains(format.as_str()))
        {
            return Err(PasteboardError::type_refused(self.kind, format.as_str()));
        }
        inner.items.extend(groups.iter().map(|group| {
            group
                .iter()
                .map(|(format, data)| (format.clone(), data.to_vec()))
                .collect::<Item>()
        }));
        inner.change_count += 1;
        debug!(kind = %self.kind, items = groups.len(), "Wrote items to in-memory pasteboard");
        Ok(())
    }

    fn foreground_application(&self) -> Option<SourceApplication> {
        self.lock().foreground.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_external_copy_bumps_counter_and_keeps_type_order() {
        let pasteboard = InMemoryPasteboard::with_change_count(PasteboardKind::General, 5);
        pasteboard.copy_items(vec![vec![
            ("public.utf8-plain-text", &b"hi"[..]),
            ("public.html", &b"<b>hi</b>"[..]),
        ]]);

        assert_eq!(pasteboard.change_count().unwrap(), 6);
        assert_eq!(pasteboard.item_count().unwrap(), 1);
        let types: Vec<_> = pasteboard
            .item_types(0)
            .unwrap()
            .into_iter()
            .map(FormatId::into_inner)
            .collect();
        assert_eq!(types, ["public.utf8-plain-text", "public.html"]);
    }

    #[test]
    fn test_clear_and_write_each_bump_counter() {
        let pasteboard = InMemoryPasteboard::new(PasteboardKind::Drag);
        pasteboard.clear().unwrap();
        pasteboard
            .write_items(&[ItemGroup::new().with("public.png", vec![1u8, 2, 3])])
            .unwrap();

        assert_eq!(pasteboard.change_count().unwrap(), 2);
        assert_eq!(pasteboard.item_data(0, "public.png").unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_rejected_write_leaves_counter_alone() {
        let pasteboard = InMemoryPasteboard::new(PasteboardKind::General);
        pasteboard.reject_writes(Some("locked"));

        let err = pasteboard.write_items(&[ItemGroup::new()]).unwrap_err();
        assert_eq!(err, PasteboardError::WriteRejected("locked".into()));
        assert_eq!(pasteboard.change_count().unwrap(), 0);
    }

    #[test]
    fn test_refused_type_fails_whole_write() {
        let pasteboard = InMemoryPasteboard::new(PasteboardKind::General);
        pasteboard.refuse_format("public.html");

        let err = pasteboard
            .write_items(&[
                ItemGroup::new().with("public.utf8-plain-text", &b"a"[..]),
                ItemGroup::new()
                    .with("public.utf8-plain-text", &b"b"[..])
                    .with("public.html", &b"<b>b</b>"[..]),
            ])
            .unwrap_err();

        assert_eq!(
            err,
            PasteboardError::type_refused(PasteboardKind::General, "public.html")
        );
        assert!(pasteboard.items().is_empty());
        assert_eq!(pasteboard.change_count().unwrap(), 0);
    }

    #[test]
    fn test_injected_failures() {
        let pasteboard = InMemoryPasteboard::new(PasteboardKind::General);
        pasteboard.copy_items(vec![
            vec![("public.html", &b"h"[..])],
            vec![("public.png", &b"p"[..])],
        ]);
        pasteboard.set_payload_unavailable("public.html");
        pasteboard.set_item_unavailable(1);

        assert!(matches!(
            pasteboard.item_data(0, "public.html"),
            Err(PasteboardError::PayloadUnavailable { .. })
        ));
        assert_eq!(
            pasteboard.item_types(1),
            Err(PasteboardError::ItemUnavailable { index: 1 })
        );
        assert_eq!(
            pasteboard.item_types(7),
            Err(PasteboardError::ItemUnavailable { index: 7 })
        );
    }
}
