//! Flat selection addressing.
//!
//! List views show every payload of an entry as one flat, selectable list:
//! groups in order, and within a group the formats in sorted order. A flat
//! offset `k` therefore names "the k-th payload across all groups". These
//! helpers are the single place that mapping is computed.

use serde::{Deserialize, Serialize};

use super::ItemGroup;
use crate::ids::FormatId;

/// Structured position of one payload inside an entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemAddress {
    pub group_index: usize,
    pub format_id: FormatId,
}

pub fn total_formats(groups: &[ItemGroup]) -> usize {
    groups.iter().map(ItemGroup::len).sum()
}

/// Flat offset of the first payload of `group_index`.
///
/// `group_index == groups.len()` yields the total count, larger values are
/// clamped to it.
pub fn group_base(groups: &[ItemGroup], group_index: usize) -> usize {
    groups.iter().take(group_index).map(ItemGroup::len).sum()
}

/// Maps a flat offset to its group and format; `None` past the end.
pub fn locate(groups: &[ItemGroup], offset: usize) -> Option<ItemAddress> {
    let mut base = 0;
    for (group_index, group) in groups.iter().enumerate() {
        let next = base + group.len();
        if offset < next {
            let format_id = group.formats().nth(offset - base)?.clone();
            return Some(ItemAddress {
                group_index,
                format_id,
            });
        }
        base = next;
    }
    None
}

/// Inverse of [`locate`]; `None` if the group or format does not exist.
pub fn offset_of(groups: &[ItemGroup], group_index: usize, format: &str) -> Option<usize> {
    let group = groups.get(group_index)?;
    let position = group.formats().position(|f| f.as_str() == format)?;
    Some(group_base(groups, group_index) + position)
}
