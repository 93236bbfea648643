mod id_macro;

use serde::{Deserialize, Serialize};

use id_macro::{impl_random_id, impl_string_id};

/// Identity of one captured history entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryId(String);

/// Pasteboard type identifier (e.g. `public.utf8-plain-text`).
///
/// Ordered lexicographically; item groups iterate their formats in this order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FormatId(String);

impl_string_id!(EntryId, FormatId);
impl_random_id!(EntryId);

impl FormatId {
    pub const UTF8_PLAIN_TEXT: &'static str = "public.utf8-plain-text";

    pub fn utf8_plain_text() -> Self {
        Self(Self::UTF8_PLAIN_TEXT.to_string())
    }
}
