use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse semantic category of a clipboard snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentCategory {
    Text,
    Html,
    Image,
    Url,
    File,
    Other,
}

impl ContentCategory {
    pub const ALL: [ContentCategory; 6] = [
        ContentCategory::Text,
        ContentCategory::Html,
        ContentCategory::Image,
        ContentCategory::Url,
        ContentCategory::File,
        ContentCategory::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ContentCategory::Text => "Text",
            ContentCategory::Html => "HTML",
            ContentCategory::Image => "Image",
            ContentCategory::Url => "URL",
            ContentCategory::File => "File",
            ContentCategory::Other => "Other",
        }
    }
}

impl fmt::Display for ContentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

const TEXT_TYPES: &[&str] = &[
    "public.utf8-plain-text",
    "public.plain-text",
    "public.text",
    "public.utf16-plain-text",
    "public.utf16-external-plain-text",
    "nsstringpboardtype",
    "public.rtf",
    "com.apple.rtfd",
    "com.apple.flat-rtfd",
    "next rich text format v1.0 pasteboard type",
    "next rtfd pasteboard type",
    "text/plain",
    "text/rtf",
];

const HTML_TYPES: &[&str] = &["public.html", "apple html pasteboard type", "text/html"];

const IMAGE_TYPES: &[&str] = &[
    "public.png",
    "public.jpeg",
    "public.tiff",
    "com.microsoft.bmp",
    "com.compuserve.gif",
    "org.webmproject.webp",
    "public.webp",
    "public.image",
    "nstiffpboardtype",
    "apple png pasteboard type",
];

const URL_TYPES: &[&str] = &[
    "public.url",
    "public.url-name",
    "apple url pasteboard type",
    "nsurlpboardtype",
];

const FILE_TYPES: &[&str] = &["public.file-url", "nsfilenamespboardtype", "text/uri-list"];

/// Maps a raw pasteboard type identifier to its [`ContentCategory`].
///
/// Total and case-insensitive: anything unrecognised, including the empty
/// string, is [`ContentCategory::Other`]. MIME types (`text/plain`,
/// `image/*`, ...) are accepted alongside uniform type identifiers.
pub fn classify(type_identifier: &str) -> ContentCategory {
    let id = type_identifier.trim().to_ascii_lowercase();
    let id = id.as_str();

    if TEXT_TYPES.contains(&id) || id.starts_with("text/plain;") {
        ContentCategory::Text
    } else if HTML_TYPES.contains(&id) || id.starts_with("text/html;") {
        ContentCategory::Html
    } else if IMAGE_TYPES.contains(&id) || id.starts_with("image/") {
        ContentCategory::Image
    } else if URL_TYPES.contains(&id) {
        ContentCategory::Url
    } else if FILE_TYPES.contains(&id) {
        ContentCategory::File
    } else {
        ContentCategory::Other
    }
}
