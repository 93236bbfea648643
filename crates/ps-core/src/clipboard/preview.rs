//! Display helpers for consumers that render payloads.
//!
//! Everything here is total: malformed payloads yield
//! [`Preview::Unavailable`], never a panic.

use super::{classify, ContentCategory};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
    /// Readable plain text (plain-text, URL and file-URL payloads).
    Text(String),
    /// Markup source (HTML, RTF) for a rich renderer.
    Markup(String),
    /// Encoded image data; decoding is up to the viewer.
    Image,
    /// Nothing renderable.
    Unavailable,
}

const UTF16_TYPES: &[&str] = &["public.utf16-plain-text", "public.utf16-external-plain-text"];
const RTFD_TYPES: &[&str] = &["com.apple.rtfd", "com.apple.flat-rtfd", "next rtfd pasteboard type"];

pub fn preview(format: &str, payload: &[u8]) -> Preview {
    let lowered = format.trim().to_ascii_lowercase();
    if UTF16_TYPES.contains(&lowered.as_str()) {
        return decode_utf16(payload).map_or(Preview::Unavailable, Preview::Text);
    }

    match classify(format) {
        ContentCategory::Text if is_rich_text(&lowered) => {
            if RTFD_TYPES.contains(&lowered.as_str()) {
                Preview::Unavailable
            } else {
                decode_utf8(payload).map_or(Preview::Unavailable, Preview::Markup)
            }
        }
        ContentCategory::Html => decode_utf8(payload).map_or(Preview::Unavailable, Preview::Markup),
        ContentCategory::Text | ContentCategory::Url | ContentCategory::File => {
            decode_utf8(payload).map_or(Preview::Unavailable, Preview::Text)
        }
        ContentCategory::Image if !payload.is_empty() => Preview::Image,
        _ => Preview::Unavailable,
    }
}

fn is_rich_text(lowered: &str) -> bool {
    lowered.contains("rtf") || lowered.contains("rich text")
}

fn decode_utf8(payload: &[u8]) -> Option<String> {
    let payload = payload.strip_prefix(&[0xEFu8, 0xBB, 0xBF][..]).unwrap_or(payload);
    std::str::from_utf8(payload).ok().map(str::to_owned)
}

/// UTF-16 with an optional byte-order mark; little endian without one.
fn decode_utf16(payload: &[u8]) -> Option<String> {
    if payload.len() % 2 != 0 {
        return None;
    }
    let (big_endian, body) = match payload {
        [0xFE, 0xFF, rest @ ..] => (true, rest),
        [0xFF, 0xFE, rest @ ..] => (false, rest),
        _ => (false, payload),
    };
    let units: Vec<u16> = body
        .chunks_exact(2)
        .map(|pair| {
            if big_endian {
                u16::from_be_bytes([pair[0], pair[1]])
            } else {
                u16::from_le_bytes([pair[0], pair[1]])
            }
        })
        .collect();
    String::from_utf16(&units).ok()
}

/// File-style byte count (decimal units), e.g. `5 bytes`, `1.2 KB`.
pub fn format_byte_count(bytes: usize) -> String {
    const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];
    if bytes < 1000 {
        return if bytes == 1 {
            "1 byte".to_string()
        } else {
            format!("{bytes} bytes")
        };
    }
    let mut value = bytes as f64 / 1000.0;
    let mut unit = 0;
    // Compare the value as it will print, so 999_999 reads "1.0 MB".
    while (value * 10.0).round() >= 10_000.0 && unit < UNITS.len() - 1 {
        value /= 1000.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_preview() {
        assert_eq!(
            preview("public.utf8-plain-text", b"hello"),
            Preview::Text("hello".into())
        );
    }

    #[test]
    fn test_invalid_utf8_is_unavailable() {
        assert_eq!(
            preview("public.utf8-plain-text", &[0xff, 0xfe, 0xfd]),
            Preview::Unavailable
        );
    }

    #[test]
    fn test_utf16_with_and_without_bom() {
        let le: Vec<u8> = "hi".encode_utf16().flat_map(u16::to_le_bytes).collect();
        let mut be = vec![0xFE, 0xFF];
        be.extend("hi".encode_utf16().flat_map(u16::to_be_bytes));

        assert_eq!(
            preview("public.utf16-plain-text", &le),
            Preview::Text("hi".into())
        );
        assert_eq!(
            preview("public.utf16-external-plain-text", &be),
            Preview::Text("hi".into())
        );
        assert_eq!(
            preview("public.utf16-plain-text", &[0x68]),
            Preview::Unavailable
        );
    }

    #[test]
    fn test_markup_and_images() {
        assert_eq!(
            preview("public.html", b"<p>x</p>"),
            Preview::Markup("<p>x</p>".into())
        );
        assert_eq!(
            preview("public.rtf", br"{\rtf1 x}"),
            Preview::Markup(r"{\rtf1 x}".into())
        );
        assert_eq!(preview("com.apple.flat-rtfd", b"rtfd"), Preview::Unavailable);
        assert_eq!(preview("public.png", &[0x89, b'P']), Preview::Image);
        assert_eq!(preview("public.png", &[]), Preview::Unavailable);
    }

    #[test]
    fn test_unknown_format_is_unavailable() {
        assert_eq!(preview("com.example.blob", b"data"), Preview::Unavailable);
        assert_eq!(preview("", b""), Preview::Unavailable);
    }

    #[test]
    fn test_format_byte_count() {
        assert_eq!(format_byte_count(0), "0 bytes");
        assert_eq!(format_byte_count(1), "1 byte");
        assert_eq!(format_byte_count(999), "999 bytes");
        assert_eq!(format_byte_count(1_200), "1.2 KB");
        assert_eq!(format_byte_count(3_400_000), "3.4 MB");
    }

    #[test]
    fn test_format_byte_count_steps_up_when_rounding_reaches_next_unit() {
        assert_eq!(format_byte_count(999_949), "999.9 KB");
        assert_eq!(format_byte_count(999_999), "1.0 MB");
        assert_eq!(format_byte_count(999_960_000), "1.0 GB");
    }
}
