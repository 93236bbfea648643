//! `NSPasteboard` adapter.
//!
//! Holds no Objective-C objects between calls: each operation looks the
//! pasteboard up by name inside its own autorelease pool, so the adapter is
//! `Send + Sync` and can be polled from any runtime thread.

use std::ffi::{CStr, CString};

use cocoa::base::{id, nil, BOOL, NO};
use cocoa::foundation::NSAutoreleasePool;
use objc::{class, msg_send, sel, sel_impl};
use tracing::{debug, debug_span};

use ps_core::ports::{PasteboardError, PasteboardPort};
use ps_core::{FormatId, ItemGroup, PasteboardKind, SourceApplication};

/// Value of AppKit's `NSDragPboard` constant.
const DRAG_PASTEBOARD_NAME: &str = "Apple CFPasteboard drag";

pub struct MacOsPasteboard {
    kind: PasteboardKind,
}

impl MacOsPasteboard {
    pub fn new(kind: PasteboardKind) -> Self {
        Self { kind }
    }

    fn with_pasteboard<T>(
        &self,
        f: impl FnOnce(id) -> Result<T, PasteboardError>,
    ) -> Result<T, PasteboardError> {
        unsafe {
            let pool = NSAutoreleasePool::new(nil);
            let result = match self.pasteboard() {
                Ok(pasteboard) => f(pasteboard),
                Err(err) => Err(err),
            };
            pool.drain();
            result
        }
    }

    unsafe fn pasteboard(&self) -> Result<id, PasteboardError> {
        let pasteboard: id = match self.kind {
            PasteboardKind::General => msg_send![class!(NSPasteboard), generalPasteboard],
            PasteboardKind::Drag => {
                let name = ns_string(DRAG_PASTEBOARD_NAME)?;
                msg_send![class!(NSPasteboard), pasteboardWithName: name]
            }
        };
        if pasteboard == nil {
            return Err(PasteboardError::Unavailable(format!(
                "no {} pasteboard",
                self.kind
            )));
        }
        Ok(pasteboard)
    }

    unsafe fn item(pasteboard: id, index: usize) -> Result<id, PasteboardError> {
        let items: id = msg_send![pasteboard, pasteboardItems];
        if items == nil {
            return Err(PasteboardError::ItemUnavailable { index });
        }
        let count: usize = msg_send![items, count];
        if index >= count {
            return Err(PasteboardError::ItemUnavailable { index });
        }
        let item: id = msg_send![items, objectAtIndex: index];
        if item == nil {
            return Err(PasteboardError::ItemUnavailable { index });
        }
        Ok(item)
    }
}

impl PasteboardPort for MacOsPasteboard {
    fn kind(&self) -> PasteboardKind {
        self.kind
    }

    fn change_count(&self) -> Result<i64, PasteboardError> {
        self.with_pasteboard(|pasteboard| unsafe {
            let count: isize = msg_send![pasteboard, changeCount];
            Ok(count as i64)
        })
    }

    fn item_count(&self) -> Result<usize, PasteboardError> {
        self.with_pasteboard(|pasteboard| unsafe {
            let items: id = msg_send![pasteboard, pasteboardItems];
            if items == nil {
                return Ok(0);
            }
            let count: usize = msg_send![items, count];
            Ok(count)
        })
    }

    fn item_types(&self, index: usize) -> Result<Vec<FormatId>, PasteboardError> {
        self.with_pasteboard(|pasteboard| unsafe {
            let item = Self::item(pasteboard, index)?;
            let types: id = msg_send![item, types];
            if types == nil {
                return Err(PasteboardError::ItemUnavailable { index });
            }
            let count: usize = msg_send![types, count];
            let mut formats = Vec::with_capacity(count);
            for i in 0..count {
                let ty: id = msg_send![types, objectAtIndex: i];
                if let Some(name) = rust_string(ty) {
                    formats.push(FormatId::from(name));
                }
            }
            Ok(formats)
        })
    }

    fn item_data(&self, index: usize, format: &str) -> Result<Vec<u8>, PasteboardError> {
        self.with_pasteboard(|pasteboard| unsafe {
            let item = Self::item(pasteboard, index)?;
            let ty = ns_string(format)?;
            let data: id = msg_send![item, dataForType: ty];
            if data == nil {
                return Err(PasteboardError::PayloadUnavailable {
                    format: format.to_string(),
                });
            }
            let length: usize = msg_send![data, length];
            if length == 0 {
                return Ok(Vec::new());
            }
            let bytes: *const u8 = msg_send![data, bytes];
            if bytes.is_null() {
                return Err(PasteboardError::PayloadUnavailable {
                    format: format.to_string(),
                });
            }
            Ok(std::slice::from_raw_parts(bytes, length).to_vec())
        })
    }

    fn clear(&self) -> Result<(), PasteboardError> {
        self.with_pasteboard(|pasteboard| unsafe {
            let _: isize = msg_send![pasteboard, clearContents];
            Ok(())
        })
    }

    fn write_items(&self, groups: &[ItemGroup]) -> Result<(), PasteboardError> {
        let span = debug_span!("platform.macos.write_items", kind = %self.kind, items = groups.len());
        span.in_scope(|| {
            self.with_pasteboard(|pasteboard| unsafe {
                let array: id = msg_send![class!(NSMutableArray), arrayWithCapacity: groups.len()];
                for group in groups {
                    let item = pasteboard_item(self.kind, group)?;
                    let _: () = msg_send![array, addObject: item];
                    let _: () = msg_send![item, release];
                }
                let written: BOOL = msg_send![pasteboard, writeObjects: array];
                if written == NO {
                    return Err(PasteboardError::WriteRejected(format!(
                        "{} pasteboard refused {} item(s)",
                        self.kind,
                        groups.len()
                    )));
                }
                Ok(())
            })
        })
    }

    /// Bundle path of the frontmost application.
    ///
    /// By the time a change is polled the writer may already have lost
    /// focus, so this is only a guess.
    fn foreground_application(&self) -> Option<SourceApplication> {
        unsafe {
            let pool = NSAutoreleasePool::new(nil);
            let workspace: id = msg_send![class!(NSWorkspace), sharedWorkspace];
            let frontmost: id = if workspace == nil {
                nil
            } else {
                msg_send![workspace, frontmostApplication]
            };
            let location = if frontmost == nil {
                None
            } else {
                let url: id = msg_send![frontmost, bundleURL];
                let path = if url == nil {
                    None
                } else {
                    let path: id = msg_send![url, path];
                    rust_string(path)
                };
                path.or_else(|| {
                    let bundle_id: id = msg_send![frontmost, bundleIdentifier];
                    rust_string(bundle_id)
                })
            };
            pool.drain();
            location.map(SourceApplication::new)
        }
    }
}

/// Returns a `+1` retained `NSPasteboardItem` holding every type of `group`.
/// Nothing is leaked when a type cannot be set.
unsafe fn pasteboard_item(kind: PasteboardKind, group: &ItemGroup) -> Result<id, PasteboardError> {
    let item: id = msg_send![class!(NSPasteboardItem), new];
    if item == nil {
        return Err(PasteboardError::Unavailable(
            "cannot allocate pasteboard item".to_string(),
        ));
    }
    match fill_item(item, kind, group) {
        Ok(()) => Ok(item),
        Err(err) => {
            let _: () = msg_send![item, release];
            Err(err)
        }
    }
}

unsafe fn fill_item(item: id, kind: PasteboardKind, group: &ItemGroup) -> Result<(), PasteboardError> {
    for (format, payload) in group.iter() {
        let ty = ns_string(format.as_str())?;
        let data: id = msg_send![class!(NSData), dataWithBytes: payload.as_ptr() length: payload.len()];
        let accepted: BOOL = msg_send![item, setData: data forType: ty];
        if accepted == NO {
            debug!(%format, "Pasteboard item refused type");
            return Err(PasteboardError::type_refused(kind, format.as_str()));
        }
    }
    Ok(())
}

unsafe fn ns_string(s: &str) -> Result<id, PasteboardError> {
    let c_string = CString::new(s)
        .map_err(|_| PasteboardError::Unavailable(format!("type name contains NUL: {s:?}")))?;
    let ns: id = msg_send![class!(NSString), stringWithUTF8String: c_string.as_ptr()];
    if ns == nil {
        return Err(PasteboardError::Unavailable(format!(
            "cannot convert {s:?} to NSString"
        )));
    }
    Ok(ns)
}

unsafe fn rust_string(ns: id) -> Option<String> {
    if ns == nil {
        return None;
    }
    let c_str: *const std::os::raw::c_char = msg_send![ns, UTF8String];
    if c_str.is_null() {
        return None;
    }
    Some(CStr::from_ptr(c_str).to_string_lossy().into_owned())
}
