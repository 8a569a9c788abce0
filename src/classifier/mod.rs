//! AppleDouble detection: filename convention plus content magic.
//!
//! A candidate is positive only when both checks agree: the basename
//! carries the `._` sidecar prefix and the file starts with the fixed
//! AppleDouble signature. Everything is computed fresh per path; there
//! is no caching and no shared state.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// First four bytes of every AppleDouble file, fixed by the format.
pub const MAGIC: [u8; 4] = [0x00, 0x05, 0x16, 0x07];

/// Outcome of classifying a single candidate path.
#[derive(Debug, Default)]
pub struct Classification {
    /// The final path component begins with `._`.
    pub filename_matches: bool,
    /// The first four bytes equal [`MAGIC`]. Only meaningful when
    /// `filename_matches` is true; the file is never opened otherwise.
    pub content_matches: bool,
    /// Open or read failure. Short reads and empty files are not errors.
    pub error: Option<io::Error>,
}

impl Classification {
    /// True when both the naming convention and the magic number matched.
    pub fn is_positive(&self) -> bool {
        self.filename_matches && self.content_matches
    }
}

/// Whether the final path component carries the `._` sidecar prefix.
///
/// Compares raw bytes so non-UTF-8 components classify correctly.
pub fn has_sidecar_name(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.as_encoded_bytes().starts_with(b"._"))
        .unwrap_or(false)
}

/// Classify one candidate path.
///
/// The filename check runs first so the common case of a non-candidate
/// costs no I/O at all, and content inspection is bounded to the four
/// magic bytes regardless of file size.
pub fn classify(path: &Path) -> Classification {
    if !has_sidecar_name(path) {
        return Classification::default();
    }

    match read_magic(path) {
        Ok(Some(bytes)) => Classification {
            filename_matches: true,
            content_matches: bytes == MAGIC,
            error: None,
        },
        Ok(None) => Classification {
            filename_matches: true,
            content_matches: false,
            error: None,
        },
        Err(err) => Classification {
            filename_matches: true,
            content_matches: false,
            error: Some(err),
        },
    }
}

/// Read the first four bytes of `path`.
///
/// `Ok(None)` means the file ended before four bytes were available
/// (including the empty file), which callers treat as a plain mismatch.
/// The handle is dropped on every exit path.
fn read_magic(path: &Path) -> io::Result<Option<[u8; 4]>> {
    let mut file = File::open(path)?;
    let mut magic = [0u8; 4];
    match file.read_exact(&mut magic) {
        Ok(()) => Ok(Some(magic)),
        Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
        Err(err) => Err(err),
    }
}
