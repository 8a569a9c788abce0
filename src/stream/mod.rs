//! Delimited path-stream framing.
//!
//! The input side splits a byte stream into path tokens on a chosen
//! delimiter (NUL for `find -print0` pipelines, newline for everything
//! else). The output side renders one token per positive, terminated by
//! the configured delimiter and nothing else, so the report can be fed
//! straight into `xargs -0` and friends.

use std::borrow::Cow;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

/// Token separator for the input stream and the positive report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Nul,
    Newline,
}

impl Delimiter {
    pub fn byte(self) -> u8 {
        match self {
            Delimiter::Nul => b'\0',
            Delimiter::Newline => b'\n',
        }
    }
}

/// Iterator over delimiter-separated tokens from a buffered reader.
///
/// Empty spans produced by leading, trailing, or consecutive delimiters
/// are skipped, and bytes after the final delimiter form a last token.
/// The stream is consumed once, in order, one token in flight at a
/// time. After end-of-stream or a read error the iterator is fused.
pub struct Tokens<R> {
    reader: R,
    delimiter: u8,
    done: bool,
}

impl<R: BufRead> Tokens<R> {
    pub fn new(reader: R, delimiter: Delimiter) -> Self {
        Tokens {
            reader,
            delimiter: delimiter.byte(),
            done: false,
        }
    }
}

impl<R: BufRead> Iterator for Tokens<R> {
    type Item = io::Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            let mut token = Vec::new();
            match self.reader.read_until(self.delimiter, &mut token) {
                Ok(0) => {
                    self.done = true;
                    return None;
                }
                Ok(_) => {
                    if token.last() == Some(&self.delimiter) {
                        token.pop();
                    } else {
                        // Trailing bytes with no final delimiter.
                        self.done = true;
                    }
                    if token.is_empty() {
                        if self.done {
                            return None;
                        }
                        continue;
                    }
                    return Some(Ok(token));
                }
                Err(err) => {
                    self.done = true;
                    return Some(Err(err));
                }
            }
        }
    }
}

/// Write one token followed by exactly one delimiter byte.
pub fn write_token<W: Write>(writer: &mut W, token: &[u8], delimiter: Delimiter) -> io::Result<()> {
    writer.write_all(token)?;
    writer.write_all(&[delimiter.byte()])
}

/// Convert a raw input token into a path, losslessly on Unix.
#[cfg(unix)]
pub fn token_to_path(token: Vec<u8>) -> PathBuf {
    use std::ffi::OsString;
    use std::os::unix::ffi::OsStringExt;

    PathBuf::from(OsString::from_vec(token))
}

#[cfg(not(unix))]
pub fn token_to_path(token: Vec<u8>) -> PathBuf {
    PathBuf::from(String::from_utf8_lossy(&token).into_owned())
}

/// Borrow a path's bytes for rendering, losslessly on Unix.
#[cfg(unix)]
pub fn path_to_token(path: &Path) -> Cow<'_, [u8]> {
    use std::os::unix::ffi::OsStrExt;

    Cow::Borrowed(path.as_os_str().as_bytes())
}

#[cfg(not(unix))]
pub fn path_to_token(path: &Path) -> Cow<'_, [u8]> {
    Cow::Owned(path.to_string_lossy().into_owned().into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufReader, Read};

    fn collect(input: &[u8], delimiter: Delimiter) -> Vec<Vec<u8>> {
        Tokens::new(input, delimiter)
            .map(|token| token.unwrap())
            .collect()
    }

    #[test]
    fn splits_on_nul() {
        let tokens = collect(b"a\0b\0c\0", Delimiter::Nul);
        assert_eq!(tokens, vec![b"a".to_vec(), b"b".to_vec(), b"c".to_vec()]);
    }

    #[test]
    fn splits_on_newline() {
        let tokens = collect(b"a\nbc\n", Delimiter::Newline);
        assert_eq!(tokens, vec![b"a".to_vec(), b"bc".to_vec()]);
    }

    #[test]
    fn skips_leading_trailing_and_consecutive_delimiters() {
        let tokens = collect(b"\0\0a\0\0\0b\0\0", Delimiter::Nul);
        assert_eq!(tokens, vec![b"a".to_vec(), b"b".to_vec()]);
    }

    #[test]
    fn yields_final_token_without_trailing_delimiter() {
        let tokens = collect(b"a\nb", Delimiter::Newline);
        assert_eq!(tokens, vec![b"a".to_vec(), b"b".to_vec()]);
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(collect(b"", Delimiter::Nul).is_empty());
        assert!(collect(b"\0\0\0", Delimiter::Nul).is_empty());
        assert!(collect(b"\n", Delimiter::Newline).is_empty());
    }

    #[test]
    fn delimiter_bytes_do_not_cross_modes() {
        // Newlines are ordinary path bytes in NUL mode.
        let tokens = collect(b"a\nb\0c\0", Delimiter::Nul);
        assert_eq!(tokens, vec![b"a\nb".to_vec(), b"c".to_vec()]);
    }

    #[test]
    fn join_then_tokenize_round_trips() {
        let paths: Vec<&[u8]> = vec![b"/mnt/usb/._a", b"._b", b"dir with space/._c"];
        for delimiter in [Delimiter::Nul, Delimiter::Newline] {
            let mut joined = Vec::new();
            for path in &paths {
                write_token(&mut joined, path, delimiter).unwrap();
            }
            let tokens = collect(&joined, delimiter);
            assert_eq!(tokens, paths.iter().map(|p| p.to_vec()).collect::<Vec<_>>());
        }
    }

    #[test]
    fn write_token_appends_exactly_one_delimiter() {
        let mut out = Vec::new();
        write_token(&mut out, b"._photo.jpg", Delimiter::Nul).unwrap();
        assert_eq!(out, b"._photo.jpg\0");

        let mut out = Vec::new();
        write_token(&mut out, b"._photo.jpg", Delimiter::Newline).unwrap();
        assert_eq!(out, b"._photo.jpg\n");
    }

    struct BrokenReader;

    impl Read for BrokenReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("stream torn"))
        }
    }

    #[test]
    fn read_error_is_yielded_once_then_fused() {
        let mut tokens = Tokens::new(BufReader::new(BrokenReader), Delimiter::Nul);
        assert!(tokens.next().unwrap().is_err());
        assert!(tokens.next().is_none());
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_tokens_round_trip_through_paths() {
        let raw = b"/mnt/usb/._caf\xff".to_vec();
        let path = token_to_path(raw.clone());
        assert_eq!(path_to_token(&path).as_ref(), raw.as_slice());
    }
}
