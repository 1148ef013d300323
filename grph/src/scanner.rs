//! Line-level scanning of tab-separated edge lists held in memory.
//!
//! The serializer runs several passes over the same input, so the
//! scanner borrows the byte range and hands out a fresh one-pass
//! iterator per call. Parsing stays on raw byte slices throughout.

use bstr::ByteSlice;

use crate::error::{CodecError, Result};

const MAX_ID: u64 = u32::MAX as u64;
const MAX_WEIGHT: u64 = 255;

/// A parsed edge line: two endpoints and a weight.
pub type Triple = (u32, u32, u8);

/// An iterator over byte slices separated by a delimiter.
/// The iterated-over slices won't contain the delimiter, but may be empty.
#[derive(Clone)]
pub struct DelimIter<'a> {
    bytes: &'a [u8],
    pos: usize,
    delim: u8,
}

impl<'a> DelimIter<'a> {
    pub fn new(bytes: &'a [u8], delim: u8) -> DelimIter<'a> {
        DelimIter {
            bytes,
            pos: 0,
            delim,
        }
    }
}

impl<'a> Iterator for DelimIter<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<&'a [u8]> {
        if self.pos == self.bytes.len() {
            None
        } else {
            let start = self.pos;
            let bytes = &self.bytes[start..];
            let (end, new_pos) = match bytes.find_byte(self.delim) {
                None => (bytes.len(), bytes.len()),
                Some(next_delim) => (next_delim, next_delim + 1),
            };
            self.pos = start + new_pos;
            Some(&bytes[..end])
        }
    }
}

/// Re-runnable scanner over a byte range of `u \t v \t w` lines.
///
/// Lines end with `\n` or `\r\n`; the final line may omit its
/// terminator. Lines made up solely of `\r` and `\n` bytes are skipped.
#[derive(Clone, Copy)]
pub struct Scanner<'a> {
    bytes: &'a [u8],
}

impl<'a> Scanner<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    /// A fresh pass over the underlying bytes.
    pub fn triples(&self) -> Triples<'a> {
        Triples {
            lines: DelimIter::new(self.bytes, b'\n'),
            line: 0,
            done: false,
        }
    }
}

/// One pass of parsed [`Triple`]s. Stops at the first error.
pub struct Triples<'a> {
    lines: DelimIter<'a>,
    line: u64,
    done: bool,
}

impl<'a> Triples<'a> {
    fn parse_uint(&self, digits: &[u8], limit: u64, what: &'static str) -> Result<u64> {
        if digits.is_empty() {
            return Err(CodecError::Parse {
                line: self.line,
                msg: "empty field",
            });
        }
        let mut value = 0u64;
        for &c in digits {
            if !c.is_ascii_digit() {
                return Err(CodecError::Parse {
                    line: self.line,
                    msg: "expected a decimal digit",
                });
            }
            value = value * 10 + u64::from(c - b'0');
            if value > limit {
                return Err(CodecError::Overflow {
                    line: self.line,
                    what,
                });
            }
        }
        Ok(value)
    }

    fn parse_line(&self, line: &[u8]) -> Result<Triple> {
        let mut fields = DelimIter::new(line, b'\t');
        match (fields.next(), fields.next(), fields.next(), fields.next()) {
            (Some(a), Some(b), Some(w), None) => {
                let a = self.parse_uint(a, MAX_ID, "vertex identifier")?;
                let b = self.parse_uint(b, MAX_ID, "vertex identifier")?;
                let w = self.parse_uint(w, MAX_WEIGHT, "edge weight")?;
                Ok((a as u32, b as u32, w as u8))
            }
            _ => Err(CodecError::Parse {
                line: self.line,
                msg: "expected three tab-separated fields",
            }),
        }
    }
}

impl<'a> Iterator for Triples<'a> {
    type Item = Result<Triple>;

    fn next(&mut self) -> Option<Result<Triple>> {
        if self.done {
            return None;
        }
        loop {
            let line = self.lines.next()?;
            self.line += 1;
            // blank separators: any run of \r and \n bytes
            if line.iter().all(|&c| c == b'\r') {
                continue;
            }
            let line = line.strip_suffix(b"\r").unwrap_or(line);
            let parsed = self.parse_line(line);
            if parsed.is_err() {
                self.done = true;
            }
            return Some(parsed);
        }
    }
}
