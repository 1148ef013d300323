//! Reconstruction of the TSV edge list from a binary image.
//!
//! A single forward pass: header, identifier mapping, then one emitted
//! line per adjacency entry and per loop. Bytes past the loop section
//! are ignored.

use std::io::Write;

use crate::error::{CodecError, Result};
use crate::varint;
use crate::writer::TextWriter;
use crate::{ENDIAN_LITTLE, MAGIC};

/// Magic, version, and endian marker.
const HEADER_LEN: usize = 6;

/// Cursor over the in-memory binary image.
struct ByteReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn take(&mut self, n: usize, what: &'static str) -> Result<&'a [u8]> {
        if self.bytes.len() - self.pos < n {
            return Err(CodecError::UnexpectedEof(what));
        }
        let slice = &self.bytes[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn u8(&mut self, what: &'static str) -> Result<u8> {
        Ok(self.take(1, what)?[0])
    }

    fn u32_le(&mut self, what: &'static str) -> Result<u32> {
        let mut buf = [0u8; 4];
        buf.copy_from_slice(self.take(4, what)?);
        Ok(u32::from_le_bytes(buf))
    }

    fn u64_le(&mut self, what: &'static str) -> Result<u64> {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(self.take(8, what)?);
        Ok(u64::from_le_bytes(buf))
    }

    fn varu(&mut self) -> Result<u64> {
        varint::read(self.bytes, &mut self.pos)
    }
}

/// Deserializes a binary graph image into TSV edge lines on `out`.
///
/// Accepts format versions 1 and 2. Lines come out in deterministic
/// order: ascending row, ascending neighbor, then loops.
pub fn deserialize<W: Write>(input: &[u8], out: W) -> Result<()> {
    if input.len() < HEADER_LEN {
        return Err(CodecError::BadHeader("file shorter than minimal header"));
    }
    let mut r = ByteReader::new(input);
    if r.take(4, "magic")? != MAGIC {
        return Err(CodecError::BadHeader("bad magic, expected \"GRPH\""));
    }
    let version = r.u8("version")?;
    if version != 1 && version != 2 {
        return Err(CodecError::BadHeader("unsupported version"));
    }
    if r.u8("endian marker")? != ENDIAN_LITTLE {
        return Err(CodecError::BadHeader("unsupported endianness"));
    }

    // M is carried in the header but nothing cross-checks it on read.
    let (n, _m_total) = if version == 1 {
        (u64::from(r.u32_le("vertex count")?), r.u64_le("edge count")?)
    } else {
        (r.varu()?, r.varu()?)
    };
    if n > u64::from(u32::MAX) {
        return Err(CodecError::BadHeader("vertex count exceeds the u32 identifier space"));
    }
    let n = n as usize;
    if n == 0 {
        // an empty graph carries no mapping, adjacency, or loop section
        return TextWriter::new(out).finish();
    }

    // A valid mapping spends at least one input byte per vertex, so a
    // corrupt count cannot force an allocation past the input size.
    let mut orig: Vec<u32> = Vec::with_capacity(n.min(input.len()));
    if version == 1 {
        for _ in 0..n {
            orig.push(r.u32_le("identifier mapping")?);
        }
    } else {
        let mut prev = r.u32_le("identifier mapping")?;
        orig.push(prev);
        for _ in 1..n {
            let id = u64::from(prev).checked_add(r.varu()?);
            match id {
                Some(id) if id <= u64::from(u32::MAX) => prev = id as u32,
                _ => return Err(CodecError::CorruptMapping("identifier delta overflows u32")),
            }
            orig.push(prev);
        }
    }

    let mut w = TextWriter::new(out);
    for i in 0..n {
        let deg = r.varu()?;
        let mut prev = i as u32;
        for _ in 0..deg {
            let j = match u64::from(prev).checked_add(r.varu()?) {
                Some(j) if j < n as u64 => j,
                _ => return Err(CodecError::CorruptAdjacency("neighbor index out of range")),
            };
            let weight = r.u8("edge weight")?;
            w.put_edge(orig[i], orig[j as usize], weight)?;
            prev = j as u32;
        }
    }

    let nloops = r.varu()?;
    let mut prev = 0u32;
    for _ in 0..nloops {
        let v = match u64::from(prev).checked_add(r.varu()?) {
            Some(v) if v < n as u64 => v,
            _ => return Err(CodecError::CorruptLoops("loop vertex out of range")),
        };
        let weight = r.u8("loop weight")?;
        let id = orig[v as usize];
        w.put_edge(id, id, weight)?;
        prev = v as u32;
    }

    w.finish()
}
