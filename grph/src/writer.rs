//! Buffered binary and text emitters.
//!
//! Both wrap the sink in a 64 KiB `BufWriter`. `finish` flushes and
//! surfaces the error; dropping an unfinished writer still flushes
//! best-effort through `BufWriter`.

use std::io::{BufWriter, Write};

use crate::error::Result;
use crate::varint;

const BUFSIZE: usize = 64 * 1024;

/// Little-endian binary writer with varint support.
pub struct BinWriter<W: Write> {
    out: BufWriter<W>,
}

impl<W: Write> BinWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: BufWriter::with_capacity(BUFSIZE, out),
        }
    }

    pub fn put_u8(&mut self, b: u8) -> Result<()> {
        self.out.write_all(&[b])?;
        Ok(())
    }

    pub fn put_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.out.write_all(bytes)?;
        Ok(())
    }

    pub fn put_u32_le(&mut self, x: u32) -> Result<()> {
        self.out.write_all(&x.to_le_bytes())?;
        Ok(())
    }

    pub fn put_u64_le(&mut self, x: u64) -> Result<()> {
        self.out.write_all(&x.to_le_bytes())?;
        Ok(())
    }

    pub fn put_varu(&mut self, x: u64) -> Result<()> {
        varint::write(&mut self.out, x)?;
        Ok(())
    }

    pub fn finish(mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

/// Decimal TSV writer for edge lines.
pub struct TextWriter<W: Write> {
    out: BufWriter<W>,
}

impl<W: Write> TextWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: BufWriter::with_capacity(BUFSIZE, out),
        }
    }

    pub fn put_edge(&mut self, u: u32, v: u32, w: u8) -> Result<()> {
        writeln!(self.out, "{}\t{}\t{}", u, v, w)?;
        Ok(())
    }

    pub fn finish(mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_fields_are_little_endian() {
        let mut sink = Vec::new();
        let mut w = BinWriter::new(&mut sink);
        w.put_u8(0xab).unwrap();
        w.put_u32_le(0x0102_0304).unwrap();
        w.put_u64_le(1).unwrap();
        w.put_varu(300).unwrap();
        w.finish().unwrap();
        assert_eq!(
            sink,
            [0xab, 0x04, 0x03, 0x02, 0x01, 1, 0, 0, 0, 0, 0, 0, 0, 0xac, 0x02]
        );
    }

    #[test]
    fn text_edges_are_plain_decimal() {
        let mut sink = Vec::new();
        let mut w = TextWriter::new(&mut sink);
        w.put_edge(0, 4_294_967_295, 0).unwrap();
        w.put_edge(3, 5, 9).unwrap();
        w.finish().unwrap();
        assert_eq!(sink, b"0\t4294967295\t0\n3\t5\t9\n");
    }
}
