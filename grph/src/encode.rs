//! Binary emission of a [`CompactGraph`].
//!
//! Layout (all fixed-width integers little-endian): the six header
//! bytes, `varu N`, `varu M`, the delta-coded identifier mapping, one
//! delta-coded upper-adjacency run per vertex, then the loop section.
//! An empty graph stops after `M`.

use std::io::Write;

use crate::error::Result;
use crate::graph::{CompactGraph, Vertex};
use crate::writer::BinWriter;
use crate::{ENDIAN_LITTLE, FORMAT_VERSION, MAGIC};

/// Serializes a TSV edge list into the binary graph format.
pub fn serialize<W: Write>(input: &[u8], out: W) -> Result<()> {
    let graph = CompactGraph::from_tsv(input)?;
    write_binary(&graph, out)
}

/// Writes the version-2 binary image of `graph`.
pub fn write_binary<W: Write>(graph: &CompactGraph, out: W) -> Result<()> {
    let mut w = BinWriter::new(out);
    w.put_bytes(&MAGIC)?;
    w.put_u8(FORMAT_VERSION)?;
    w.put_u8(ENDIAN_LITTLE)?;
    w.put_varu(graph.nvertices() as u64)?;
    w.put_varu(graph.nedges())?;
    if graph.nvertices() == 0 {
        return w.finish();
    }

    let orig = graph.original_ids();
    w.put_u32_le(orig[0])?;
    for s in orig.windows(2) {
        w.put_varu(u64::from(s[1] - s[0]))?;
    }

    for i in 0..graph.nvertices() {
        let row = graph.upper_neighbors(i as Vertex);
        w.put_varu(row.len() as u64)?;
        let mut prev = i as Vertex;
        for &(j, weight) in row {
            w.put_varu(u64::from(j - prev))?;
            w.put_u8(weight)?;
            prev = j;
        }
    }

    let loops = graph.loops();
    w.put_varu(loops.len() as u64)?;
    let mut prev: Vertex = 0;
    for &(v, weight) in loops {
        w.put_varu(u64::from(v - prev))?;
        w.put_u8(weight)?;
        prev = v;
    }

    w.finish()
}
