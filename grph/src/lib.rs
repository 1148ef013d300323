//! # `grph` - compact binary codec for sparse weighted graphs
//!
//! Converts between tab-separated edge lists (`u \t v \t w` with `u`,
//! `v` drawn sparsely from the `u32` range and `w` a single byte) and a
//! compact binary encoding. Endpoint identifiers are relabeled to a
//! dense range in ascending order; each non-loop edge is stored once in
//! the upper adjacency of its smaller endpoint with delta-plus-varint
//! neighbor coding; self-loops sit in their own delta-coded section.
//!
//! ## Binary layout
//!
//! All fixed-width integers are little-endian; `varu` is unsigned
//! LEB128.
//!
//! ```text
//! "GRPH"  version  endian=1
//! v2: varu N   varu M       v1: u32 N   u64 M
//! v2: u32 orig[0], then N-1 ascending varu deltas
//! v1: N x u32 originals
//! per vertex i: varu deg, then deg x (varu gap from prev=i, u8 weight)
//! loops: varu L, then L x (varu delta from prev=0, u8 weight)
//! ```
//!
//! Writers emit version 2; readers accept 1 and 2. Round-tripping
//! preserves the edge multiset up to endpoint swaps and line order.

pub mod decode;
pub mod encode;
mod error;
pub mod graph;
mod scanner;
mod varint;
pub mod writer;

pub use decode::deserialize;
pub use encode::serialize;
pub use error::{CodecError, Result};
pub use graph::{CompactGraph, DegreeSummary};
pub use scanner::{DelimIter, Scanner, Triple, Triples};

/// First four bytes of every binary image.
pub const MAGIC: [u8; 4] = *b"GRPH";
/// Format version the serializer writes; the reader also accepts 1.
pub const FORMAT_VERSION: u8 = 2;
/// Header marker for little-endian payloads, the only supported value.
pub const ENDIAN_LITTLE: u8 = 1;
