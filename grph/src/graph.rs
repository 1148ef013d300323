//! Compacted upper-triangle graph built from an edge list.

use std::time::Instant;

use serde_json::json;

use crate::error::{CodecError, Result};
use crate::scanner::Scanner;

pub(crate) type Vertex = u32;

/// An undirected weighted multigraph over a compacted vertex space.
///
/// Original `u32` identifiers are relabeled to the contiguous range
/// `[0, nvertices)` in ascending numeric order. Every non-loop edge is
/// held once, in the adjacency of its smaller compact endpoint, sorted
/// by neighbor; self-loops live in a separate list sorted by vertex.
/// Parallel edges keep one entry each.
pub struct CompactGraph {
    orig: Vec<u32>,
    offsets: Vec<usize>,
    entries: Vec<(Vertex, u8)>,
    loops: Vec<(Vertex, u8)>,
}

impl CompactGraph {
    /// Builds the graph in three passes over `input`: collect and
    /// sort-unique the endpoint identifiers, count upper degrees and
    /// loops, then fill and sort the adjacency. Peak transient memory
    /// is the endpoint buffer of the first pass.
    pub fn from_tsv(input: &[u8]) -> Result<Self> {
        let scanner = Scanner::new(input);

        let collect_start = Instant::now();
        let mut ids = Vec::with_capacity(input.len() / 8); // heuristic
        for triple in scanner.triples() {
            let (a, b, _) = triple?;
            ids.push(a);
            ids.push(b);
        }
        ids.sort_unstable();
        ids.dedup();
        ids.shrink_to_fit();
        let orig = ids;
        let n = orig.len();
        let collect_time = format!("{:.0?}", Instant::now().duration_since(collect_start));

        let index_of = |id: u32| -> Result<Vertex> {
            orig.binary_search(&id)
                .map(|i| i as Vertex)
                .map_err(|_| CodecError::Internal("endpoint missing from identifier table"))
        };

        let count_start = Instant::now();
        let mut degrees = vec![0usize; n];
        let mut nloops = 0usize;
        for triple in scanner.triples() {
            let (a, b, _) = triple?;
            let (ia, ib) = (index_of(a)?, index_of(b)?);
            if ia == ib {
                nloops += 1;
            } else {
                degrees[ia.min(ib) as usize] += 1;
            }
        }
        let mut offsets = Vec::with_capacity(n + 1);
        let mut cumsum = 0usize;
        offsets.push(0);
        for &d in &degrees {
            cumsum += d;
            offsets.push(cumsum);
        }
        let count_time = format!("{:.0?}", Instant::now().duration_since(count_start));

        let fill_start = Instant::now();
        let mut cursors = degrees;
        cursors.copy_from_slice(&offsets[..n]);
        let mut entries = vec![(0 as Vertex, 0u8); cumsum];
        let mut loops = Vec::with_capacity(nloops);
        for triple in scanner.triples() {
            let (a, b, w) = triple?;
            let (ia, ib) = (index_of(a)?, index_of(b)?);
            if ia == ib {
                loops.push((ia, w));
            } else {
                let u = ia.min(ib) as usize;
                entries[cursors[u]] = (ia.max(ib), w);
                cursors[u] += 1;
            }
        }
        let fill_time = format!("{:.0?}", Instant::now().duration_since(fill_start));

        let sort_start = Instant::now();
        for s in offsets.windows(2) {
            entries[s[0]..s[1]].sort_unstable_by_key(|&(j, _)| j);
        }
        loops.sort_unstable_by_key(|&(v, _)| v);
        let sort_time = format!("{:.0?}", Instant::now().duration_since(sort_start));

        println!(
            "{}",
            json!({
                "collect_time": collect_time,
                "count_time": count_time,
                "fill_time": fill_time,
                "sort_time": sort_time,
            })
        );

        debug_assert!(orig.windows(2).all(|s| s[0] < s[1]));
        debug_assert!(loops.windows(2).all(|s| s[0].0 <= s[1].0));
        debug_assert!(offsets.windows(2).enumerate().all(|(i, s)| {
            entries[s[0]..s[1]].windows(2).all(|e| e[0].0 <= e[1].0)
                && entries[s[0]..s[1]].iter().all(|&(j, _)| j > i as Vertex)
        }));

        Ok(Self {
            orig,
            offsets,
            entries,
            loops,
        })
    }

    pub fn nvertices(&self) -> usize {
        self.orig.len()
    }

    /// Total edge count, self-loops included.
    pub fn nedges(&self) -> u64 {
        (self.entries.len() + self.loops.len()) as u64
    }

    pub fn nloops(&self) -> usize {
        self.loops.len()
    }

    /// Original identifiers by compact index, strictly ascending.
    pub fn original_ids(&self) -> &[u32] {
        &self.orig
    }

    /// Upper-adjacency entries of `v`: `(neighbor, weight)` pairs with
    /// `neighbor > v`, sorted by neighbor.
    pub fn upper_neighbors(&self, v: Vertex) -> &[(Vertex, u8)] {
        let v = v as usize;
        &self.entries[self.offsets[v]..self.offsets[v + 1]]
    }

    pub fn degree(&self, v: Vertex) -> usize {
        let v = v as usize;
        self.offsets[v + 1] - self.offsets[v]
    }

    /// Self-loop `(vertex, weight)` pairs, sorted by vertex.
    pub fn loops(&self) -> &[(Vertex, u8)] {
        &self.loops
    }

    /// Snapshot of the upper-degree distribution. Every vertex counts
    /// only its entries above the diagonal, so vertices that appear
    /// solely as larger endpoints report zero. An empty graph reports
    /// zeros throughout.
    pub fn degree_summary(&self) -> DegreeSummary {
        let mut degrees: Vec<usize> = self.offsets.windows(2).map(|s| s[1] - s[0]).collect();
        degrees.sort_unstable();
        let n = degrees.len();
        let at = |q: f64| {
            if n == 0 {
                0
            } else {
                degrees[((n - 1) as f64 * q) as usize]
            }
        };
        DegreeSummary {
            mean: if n == 0 {
                0.0
            } else {
                self.entries.len() as f64 / n as f64
            },
            median: at(0.5),
            p90: at(0.9),
            p99: at(0.99),
            max: degrees.last().copied().unwrap_or(0),
        }
    }
}

/// Upper-degree distribution of a built graph.
pub struct DegreeSummary {
    pub mean: f64,
    pub median: usize,
    pub p90: usize,
    pub p99: usize,
    pub max: usize,
}
