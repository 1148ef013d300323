//! Property tests: round-trip multiset identity, determinism, and the
//! canonical shape of produced binaries, checked by an independent
//! walker over the raw bytes.

use std::collections::BTreeMap;

use proptest::prelude::*;

use grph::{deserialize, serialize};

type Edge = (u32, u32, u8);
type Multiset = BTreeMap<(u32, u32, u8), usize>;

fn render(edges: &[Edge]) -> Vec<u8> {
    let mut text = Vec::new();
    for &(u, v, w) in edges {
        text.extend_from_slice(format!("{}\t{}\t{}\n", u, v, w).as_bytes());
    }
    text
}

fn canonical(edges: impl Iterator<Item = Edge>) -> Multiset {
    let mut counts = BTreeMap::new();
    for (u, v, w) in edges {
        *counts.entry((u.min(v), u.max(v), w)).or_insert(0) += 1;
    }
    counts
}

fn parse_text(text: &[u8]) -> Vec<Edge> {
    String::from_utf8(text.to_vec())
        .expect("utf-8 output")
        .lines()
        .map(|line| {
            let mut fields = line.split('\t');
            (
                fields.next().unwrap().parse().unwrap(),
                fields.next().unwrap().parse().unwrap(),
                fields.next().unwrap().parse().unwrap(),
            )
        })
        .collect()
}

fn roundtrip(edges: &[Edge]) -> (Vec<u8>, Multiset) {
    let text = render(edges);
    let mut binary = Vec::new();
    serialize(&text, &mut binary).expect("serialize");
    let mut out = Vec::new();
    deserialize(&binary, &mut out).expect("deserialize");
    (binary, canonical(parse_text(&out).into_iter()))
}

/// Minimal varint reader kept separate from the crate's decoder.
fn varu(bytes: &[u8], pos: &mut usize) -> u64 {
    let mut value = 0u64;
    let mut shift = 0;
    loop {
        let b = bytes[*pos];
        *pos += 1;
        value |= u64::from(b & 0x7f) << shift;
        if b & 0x80 == 0 {
            return value;
        }
        shift += 7;
    }
}

/// Walks a version-2 image and asserts every format invariant: header
/// bytes, strictly ascending mapping, non-decreasing neighbor runs with
/// in-range indices, non-decreasing loop vertices, and an edge count
/// matching the header.
fn assert_canonical_shape(binary: &[u8]) {
    assert_eq!(&binary[..6], b"GRPH\x02\x01");
    let mut pos = 6;
    let n = varu(binary, &mut pos);
    let m = varu(binary, &mut pos);
    if n == 0 {
        assert_eq!(m, 0);
        assert_eq!(pos, binary.len());
        return;
    }

    let mut orig = vec![u32::from_le_bytes([
        binary[pos],
        binary[pos + 1],
        binary[pos + 2],
        binary[pos + 3],
    ])];
    pos += 4;
    for _ in 1..n {
        let delta = varu(binary, &mut pos);
        assert!(delta > 0, "mapping must ascend strictly");
        let next = u64::from(*orig.last().unwrap()) + delta;
        assert!(next <= u64::from(u32::MAX));
        orig.push(next as u32);
    }

    let mut edges = 0u64;
    for i in 0..n {
        let deg = varu(binary, &mut pos);
        let mut prev = i;
        for k in 0..deg {
            let gap = varu(binary, &mut pos);
            if k == 0 {
                assert!(gap > 0, "first neighbor must lie above the diagonal");
            }
            prev += gap;
            assert!(prev < n, "neighbor index out of range");
            pos += 1; // weight
            edges += 1;
        }
    }

    let nloops = varu(binary, &mut pos);
    let mut prev = 0;
    for _ in 0..nloops {
        prev += varu(binary, &mut pos);
        assert!(prev < n, "loop vertex out of range");
        pos += 1; // weight
        edges += 1;
    }

    assert_eq!(pos, binary.len(), "no bytes past the loop section");
    assert_eq!(edges, m, "header edge count matches the sections");
}

fn sparse_edges() -> impl Strategy<Value = Vec<Edge>> {
    proptest::collection::vec((any::<u32>(), any::<u32>(), any::<u8>()), 0..200)
}

/// Few distinct identifiers, so duplicates, swaps, and loops abound.
fn dense_edges() -> impl Strategy<Value = Vec<Edge>> {
    proptest::collection::vec((0u32..8, 0u32..8, any::<u8>()), 0..100)
}

proptest! {
    #[test]
    fn roundtrip_preserves_the_edge_multiset(edges in sparse_edges()) {
        let (_, got) = roundtrip(&edges);
        prop_assert_eq!(got, canonical(edges.into_iter()));
    }

    #[test]
    fn roundtrip_preserves_collision_heavy_inputs(edges in dense_edges()) {
        let (_, got) = roundtrip(&edges);
        prop_assert_eq!(got, canonical(edges.into_iter()));
    }

    #[test]
    fn serialization_is_deterministic(edges in sparse_edges()) {
        let text = render(&edges);
        let mut first = Vec::new();
        serialize(&text, &mut first).unwrap();
        let mut second = Vec::new();
        serialize(&text, &mut second).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn binaries_have_canonical_shape(edges in dense_edges()) {
        let (binary, _) = roundtrip(&edges);
        assert_canonical_shape(&binary);
    }

    #[test]
    fn reserializing_decoded_output_preserves_the_multiset(edges in dense_edges()) {
        let text = render(&edges);
        let mut binary = Vec::new();
        serialize(&text, &mut binary).unwrap();
        let mut decoded = Vec::new();
        deserialize(&binary, &mut decoded).unwrap();
        let mut again = Vec::new();
        serialize(&decoded, &mut again).unwrap();
        let mut out = Vec::new();
        deserialize(&again, &mut out).unwrap();
        prop_assert_eq!(
            canonical(parse_text(&out).into_iter()),
            canonical(edges.into_iter())
        );
    }
}
