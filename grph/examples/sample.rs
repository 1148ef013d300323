//! Samples a random weighted edge list over a sparse slice of the u32
//! identifier range and writes it out as codec input.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

use rand::Rng;
use rand_pcg::Lcg64Xsh32;
use serde_json::json;
use structopt::StructOpt;

/// Generate a random undirected weighted edge list.
#[derive(Debug, StructOpt)]
#[structopt(name = "sample", about = "Sample a random weighted edge list.")]
struct Opt {
    /// Output path for the TSV edge list.
    #[structopt(long)]
    out: PathBuf,

    /// Number of distinct vertex identifiers drawn from the u32 range.
    #[structopt(long)]
    nvertices: usize,

    /// Number of edge lines to emit.
    #[structopt(long)]
    nedges: usize,

    /// Proportion of emitted edges that are self-loops, in [0, 1].
    #[structopt(long, default_value = "0.01")]
    loops: f64,

    /// Random sampling seed.
    #[structopt(long)]
    seed: u64,
}

fn main() {
    let opt = Opt::from_args();
    assert!(
        opt.nvertices > 0 || opt.nedges == 0,
        "edges need at least one vertex"
    );
    let mut rng = Lcg64Xsh32::new(0xcafef00dd15ea5e5, opt.seed);

    let sample_start = Instant::now();
    let mut ids = HashSet::with_capacity(opt.nvertices);
    while ids.len() < opt.nvertices {
        ids.insert(rng.gen::<u32>());
    }
    let ids: Vec<u32> = ids.into_iter().collect();

    let file = File::create(&opt.out).expect("write file");
    let mut writer = BufWriter::new(file);
    let mut nloops = 0usize;
    for _ in 0..opt.nedges {
        let u = ids[rng.gen_range(0..ids.len())];
        let v = if rng.gen::<f64>() < opt.loops {
            nloops += 1;
            u
        } else {
            ids[rng.gen_range(0..ids.len())]
        };
        let w: u8 = rng.gen();
        writeln!(writer, "{}\t{}\t{}", u, v, w).expect("write edge");
    }
    writer.flush().expect("flush");

    println!(
        "{}",
        json!({
            "nvertices": opt.nvertices,
            "nedges": opt.nedges,
            "nloops_forced": nloops,
            "sample_duration": format!("{:.0?}", Instant::now().duration_since(sample_start)),
        })
    );
}
