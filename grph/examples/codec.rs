//! Command-line front end for the codec: serializes a TSV edge list
//! into a binary graph image, or expands a binary image back into TSV.

use std::fs::File;
use std::path::PathBuf;
use std::process;
use std::time::Instant;

use memmap2::Mmap;
use serde_json::json;
use structopt::StructOpt;

use grph::{encode, CompactGraph, Result};

/// Converts between TSV edge lists and compact binary graph images.
#[derive(Debug, StructOpt)]
#[structopt(name = "codec", about = "Convert between TSV edge lists and GRPH binaries.")]
struct Opt {
    /// Serialize the input edge list into a binary image.
    #[structopt(short = "s", long)]
    serialize: bool,

    /// Deserialize the input binary image into an edge list.
    #[structopt(short = "d", long, conflicts_with = "serialize")]
    deserialize: bool,

    /// Input path.
    #[structopt(short = "i", long)]
    input: PathBuf,

    /// Output path, created or truncated.
    #[structopt(short = "o", long)]
    output: PathBuf,
}

fn main() {
    let opt = Opt::from_args();
    if opt.serialize == opt.deserialize {
        eprintln!("Error: exactly one of -s or -d is required");
        process::exit(1);
    }
    if let Err(e) = run(&opt) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(opt: &Opt) -> Result<()> {
    let input = File::open(&opt.input)?;
    // zero-length files cannot be mapped
    let map = if input.metadata()?.len() == 0 {
        None
    } else {
        Some(unsafe { Mmap::map(&input)? })
    };
    let bytes: &[u8] = map.as_deref().unwrap_or(&[]);
    let output = File::create(&opt.output)?;

    let start = Instant::now();
    if opt.serialize {
        let graph = CompactGraph::from_tsv(bytes)?;
        let degrees = graph.degree_summary();
        println!(
            "{}",
            json!({
                "nvertices": graph.nvertices(),
                "nedges": graph.nedges(),
                "nloops": graph.nloops(),
                "upper_degrees": {
                    "mean": degrees.mean,
                    "median": degrees.median,
                    "p90": degrees.p90,
                    "p99": degrees.p99,
                    "max": degrees.max,
                },
            })
        );
        encode::write_binary(&graph, output)?;
    } else {
        grph::deserialize(bytes, output)?;
    }
    println!(
        "{}",
        json!({
            "duration": format!("{:.0?}", Instant::now().duration_since(start)),
        })
    );
    Ok(())
}
