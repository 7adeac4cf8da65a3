//! Test cases and test utility functions.
//!

use flate2::write::GzEncoder;
use flate2::Compression;
use rand::{seq::SliceRandom, thread_rng, Rng};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::{Builder, NamedTempFile};

/// The fixed columns of a VCF `#CHROM` line.
pub const VCF_FIXED_COLUMNS: &str = "#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT";

// Random piawka table defaults
//
// The tradeoff is catching stochastic errors vs test time.
pub const NRANDOM_LOCI: usize = 10000;
pub const NPOPS: usize = 6;

/// Write `contents` to `dir/name` as plaintext.
pub fn write_plaintext(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("could not write test file");
    path
}

/// Write `contents` to `dir/name`, gzip-compressed.
pub fn write_gzipped(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    let file = std::fs::File::create(&path).expect("could not create test file");
    let mut encoder = GzEncoder::new(file, Compression::default());
    encoder
        .write_all(contents.as_bytes())
        .expect("could not write test file");
    encoder.finish().expect("could not finish gzip stream");
    path
}

/// Create a temporary file with a given suffix.
pub fn temp_file(suffix: &str) -> NamedTempFile {
    Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("Failed to create temp file")
}

/// A population name for a random table.
pub fn random_pop(npops: usize) -> String {
    let mut rng = thread_rng();
    format!("Pop{}", rng.gen_range(1..=npops))
}

/// Build a random piawka table of `nloci` loci, with one row of each of the
/// `het`, `pi`, `Dxy`, and `Fst_HUD` metrics per locus.
pub fn random_piawka_rows(nloci: usize, npops: usize) -> Vec<String> {
    let mut rng = thread_rng();
    let metrics = ["het", "pi", "Dxy", "Fst_HUD"];
    let mut rows = Vec::with_capacity(nloci * metrics.len());
    for locus in 0..nloci {
        let nsites: u32 = rng.gen_range(50..500);
        for metric in metrics {
            let pop1 = random_pop(npops);
            let pop2 = if metric == "Dxy" || metric == "Fst_HUD" {
                random_pop(npops)
            } else {
                ".".to_string()
            };
            let denominator: u32 = rng.gen_range(0..nsites);
            let numerator: u32 = rng.gen_range(0..=denominator);
            let value: f64 = rng.gen_range(0.0..1.0);
            rows.push(format!(
                "locus{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
                locus, nsites, pop1, pop2, nsites, metric, value, numerator, denominator, 10, 0
            ));
        }
    }
    rows.shuffle(&mut rng);
    rows
}

/// Write a random piawka table to `dir/piawka.tsv`.
pub fn random_piawka_file(dir: &Path, nloci: usize) -> PathBuf {
    let mut contents = random_piawka_rows(nloci, NPOPS).join("\n");
    contents.push('\n');
    write_plaintext(dir, "piawka.tsv", &contents)
}
