//! Parsing vcftools `--singletons` output.
//!
//! The file has a header row, `CHROM POS SINGLETON/DOUBLETON ALLELE INDV`,
//! and one row per singleton or doubleton site per individual. Only `CHROM`,
//! `POS` and `INDV` are used; columns are matched by name.

use indexmap::IndexMap;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::PathBuf;

use crate::error::PopmungeError;
use crate::io::parsers::tsv::build_tsv_reader;
use crate::Position;

/// The columns a singletons file must have.
pub const REQUIRED_COLUMNS: [&str; 3] = ["CHROM", "POS", "INDV"];

/// One singleton/doubleton site of one individual.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct SingletonRecord {
    #[serde(rename = "CHROM")]
    pub chrom: String,
    #[serde(rename = "POS")]
    pub pos: Position,
    #[serde(rename = "INDV")]
    pub indv: String,
}

/// A set of `(CHROM, POS)` sites, grouped by chromosome in file order.
#[derive(Clone, Debug, Default)]
pub struct SiteSet {
    by_seqname: IndexMap<String, HashSet<Position>>,
}

impl SiteSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, seqname: String, pos: Position) -> bool {
        self.by_seqname.entry(seqname).or_default().insert(pos)
    }

    pub fn contains(&self, seqname: &str, pos: Position) -> bool {
        self.by_seqname
            .get(seqname)
            .map_or(false, |positions| positions.contains(&pos))
    }

    /// The number of distinct sites.
    pub fn len(&self) -> usize {
        self.by_seqname.values().map(HashSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Read the sites listed for individual `indv` in a singletons file.
pub fn read_singleton_sites(
    filepath: impl Into<PathBuf>,
    indv: &str,
) -> Result<SiteSet, PopmungeError> {
    let mut reader = build_tsv_reader(filepath, true)?;
    let headers = reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|name| name == column) {
            return Err(PopmungeError::MissingSingletonsColumn(column.to_string()));
        }
    }

    let mut sites = SiteSet::new();
    for result in reader.deserialize::<SingletonRecord>() {
        let record = result?;
        if record.indv == indv {
            sites.insert(record.chrom, record.pos);
        }
    }
    Ok(sites)
}
