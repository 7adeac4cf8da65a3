//! Parsing per-locus diversity statistics written by piawka.
//!
//! piawka writes headerless TSV rows of the form
//!
//! ```text
//! locus  nSites  pop1  pop2  nUsed  metric  value  numerator  denominator  [nGenotypes  nMissing]
//! ```
//!
//! Parsing is permissive: numeric cells that fail to parse (e.g. `NA`) are
//! `None`, short rows have `None` trailing fields, and extra columns are
//! ignored.

use csv::{Reader, StringRecord};
use std::io::Read;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::PopmungeError;
use crate::io::parsers::tsv::{build_tsv_reader, parse_optional};

/// The metrics aggregated by popmunge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Metric {
    Het,
    Pi,
    Dxy,
    FstHud,
}

impl Metric {
    pub const ALL: [Metric; 4] = [Metric::Het, Metric::Pi, Metric::Dxy, Metric::FstHud];

    /// The metric name, as it appears in piawka output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Het => "het",
            Metric::Pi => "pi",
            Metric::Dxy => "Dxy",
            Metric::FstHud => "Fst_HUD",
        }
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Metric::ALL
            .into_iter()
            .find(|metric| metric.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// One row of piawka output.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PiawkaRecord {
    pub locus: String,
    pub n_sites: Option<i64>,
    pub pop1: String,
    pub pop2: String,
    pub n_used: Option<i64>,
    /// `None` for metrics popmunge does not aggregate.
    pub metric: Option<Metric>,
    pub value: Option<f64>,
    pub numerator: Option<f64>,
    pub denominator: Option<f64>,
    pub n_genotypes: Option<i64>,
    pub n_missing: Option<i64>,
}

impl PiawkaRecord {
    /// Build a record from a raw TSV row.
    pub fn from_string_record(row: &StringRecord) -> Self {
        let text = |i: usize| row.get(i).unwrap_or_default().to_string();
        Self {
            locus: text(0),
            n_sites: parse_optional(row.get(1)),
            pop1: text(2),
            pop2: text(3),
            n_used: parse_optional(row.get(4)),
            metric: parse_optional(row.get(5)),
            value: parse_optional(row.get(6)),
            numerator: parse_optional(row.get(7)),
            denominator: parse_optional(row.get(8)),
            n_genotypes: parse_optional(row.get(9)),
            n_missing: parse_optional(row.get(10)),
        }
    }

    /// Whether this row reports `metric`.
    pub fn is_metric(&self, metric: Metric) -> bool {
        self.metric == Some(metric)
    }
}

/// A parsing iterator over the rows of a (possibly gzipped) piawka file.
pub struct PiawkaIterator {
    reader: Reader<Box<dyn Read>>,
    row: StringRecord,
}

impl std::fmt::Debug for PiawkaIterator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PiawkaIterator").finish_non_exhaustive()
    }
}

impl PiawkaIterator {
    pub fn new(filepath: impl Into<PathBuf>) -> Result<Self, PopmungeError> {
        let reader = build_tsv_reader(filepath, false)?;
        Ok(Self {
            reader,
            row: StringRecord::new(),
        })
    }
}

impl Iterator for PiawkaIterator {
    type Item = Result<PiawkaRecord, PopmungeError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.read_record(&mut self.row) {
            Ok(true) => Some(Ok(PiawkaRecord::from_string_record(&self.row))),
            Ok(false) => None,
            Err(e) => Some(Err(e.into())),
        }
    }
}
