//! Grouping piawka rows into summary tables and pairwise matrices.
//!
//! Accumulators are fed one [`PiawkaRecord`] at a time, so input files are
//! streamed rather than loaded. Groups are keyed by population (or population
//! pair) and emitted in sorted order.

use indexmap::IndexMap;
use std::collections::BTreeSet;
use std::io::Write;
use std::path::PathBuf;

use super::operations::{mean_std, SumRatio};
use crate::error::PopmungeError;
use crate::io::file::OutputFile;
use crate::io::parsers::piawka::{Metric, PiawkaRecord};
use crate::io::tsv::{format_float, TsvConfig};
use crate::traits::{TsvSerialize, TsvTableRow};

/// A population pair, `(pop1, pop2)`.
pub type PopPair = (String, String);

/// Genome-wide heterozygosity of one population.
#[derive(Clone, Debug, PartialEq)]
pub struct HetRow {
    pub pop1: String,
    pub numerator: f64,
    pub denominator: f64,
    pub het: f64,
}

impl TsvSerialize for HetRow {
    fn to_tsv(&self, config: &TsvConfig) -> String {
        format!(
            "{}\t{}\t{}\t{}",
            self.pop1,
            self.numerator.to_tsv(config),
            self.denominator.to_tsv(config),
            self.het.to_tsv(config)
        )
    }
}

impl TsvTableRow for HetRow {
    fn header() -> &'static [&'static str] {
        &["pop1", "numerator", "denominator", "het"]
    }
}

/// Genome-wide nucleotide diversity (pi) of one population.
#[derive(Clone, Debug, PartialEq)]
pub struct PiRow {
    pub pop1: String,
    pub diffs: f64,
    pub comps: f64,
    pub pi: f64,
}

impl TsvSerialize for PiRow {
    fn to_tsv(&self, config: &TsvConfig) -> String {
        format!(
            "{}\t{}\t{}\t{}",
            self.pop1,
            self.diffs.to_tsv(config),
            self.comps.to_tsv(config),
            self.pi.to_tsv(config)
        )
    }
}

impl TsvTableRow for PiRow {
    fn header() -> &'static [&'static str] {
        &["pop1", "diffs", "comps", "pi"]
    }
}

/// Genome-wide absolute divergence (Dxy) of a population pair.
#[derive(Clone, Debug, PartialEq)]
pub struct DxyRow {
    pub pop1: String,
    pub pop2: String,
    pub diffs: f64,
    pub comps: f64,
    pub dxy: f64,
}

impl TsvSerialize for DxyRow {
    fn to_tsv(&self, config: &TsvConfig) -> String {
        format!(
            "{}\t{}\t{}\t{}\t{}",
            self.pop1,
            self.pop2,
            self.diffs.to_tsv(config),
            self.comps.to_tsv(config),
            self.dxy.to_tsv(config)
        )
    }
}

impl TsvTableRow for DxyRow {
    fn header() -> &'static [&'static str] {
        &["pop1", "pop2", "diffs", "comps", "dxy"]
    }
}

/// Mean and sample standard deviation of per-locus Fst for a population pair.
#[derive(Clone, Debug, PartialEq)]
pub struct FstRow {
    pub pop1: String,
    pub pop2: String,
    pub avg_fst: f64,
    pub std_fst: f64,
}

impl TsvSerialize for FstRow {
    fn to_tsv(&self, config: &TsvConfig) -> String {
        format!(
            "{}\t{}\t{}\t{}",
            self.pop1,
            self.pop2,
            self.avg_fst.to_tsv(config),
            self.std_fst.to_tsv(config)
        )
    }
}

impl TsvTableRow for FstRow {
    fn header() -> &'static [&'static str] {
        &["pop1", "pop2", "avg_fst", "std_fst"]
    }
}

/// Accumulates `het` rows by `pop1`.
#[derive(Clone, Debug, Default)]
pub struct HetAccumulator {
    het: IndexMap<String, SumRatio>,
}

impl HetAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a row; rows of other metrics are ignored. Returns whether it was used.
    pub fn push(&mut self, record: &PiawkaRecord) -> bool {
        if !record.is_metric(Metric::Het) {
            return false;
        }
        self.het
            .entry(record.pop1.clone())
            .or_default()
            .add(record.numerator, record.denominator);
        true
    }

    /// The heterozygosity table, sorted by population.
    pub fn into_table(mut self) -> Vec<HetRow> {
        self.het.sort_keys();
        self.het
            .into_iter()
            .map(|(pop1, sum)| HetRow {
                pop1,
                numerator: sum.numerator,
                denominator: sum.denominator,
                het: sum.ratio(),
            })
            .collect()
    }
}

/// Accumulates `pi`, `Dxy` and `Fst_HUD` rows.
#[derive(Clone, Debug, Default)]
pub struct DiversityAccumulator {
    pi: IndexMap<String, SumRatio>,
    dxy: IndexMap<PopPair, SumRatio>,
    fst: IndexMap<PopPair, Vec<f64>>,
}

impl DiversityAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a row; rows of other metrics are ignored. Returns whether it was used.
    ///
    /// Fst rows without a parseable value still register their population
    /// pair, but contribute no value.
    pub fn push(&mut self, record: &PiawkaRecord) -> bool {
        if record.is_metric(Metric::Pi) {
            self.pi
                .entry(record.pop1.clone())
                .or_default()
                .add(record.numerator, record.denominator);
        } else if record.is_metric(Metric::Dxy) {
            self.dxy
                .entry(pair(record))
                .or_default()
                .add(record.numerator, record.denominator);
        } else if record.is_metric(Metric::FstHud) {
            let values = self.fst.entry(pair(record)).or_default();
            if let Some(value) = record.value {
                values.push(value);
            }
        } else {
            return false;
        }
        true
    }

    /// The pi table, sorted by population.
    pub fn pi_table(&self) -> Vec<PiRow> {
        let mut rows: Vec<PiRow> = self
            .pi
            .iter()
            .map(|(pop1, sum)| PiRow {
                pop1: pop1.clone(),
                diffs: sum.numerator,
                comps: sum.denominator,
                pi: sum.ratio(),
            })
            .collect();
        rows.sort_by(|a, b| a.pop1.cmp(&b.pop1));
        rows
    }

    /// The Dxy table, sorted by population pair.
    pub fn dxy_table(&self) -> Vec<DxyRow> {
        let mut rows: Vec<DxyRow> = self
            .dxy
            .iter()
            .map(|((pop1, pop2), sum)| DxyRow {
                pop1: pop1.clone(),
                pop2: pop2.clone(),
                diffs: sum.numerator,
                comps: sum.denominator,
                dxy: sum.ratio(),
            })
            .collect();
        rows.sort_by(|a, b| (&a.pop1, &a.pop2).cmp(&(&b.pop1, &b.pop2)));
        rows
    }

    /// The Fst table, sorted by population pair.
    pub fn fst_table(&self) -> Vec<FstRow> {
        let mut rows: Vec<FstRow> = self
            .fst
            .iter()
            .map(|((pop1, pop2), values)| {
                let (avg_fst, std_fst) = mean_std(values);
                FstRow {
                    pop1: pop1.clone(),
                    pop2: pop2.clone(),
                    avg_fst,
                    std_fst,
                }
            })
            .collect();
        rows.sort_by(|a, b| (&a.pop1, &a.pop2).cmp(&(&b.pop1, &b.pop2)));
        rows
    }

    /// The Dxy values pivoted into a `pop1` × `pop2` matrix.
    pub fn dxy_matrix(&self) -> PairwiseMatrix {
        PairwiseMatrix::from_pairs(
            self.dxy
                .iter()
                .map(|(key, sum)| (key.clone(), sum.ratio())),
        )
    }

    /// The mean Fst values pivoted into a `pop1` × `pop2` matrix.
    pub fn fst_matrix(&self) -> PairwiseMatrix {
        PairwiseMatrix::from_pairs(
            self.fst
                .iter()
                .map(|(key, values)| (key.clone(), mean_std(values).0)),
        )
    }
}

fn pair(record: &PiawkaRecord) -> PopPair {
    (record.pop1.clone(), record.pop2.clone())
}

/// A dense `pop1` × `pop2` matrix of a pairwise statistic.
///
/// Rows are the sorted distinct `pop1` values and columns the sorted distinct
/// `pop2` values seen. Pairs without data are `0.0`. The matrix is not
/// symmetrized: `(A, B)` and `(B, A)` are separate cells.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PairwiseMatrix {
    pub rows: Vec<String>,
    pub columns: Vec<String>,
    values: IndexMap<PopPair, f64>,
}

impl PairwiseMatrix {
    pub fn from_pairs(pairs: impl IntoIterator<Item = (PopPair, f64)>) -> Self {
        let values: IndexMap<PopPair, f64> = pairs.into_iter().collect();
        let rows: BTreeSet<String> = values.keys().map(|(pop1, _)| pop1.clone()).collect();
        let columns: BTreeSet<String> = values.keys().map(|(_, pop2)| pop2.clone()).collect();
        Self {
            rows: rows.into_iter().collect(),
            columns: columns.into_iter().collect(),
            values,
        }
    }

    /// The value for a pair, `0.0` if absent.
    pub fn get(&self, pop1: &str, pop2: &str) -> f64 {
        self.values
            .get(&(pop1.to_string(), pop2.to_string()))
            .copied()
            .unwrap_or(0.0)
    }

    /// Write the matrix as TSV, with a `pop1` header cell heading the row names.
    ///
    /// The header is always `pop1` and a tab, so a matrix without columns
    /// has the header line `pop1\t`.
    pub fn write<W: Write + ?Sized>(
        &self,
        writer: &mut W,
        config: &TsvConfig,
    ) -> Result<(), PopmungeError> {
        writeln!(writer, "pop1\t{}", self.columns.join("\t"))?;
        for pop1 in &self.rows {
            let mut line = vec![pop1.clone()];
            line.extend(
                self.columns
                    .iter()
                    .map(|pop2| format_float(self.get(pop1, pop2), config)),
            );
            writeln!(writer, "{}", line.join("\t"))?;
        }
        Ok(())
    }

    /// Write the matrix to a file.
    pub fn to_tsv(
        &self,
        output: impl Into<PathBuf>,
        config: &TsvConfig,
    ) -> Result<(), PopmungeError> {
        let mut writer = OutputFile::new(output).writer()?;
        self.write(&mut writer, config)?;
        writer.finish()?;
        Ok(())
    }
}

/// Write a table of rows, with its header, to a file.
pub fn write_table<R: TsvTableRow>(
    output: impl Into<PathBuf>,
    rows: &[R],
    config: &TsvConfig,
) -> Result<(), PopmungeError> {
    let mut writer = OutputFile::new(output).writer()?;
    writeln!(writer, "{}", R::header().join("\t"))?;
    for row in rows {
        writeln!(writer, "{}", row.to_tsv(config))?;
    }
    writer.finish()?;
    Ok(())
}
