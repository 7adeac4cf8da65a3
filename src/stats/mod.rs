//! Aggregation of per-locus diversity statistics into genome-wide summaries.
//!
//! [`operations`] holds the arithmetic (sums, ratios, mean, sample standard
//! deviation) and [`tables`] the grouping and pivoting of piawka rows into
//! output tables and pairwise matrices.

pub mod operations;
pub mod tables;

pub use operations::{mean, mean_std, ratio_or_zero, sample_std, SumRatio};
pub use tables::{
    write_table, DiversityAccumulator, DxyRow, FstRow, HetAccumulator, HetRow, PairwiseMatrix,
    PiRow,
};
