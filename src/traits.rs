//! Traits used by the popmunge library.
//!

use crate::io::tsv::TsvConfig;

/// Defines how to serialize a single row of output to TSV.
pub trait TsvSerialize {
    fn to_tsv(&self, config: &TsvConfig) -> String;
}

/// A [`TsvSerialize`] row type that belongs to a table with a fixed header.
pub trait TsvTableRow: TsvSerialize {
    /// The column names of the table this row belongs to.
    fn header() -> &'static [&'static str];
}
