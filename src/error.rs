//! The [`PopmungeError`] `enum` definition and error messages.
//!
use std::num::{ParseFloatError, ParseIntError};
use thiserror::Error;

/// The [`PopmungeError`] defines the standard set of errors that should
/// be passed to the user.
#[derive(Debug, Error)]
pub enum PopmungeError {
    // IO related errors
    #[error("File reading error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("TSV parsing error: {0}")]
    CsvError(#[from] csv::Error),

    // File parsing related errors
    #[error("Integer parsing error: {0}")]
    ParseIntError(#[from] ParseIntError),
    #[error("Float parsing error: {0}")]
    ParseFloatError(#[from] ParseFloatError),

    // FASTA errors
    #[error("FASTA header has no valid 'pos=<chrom>:<pos>[+-]' descriptor: {0}")]
    InvalidFastaPosition(String),
    #[error("Reverse strand interval for '{0}' would start before position 0 (pos: {1}, length: {2})")]
    NegativeIntervalStart(String, u64, u64),

    // VCF errors
    #[error("VCF file '{0}' has no '#CHROM' header line")]
    MissingVcfHeader(String),
    #[error("VCF header line has no FORMAT column")]
    MissingFormatColumn,

    // Singletons file errors
    #[error("Singletons file is missing required column '{0}'")]
    MissingSingletonsColumn(String),

    // Command line tool related errors
    #[error("Command line argument error: {0}")]
    ArgumentError(#[from] clap::error::Error),
}
