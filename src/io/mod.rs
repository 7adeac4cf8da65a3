//! Types and methods for reading and parsing input and writing output.

pub mod file;
pub mod parsers;
pub mod tsv;

pub use file::{InputFile, OutputFile, OutputWriter};
pub use parsers::{
    Bed3Record, FastaIntervalIterator, Metric, PiawkaIterator, PiawkaRecord, VcfHeader,
};
pub use tsv::{TsvConfig, POPMUNGE_TSV};
