//! Parsing FASTA records whose headers carry genomic position descriptors.
//!
//! Locus FASTA files (e.g. from RADseq or target-capture assemblies) often
//! record where each sequence maps to in the reference with a description
//! token like `pos=chr1:100+`. The position is 1-based and the optional
//! strand says which direction the sequence extends from it.
//!
//! FASTA reading is done with [`noodles::fasta`], on plaintext or
//! gzip-compressed input.

use noodles::fasta;
use std::io::{BufReader, Read};
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::PopmungeError;
use crate::io::file::InputFile;
use crate::io::tsv::TsvConfig;
use crate::traits::TsvSerialize;
use crate::Position;

/// The prefix of the description token holding the position.
pub const POSITION_TOKEN: &str = "pos=";

/// Nucleotide strand enum type.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Strand {
    Forward,
    Reverse,
}

/// A parsed `pos=<chrom>:<pos>[+-]` descriptor.
#[derive(Clone, Debug, PartialEq)]
pub struct FastaPosition {
    pub seqname: String,
    /// 1-based position.
    pub position: u64,
    pub strand: Strand,
}

impl FromStr for FastaPosition {
    type Err = PopmungeError;

    /// Parse the descriptor value, without the `pos=` prefix, e.g. `chr1:100+`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PopmungeError::InvalidFastaPosition(s.to_string());
        let (seqname, rest) = s.rsplit_once(':').ok_or_else(invalid)?;
        if seqname.is_empty() {
            return Err(invalid());
        }
        let (digits, strand) = if let Some(digits) = rest.strip_suffix('+') {
            (digits, Strand::Forward)
        } else if let Some(digits) = rest.strip_suffix('-') {
            (digits, Strand::Reverse)
        } else {
            (rest, Strand::Forward)
        };
        let position = digits.parse::<u64>().map_err(|_| invalid())?;
        if position == 0 {
            return Err(invalid());
        }
        Ok(Self {
            seqname: seqname.to_string(),
            position,
            strand,
        })
    }
}

impl FastaPosition {
    /// Find and parse the `pos=` token in a FASTA definition line (with or
    /// without the leading `>`).
    pub fn from_definition(definition: &str) -> Result<Self, PopmungeError> {
        definition
            .trim_start_matches('>')
            .split_whitespace()
            .find_map(|token| token.strip_prefix(POSITION_TOKEN))
            .ok_or_else(|| PopmungeError::InvalidFastaPosition(definition.to_string()))?
            .parse()
    }

    /// Convert to a 0-indexed, right-exclusive interval for a sequence of `length`.
    ///
    /// Forward strand sequences start at the position, so the interval is
    /// `[pos - 1, pos + length)`; reverse strand sequences end at it, giving
    /// `[pos - length, pos + 1)`. Both include one extra flanking base relative
    /// to the sequence itself.
    pub fn to_interval(&self, length: u64) -> Result<Bed3Record, PopmungeError> {
        let (start, end) = match self.strand {
            Strand::Forward => (self.position - 1, self.position + length),
            Strand::Reverse => {
                let start = self.position.checked_sub(length).ok_or_else(|| {
                    PopmungeError::NegativeIntervalStart(
                        self.seqname.clone(),
                        self.position,
                        length,
                    )
                })?;
                (start, self.position + 1)
            }
        };
        Ok(Bed3Record {
            seqname: self.seqname.clone(),
            start: to_position(start)?,
            end: to_position(end)?,
        })
    }
}

fn to_position(value: u64) -> Result<Position, PopmungeError> {
    Position::try_from(value).map_err(|_| {
        PopmungeError::InvalidFastaPosition(format!("position {} is out of range", value))
    })
}

/// A BED3 range record: sequence name, and 0-indexed right-exclusive start and end.
#[derive(Clone, Debug, PartialEq)]
pub struct Bed3Record {
    pub seqname: String,
    pub start: Position,
    pub end: Position,
}

impl TsvSerialize for Bed3Record {
    #![allow(unused_variables)]
    fn to_tsv(&self, config: &TsvConfig) -> String {
        format!("{}\t{}\t{}", self.seqname, self.start, self.end)
    }
}

/// An iterator over the intervals of the records of a FASTA file.
pub struct FastaIntervalIterator {
    reader: fasta::Reader<BufReader<Box<dyn Read>>>,
}

impl std::fmt::Debug for FastaIntervalIterator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FastaIntervalIterator").finish_non_exhaustive()
    }
}

impl FastaIntervalIterator {
    /// Creates a parsing iterator over a (possibly gzipped) FASTA file.
    pub fn new(filepath: impl Into<PathBuf>) -> Result<Self, PopmungeError> {
        let input_file = InputFile::new(filepath);
        let reader = fasta::Reader::new(input_file.reader()?);
        Ok(Self { reader })
    }
}

impl Iterator for FastaIntervalIterator {
    type Item = Result<Bed3Record, PopmungeError>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = match self.reader.records().next()? {
            Ok(record) => record,
            Err(e) => return Some(Err(e.into())),
        };
        let definition = record.definition().to_string();
        let length = record.sequence().len() as u64;
        Some(FastaPosition::from_definition(&definition).and_then(|pos| pos.to_interval(length)))
    }
}
