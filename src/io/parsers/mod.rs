//! Parsers for the file formats popmunge reads.
//!
//! Every parser works on both plaintext and gzip-compressed (including BGZF)
//! files, through [`InputFile`](crate::io::InputFile). Tabular formats are
//! read with the [`csv`] crate; FASTA with [`noodles`]. VCF files are handled
//! line by line, since only their header is rewritten.
//!
//!  - [`fasta`]: FASTA records with `pos=<chrom>:<pos>[+-]` header descriptors.
//!  - [`vcf`]: VCF header reading, writing and sample name sanitizing.
//!  - [`singletons`]: vcftools `--singletons` site lists.
//!  - [`piawka`]: per-locus diversity statistics from piawka.

pub mod fasta;
pub mod piawka;
pub mod singletons;
pub mod tsv;
pub mod utils;
pub mod vcf;

pub use fasta::{Bed3Record, FastaIntervalIterator, FastaPosition};
pub use piawka::{Metric, PiawkaIterator, PiawkaRecord};
pub use singletons::read_singleton_sites;
pub use vcf::VcfHeader;
