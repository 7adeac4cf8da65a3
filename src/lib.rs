//! # popmunge: munging population genetics data files
//!
//! `popmunge` collects the small, linear file transformations that sit between
//! variant calling and diversity analysis:
//!
//!  - [`commands::fasta2bed`]: turn FASTA headers with `pos=` descriptors into BED3 intervals.
//!  - [`commands::reheader_vcf`]: strip `.bam` suffixes and directories from VCF sample names.
//!  - [`commands::filter_singletons_vcf`]: drop an individual's singleton/doubleton sites.
//!  - [`commands::reduce_het`] and [`commands::reduce_pi_dxy_fst`]: aggregate
//!    per-locus piawka statistics into genome-wide tables and pairwise matrices.
//!
//! Each operation reads plaintext or gzip-compressed input through
//! [`io::InputFile`] and writes through [`io::OutputFile`], and returns a
//! [`reporting::CommandOutput`] with notes for the user.

pub mod commands;
pub mod error;
pub mod io;
pub mod reporting;
pub mod stats;
pub mod test_utilities;
pub mod traits;

#[cfg(not(feature = "big-position"))]
pub type Position = u32;
#[cfg(feature = "big-position")]
pub type Position = u64;

pub mod prelude {
    pub use crate::error::PopmungeError;
    pub use crate::io::{InputFile, OutputFile, POPMUNGE_TSV};
    pub use crate::reporting::{CommandOutput, Report};
    pub use crate::traits::TsvSerialize;
}
