//! The operations behind each `popmunge` subcommand.
//!
//! Each command is a single linear pass: parse the input, filter or
//! aggregate, and write the output file(s). They return a [`CommandOutput`]
//! whose [`Report`] notes anything the user should know about.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::{
    io::{
        parsers::{
            read_singleton_sites,
            utils::sibling_path,
            vcf::{site_key, VcfHeader},
        },
        FastaIntervalIterator, PiawkaIterator, TsvConfig,
    },
    prelude::*,
    stats::{write_table, DiversityAccumulator, HetAccumulator},
};

/// Output filename of the heterozygosity table.
pub const HET_TABLE: &str = "genomic_het_table.tsv";
/// Output filename of the pi table.
pub const PI_TABLE: &str = "genomic_pi_table.tsv";
/// Output filename of the Dxy table.
pub const DXY_TABLE: &str = "genomic_dxy_table.tsv";
/// Output filename of the Dxy matrix.
pub const DXY_MATRIX: &str = "genomic_dxy_matrix.tsv";
/// Output filename of the Fst table.
pub const FST_TABLE: &str = "genomic_fst_table.tsv";
/// Output filename of the Fst matrix.
pub const FST_MATRIX: &str = "genomic_fst_matrix.tsv";

/// Convert the `pos=` descriptors in FASTA headers into BED3 intervals.
///
/// Returns the number of intervals written.
pub fn fasta2bed(
    fasta: impl Into<PathBuf>,
    output: Option<impl Into<PathBuf>>,
) -> Result<CommandOutput<usize>, PopmungeError> {
    let iter = FastaIntervalIterator::new(fasta)?;

    let output_stream = output.map_or(OutputFile::new_stdout(), OutputFile::new);
    let mut writer = output_stream.writer()?;

    let mut num_intervals = 0;
    for record in iter {
        let interval = record?;
        writeln!(writer, "{}", interval.to_tsv(&POPMUNGE_TSV))?;
        num_intervals += 1;
    }
    writer.finish()?;

    let mut report = Report::new();
    report.add_issue(format!("{} FASTA records converted to intervals", num_intervals));
    Ok(CommandOutput::new(num_intervals, report))
}

/// Copy the remaining lines of `reader` to `writer` verbatim, skipping those
/// for which `drop` is true. Returns `(kept, dropped)` line counts.
fn copy_records<R, W, F>(
    reader: &mut R,
    writer: &mut W,
    mut drop: F,
) -> Result<(usize, usize), PopmungeError>
where
    R: BufRead,
    W: Write + ?Sized,
    F: FnMut(&str) -> bool,
{
    let mut line = String::new();
    let (mut kept, mut dropped) = (0, 0);
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        if drop(&line) {
            dropped += 1;
            continue;
        }
        writer.write_all(line.as_bytes())?;
        if !line.ends_with('\n') {
            writer.write_all(b"\n")?;
        }
        kept += 1;
    }
    Ok((kept, dropped))
}

/// Rewrite VCF sample names from BAM paths (e.g. `some/dir/a.bam`) to bare
/// sample names (`a`).
///
/// If any sample name lacks `.bam` the file is considered clean: nothing is
/// written and `false` is returned. Otherwise the header with sanitized column
/// names and all records unchanged are written to `output`, and `true` is
/// returned.
pub fn reheader_vcf(
    vcf: impl Into<PathBuf>,
    output: impl Into<PathBuf>,
) -> Result<CommandOutput<bool>, PopmungeError> {
    let input_file = InputFile::new(vcf);
    let mut reader = input_file.reader()?;
    let header = VcfHeader::read(&mut reader, &input_file.display_path())?;
    let mut report = Report::new();

    if !header.needs_reheader()? {
        report.add_issue(format!(
            "sample names in '{}' do not need rewriting; no output written",
            input_file.display_path()
        ));
        return Ok(CommandOutput::new(false, report));
    }

    let sanitized = header.sanitized();
    debug!("sanitized sample names: {:?}", sanitized.sample_names()?);

    let mut writer = OutputFile::new(output).writer()?;
    sanitized.write(&mut writer)?;
    let (kept, _) = copy_records(&mut reader, &mut writer, |_| false)?;
    writer.finish()?;

    report.add_issue(format!(
        "{} sample names rewritten, {} records copied",
        sanitized.sample_names()?.len(),
        kept
    ));
    Ok(CommandOutput::new(true, report))
}

/// Remove the singleton/doubleton sites of one individual from its VCF.
///
/// The sites are the `(CHROM, POS)` rows of the vcftools singletons file whose
/// `INDV` is `indv`. If there are none, nothing is written and `false` is
/// returned. Otherwise the header (with sanitized sample names) and every
/// record not at one of the sites are written to `output`, and `true` is
/// returned.
pub fn filter_singletons_vcf(
    vcf: impl Into<PathBuf>,
    output: impl Into<PathBuf>,
    singletons: impl Into<PathBuf>,
    indv: &str,
) -> Result<CommandOutput<bool>, PopmungeError> {
    let sites = read_singleton_sites(singletons, indv)?;
    let mut report = Report::new();

    if sites.is_empty() {
        report.add_issue(format!(
            "no singleton sites for individual '{}'; no output written",
            indv
        ));
        return Ok(CommandOutput::new(false, report));
    }
    debug!("{} singleton sites for individual '{}'", sites.len(), indv);

    let input_file = InputFile::new(vcf);
    let mut reader = input_file.reader()?;
    let header = VcfHeader::read(&mut reader, &input_file.display_path())?;

    let mut writer = OutputFile::new(output).writer()?;
    header.sanitized().write(&mut writer)?;
    let (kept, dropped) = copy_records(&mut reader, &mut writer, |line| {
        site_key(line).map_or(false, |(chrom, pos)| sites.contains(chrom, pos))
    })?;
    writer.finish()?;

    report.add_issue(format!(
        "{} singleton sites of '{}' removed, {} records kept",
        dropped, indv, kept
    ));
    Ok(CommandOutput::new(true, report))
}

/// Link `output` to the absolute path of `input`, when a command left its
/// input unchanged. An existing `output` is left alone; returns whether a link
/// was created.
pub fn link_unchanged(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
) -> Result<bool, PopmungeError> {
    let output = output.as_ref();
    if output.symlink_metadata().is_ok() {
        debug!("'{}' already exists; not linking", output.display());
        return Ok(false);
    }
    let target = input.as_ref().canonicalize()?;
    create_link(&target, output)?;
    info!("linked '{}' -> '{}'", output.display(), target.display());
    Ok(true)
}

#[cfg(unix)]
fn create_link(target: &Path, link: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(not(unix))]
fn create_link(target: &Path, link: &Path) -> std::io::Result<()> {
    std::fs::copy(target, link).map(|_| ())
}

/// Aggregate piawka `het` rows into a per-population heterozygosity table,
/// written as [`HET_TABLE`] next to the input file.
///
/// Returns the path of the table.
pub fn reduce_het(
    piawka: impl Into<PathBuf>,
    config: &TsvConfig,
) -> Result<CommandOutput<PathBuf>, PopmungeError> {
    let piawka = piawka.into();
    let mut accumulator = HetAccumulator::new();
    let mut num_used = 0;
    for record in PiawkaIterator::new(&piawka)? {
        if accumulator.push(&record?) {
            num_used += 1;
        }
    }

    let table = accumulator.into_table();
    let output = sibling_path(&piawka, HET_TABLE);
    write_table(&output, &table, config)?;

    let mut report = Report::new();
    report.add_issue(format!(
        "{} het rows aggregated over {} populations",
        num_used,
        table.len()
    ));
    Ok(CommandOutput::new(output, report))
}

/// The files written by [`reduce_pi_dxy_fst`].
#[derive(Clone, Debug, PartialEq)]
pub struct DiversityOutputs {
    pub pi_table: PathBuf,
    pub dxy_table: PathBuf,
    pub dxy_matrix: PathBuf,
    pub fst_table: PathBuf,
    pub fst_matrix: PathBuf,
}

impl DiversityOutputs {
    /// The output paths for a piawka file, all in its directory.
    pub fn for_input(piawka: impl AsRef<Path>) -> Self {
        let piawka = piawka.as_ref();
        Self {
            pi_table: sibling_path(piawka, PI_TABLE),
            dxy_table: sibling_path(piawka, DXY_TABLE),
            dxy_matrix: sibling_path(piawka, DXY_MATRIX),
            fst_table: sibling_path(piawka, FST_TABLE),
            fst_matrix: sibling_path(piawka, FST_MATRIX),
        }
    }
}

/// Aggregate piawka `pi`, `Dxy` and `Fst_HUD` rows into genome-wide tables and
/// pairwise matrices, written next to the input file.
pub fn reduce_pi_dxy_fst(
    piawka: impl Into<PathBuf>,
    config: &TsvConfig,
) -> Result<CommandOutput<DiversityOutputs>, PopmungeError> {
    let piawka = piawka.into();
    let mut accumulator = DiversityAccumulator::new();
    let (mut num_used, mut num_ignored) = (0, 0);
    for record in PiawkaIterator::new(&piawka)? {
        if accumulator.push(&record?) {
            num_used += 1;
        } else {
            num_ignored += 1;
        }
    }

    let outputs = DiversityOutputs::for_input(&piawka);
    write_table(&outputs.pi_table, &accumulator.pi_table(), config)?;
    write_table(&outputs.dxy_table, &accumulator.dxy_table(), config)?;
    accumulator.dxy_matrix().to_tsv(&outputs.dxy_matrix, config)?;
    write_table(&outputs.fst_table, &accumulator.fst_table(), config)?;
    accumulator.fst_matrix().to_tsv(&outputs.fst_matrix, config)?;

    let mut report = Report::new();
    report.add_issue(format!(
        "{} pi/Dxy/Fst_HUD rows aggregated, {} rows of other metrics ignored",
        num_used, num_ignored
    ));
    Ok(CommandOutput::new(outputs, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_copy_records() {
        let mut reader = Cursor::new("a\t1\nb\t2\nc\t3");
        let mut buffer = Vec::new();
        let (kept, dropped) =
            copy_records(&mut reader, &mut buffer, |line| line.starts_with('b')).unwrap();
        assert_eq!((kept, dropped), (2, 1));
        assert_eq!(String::from_utf8(buffer).unwrap(), "a\t1\nc\t3\n");
    }

    #[test]
    fn test_link_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.vcf.gz");
        std::fs::write(&input, "data").unwrap();
        let output = dir.path().join("out.vcf.gz");

        assert!(link_unchanged(&input, &output).unwrap());
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "data");
        // a second call leaves the existing link alone
        assert!(!link_unchanged(&input, &output).unwrap());
    }
}
