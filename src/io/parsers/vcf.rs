//! Line-oriented VCF header handling.
//!
//! Only the header is interpreted: meta lines (`##...`) are carried verbatim,
//! and the `#CHROM` column line is split into column names. Data lines are
//! passed through as text, with at most their `CHROM` and `POS` fields looked
//! at, so records are written back exactly as they were read.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::error::PopmungeError;
use crate::io::file::{InputFile, OutputFile};
use crate::Position;

/// The prefix of the VCF column header line.
pub const COLUMN_HEADER_PREFIX: &str = "#CHROM";

/// The column after which sample columns begin.
pub const FORMAT_COLUMN: &str = "FORMAT";

/// The BAM suffix stripped from sample names.
pub const BAM_SUFFIX: &str = ".bam";

/// The header of a VCF file.
#[derive(Clone, Debug, PartialEq)]
pub struct VcfHeader {
    /// Every line before the `#CHROM` line, verbatim without the line ending.
    pub meta: Vec<String>,
    /// The tab-separated column names of the `#CHROM` line.
    pub columns: Vec<String>,
    /// Whether any line follows the `#CHROM` line.
    pub has_records: bool,
}

impl VcfHeader {
    /// Read the header from the start of a VCF stream, leaving the reader
    /// positioned at the first data line.
    pub fn read<R: BufRead>(reader: &mut R, source: &str) -> Result<Self, PopmungeError> {
        let mut meta = Vec::new();
        let mut line = String::new();
        loop {
            line.clear();
            if reader.read_line(&mut line)? == 0 {
                return Err(PopmungeError::MissingVcfHeader(source.to_string()));
            }
            let trimmed = trim_line_ending(&line);
            if trimmed.starts_with(COLUMN_HEADER_PREFIX) {
                let columns = trimmed.split('\t').map(String::from).collect();
                let has_records = !reader.fill_buf()?.is_empty();
                return Ok(Self {
                    meta,
                    columns,
                    has_records,
                });
            }
            meta.push(trimmed.to_string());
        }
    }

    /// The index of the `FORMAT` column.
    pub fn format_index(&self) -> Result<usize, PopmungeError> {
        self.columns
            .iter()
            .position(|name| name == FORMAT_COLUMN)
            .ok_or(PopmungeError::MissingFormatColumn)
    }

    /// The sample names, i.e. all columns after `FORMAT`.
    pub fn sample_names(&self) -> Result<&[String], PopmungeError> {
        let format_index = self.format_index()?;
        Ok(&self.columns[format_index + 1..])
    }

    /// Whether sample names still carry BAM paths and need rewriting.
    ///
    /// Names are rewritten only when *every* sample contains `.bam`, so a
    /// file without sample columns is rewritten too.
    pub fn needs_reheader(&self) -> Result<bool, PopmungeError> {
        let samples = self.sample_names()?;
        Ok(samples.iter().all(|name| name.contains(BAM_SUFFIX)))
    }

    /// A copy of this header with every column name sanitized.
    pub fn sanitized(&self) -> Self {
        Self {
            meta: self.meta.clone(),
            columns: self
                .columns
                .iter()
                .map(|name| sanitize_sample_name(name))
                .collect(),
            has_records: self.has_records,
        }
    }

    /// The `#CHROM` line, joined back together with tabs.
    pub fn column_line(&self) -> String {
        self.columns.join("\t")
    }

    /// All header lines, meta lines first.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = self.meta.clone();
        lines.push(self.column_line());
        lines
    }

    /// Write all header lines.
    pub fn write<W: Write + ?Sized>(&self, writer: &mut W) -> Result<(), PopmungeError> {
        for line in self.lines() {
            writeln!(writer, "{}", line)?;
        }
        Ok(())
    }
}

/// Strip a trailing `\n` or `\r\n`.
pub fn trim_line_ending(line: &str) -> &str {
    line.trim_end_matches(['\n', '\r'])
}

/// Turn an alignment path into a sample name: remove every `.bam` and keep
/// only the last path component, e.g. `some/dir/a.bam` becomes `a`.
pub fn sanitize_sample_name(name: &str) -> String {
    let stripped = name.replace(BAM_SUFFIX, "");
    stripped
        .rsplit('/')
        .next()
        .unwrap_or(stripped.as_str())
        .to_string()
}

/// Extract the `(CHROM, POS)` site key of a data line. Returns `None` when
/// the line has no `POS` field or it does not parse.
pub fn site_key(line: &str) -> Option<(&str, Position)> {
    let mut fields = line.splitn(3, '\t');
    let chrom = fields.next()?;
    let pos = fields.next()?.trim().parse::<Position>().ok()?;
    Some((chrom, pos))
}

/// Return the column names of a VCF file's `#CHROM` line.
pub fn get_header(filepath: impl Into<PathBuf>) -> Result<Vec<String>, PopmungeError> {
    let input_file = InputFile::new(filepath);
    let mut reader = input_file.reader()?;
    let header = VcfHeader::read(&mut reader, &input_file.display_path())?;
    Ok(header.columns)
}

/// Copy the header lines of a VCF file verbatim to `output`, returning the
/// column names; a file with no data lines after its header yields an empty
/// list.
pub fn write_header(
    filepath: impl Into<PathBuf>,
    output: impl Into<PathBuf>,
) -> Result<Vec<String>, PopmungeError> {
    let input_file = InputFile::new(filepath);
    let mut reader = input_file.reader()?;
    let header = VcfHeader::read(&mut reader, &input_file.display_path())?;

    let mut writer = OutputFile::new(output).writer()?;
    header.write(&mut writer)?;
    writer.finish()?;

    if header.has_records {
        Ok(header.columns)
    } else {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utilities::{write_gzipped, VCF_FIXED_COLUMNS};
    use std::io::Cursor;

    fn vcf_text(samples: &str, body: &str) -> String {
        format!(
            "##fileformat=VCFv4.2\n##source=test\n{}\t{}\n{}",
            VCF_FIXED_COLUMNS, samples, body
        )
    }

    #[test]
    fn test_sanitize_sample_name() {
        assert_eq!(sanitize_sample_name("some/dir/a.bam"), "a");
        assert_eq!(sanitize_sample_name("A.bam"), "A");
        assert_eq!(sanitize_sample_name("plain"), "plain");
        assert_eq!(sanitize_sample_name("#CHROM"), "#CHROM");
        assert_eq!(sanitize_sample_name("x.bam.sorted.bam"), "x.sorted");
    }

    #[test]
    fn test_read_header() {
        let text = vcf_text("path/a.bam\tpath/b.bam", "chr1\t1\t.\tA\tG\t.\t.\t.\tGT\t0/1\t1/1\n");
        let mut reader = Cursor::new(text);
        let header = VcfHeader::read(&mut reader, "test").unwrap();
        assert_eq!(header.meta.len(), 2);
        assert_eq!(header.columns[0], "#CHROM");
        assert_eq!(header.sample_names().unwrap(), &["path/a.bam", "path/b.bam"]);
        assert!(header.has_records);
        assert!(header.needs_reheader().unwrap());

        // the reader is left at the first data line
        let mut rest = String::new();
        reader.read_line(&mut rest).unwrap();
        assert!(rest.starts_with("chr1\t1"));
    }

    #[test]
    fn test_read_header_missing() {
        let mut reader = Cursor::new("##fileformat=VCFv4.2\nchr1\t1\n");
        assert!(matches!(
            VcfHeader::read(&mut reader, "test"),
            Err(PopmungeError::MissingVcfHeader(_))
        ));
    }

    #[test]
    fn test_needs_reheader() {
        let header = |samples: &str| {
            let mut reader = Cursor::new(vcf_text(samples, ""));
            VcfHeader::read(&mut reader, "test").unwrap()
        };
        assert!(!header("a\tb").needs_reheader().unwrap());
        assert!(!header("a.bam\tb").needs_reheader().unwrap());
        assert!(header("a.bam\tdir/b.bam").needs_reheader().unwrap());
        assert!(!header("a.bam\tb").has_records);
    }

    #[test]
    fn test_needs_reheader_without_samples() {
        let mut reader = Cursor::new(format!(
            "##x\n{}\nchr1\t1\t.\tA\tG\t.\t.\t.\tGT\n",
            VCF_FIXED_COLUMNS
        ));
        let header = VcfHeader::read(&mut reader, "test").unwrap();
        assert!(header.sample_names().unwrap().is_empty());
        assert!(header.needs_reheader().unwrap());
    }

    #[test]
    fn test_missing_format_column() {
        let mut reader = Cursor::new("#CHROM\tPOS\tID\n");
        let header = VcfHeader::read(&mut reader, "test").unwrap();
        assert!(matches!(
            header.needs_reheader(),
            Err(PopmungeError::MissingFormatColumn)
        ));
    }

    #[test]
    fn test_site_key() {
        assert_eq!(site_key("chr1\t10\t.\tA\tG"), Some(("chr1", 10)));
        assert_eq!(site_key("chr1\tten\t."), None);
        assert_eq!(site_key("chr1"), None);
    }

    #[test]
    fn test_get_and_write_header() {
        let dir = tempfile::tempdir().unwrap();
        let vcf = write_gzipped(
            dir.path(),
            "in.vcf.gz",
            &vcf_text("path/a.bam\tpath/b.bam", "chr1\t1\t.\tA\tG\t.\t.\t.\tGT\t0/1\t1/1\n"),
        );

        let names = get_header(&vcf).unwrap();
        assert_eq!(
            names[..9].iter().map(String::as_str).collect::<Vec<_>>(),
            VCF_FIXED_COLUMNS.split('\t').collect::<Vec<_>>()
        );
        assert_eq!(&names[9..], &["path/a.bam", "path/b.bam"]);

        let out = dir.path().join("out.vcf");
        let written = write_header(&vcf, &out).unwrap();
        assert_eq!(written, names);
        let text = std::fs::read_to_string(&out).unwrap();
        assert!(text.contains(&format!("{}\tpath/a.bam\tpath/b.bam", VCF_FIXED_COLUMNS)));
        assert!(!text.contains("chr1\t1"));
    }

    #[test]
    fn test_write_header_without_records() {
        let dir = tempfile::tempdir().unwrap();
        let vcf = write_gzipped(dir.path(), "in.vcf.gz", &vcf_text("a.bam", ""));
        let out = dir.path().join("out.vcf");
        assert!(write_header(&vcf, &out).unwrap().is_empty());
        assert!(out.exists());
    }
}
