//! Input/Output file handling with [`InputFile`] and [`OutputFile`].
//!
//! These types abstract over reading/writing both plaintext and gzip-compressed
//! input/output. Compressed output is written as BGZF, so it can be indexed
//! by downstream tools like `bcftools` and `tabix`.

use flate2::read::MultiGzDecoder;
use noodles::bgzf;
use std::fs::File;
use std::io::Write;
use std::io::{self, BufWriter};
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

/// Check if a file is a gzipped by looking for the magic numbers.
///
/// Files shorter than two bytes (e.g. empty files) are plaintext.
pub fn is_gzipped_file(file_path: impl AsRef<Path>) -> io::Result<bool> {
    let file = File::open(file_path)?;
    let mut buffer = Vec::with_capacity(2);
    file.take(2).read_to_end(&mut buffer)?;
    Ok(buffer == [0x1f, 0x8b])
}

/// Whether a path has a `.gz` or `.bgz` extension.
pub fn has_gzip_extension(filepath: impl AsRef<Path>) -> bool {
    filepath
        .as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| ext == "gz" || ext == "bgz")
}

/// Represents an input file.
///
/// This abstracts how data is read in, allowing for both plaintext and gzip-compressed
/// input to be read through a common interface. BGZF files, which are a series of
/// concatenated gzip members, are decompressed in full.
#[derive(Clone, Debug)]
pub struct InputFile {
    pub filepath: PathBuf,
}

impl InputFile {
    /// Constructs a new `InputFile`.
    ///
    /// # Arguments
    ///
    /// * `filepath` - the path to the file. Compression is detected from the file's
    /// magic numbers rather than its extension.
    pub fn new(filepath: impl Into<PathBuf>) -> Self {
        Self {
            filepath: filepath.into(),
        }
    }

    /// Opens the file and returns a buffered reader.
    ///
    /// # Returns
    ///
    /// A result containing a `BufReader<Box<dyn Read>>` on success, or an `io::Error` on failure.
    pub fn reader(&self) -> io::Result<BufReader<Box<dyn Read>>> {
        let file = File::open(&self.filepath)?;
        let is_gzipped = is_gzipped_file(&self.filepath)?;
        let reader: Box<dyn Read> = if is_gzipped {
            Box::new(MultiGzDecoder::new(file))
        } else {
            Box::new(file)
        };
        Ok(BufReader::new(reader))
    }

    /// The file path as a `String`, for error messages.
    pub fn display_path(&self) -> String {
        self.filepath.to_string_lossy().to_string()
    }
}

enum OutputDestination {
    File(PathBuf),
    Stdout,
}

/// Represents an output file.
///
/// This abstracts writing both plaintext and BGZF-compressed files.
pub struct OutputFile {
    destination: OutputDestination,
}

impl OutputFile {
    /// Constructs a new `OutputFile`.
    ///
    /// # Arguments
    ///
    /// * `filepath` - the path to the file. If the file extension is `.gz`,
    /// `OutputFile` will write BGZF-compressed output.
    pub fn new(filepath: impl Into<PathBuf>) -> Self {
        Self {
            destination: OutputDestination::File(filepath.into()),
        }
    }

    /// Constructs a new [`OutputFile`] for standard output.
    pub fn new_stdout() -> Self {
        Self {
            destination: OutputDestination::Stdout,
        }
    }

    /// Opens the file and returns a writer.
    pub fn writer(&self) -> io::Result<OutputWriter> {
        let stream = match &self.destination {
            OutputDestination::File(path) => {
                if has_gzip_extension(path) {
                    OutputStream::Bgzf(bgzf::Writer::new(File::create(path)?))
                } else {
                    OutputStream::Plain(BufWriter::new(File::create(path)?))
                }
            }
            OutputDestination::Stdout => OutputStream::Stdout(BufWriter::new(io::stdout())),
        };
        Ok(OutputWriter { stream })
    }
}

enum OutputStream {
    Plain(BufWriter<File>),
    Bgzf(bgzf::Writer<File>),
    Stdout(BufWriter<io::Stdout>),
}

/// A writer opened by [`OutputFile::writer`].
///
/// Call [`OutputWriter::finish`] once all output is written: for BGZF output
/// it writes the final blocks and the EOF marker, and reports any error
/// doing so. Dropping an unfinished writer still finishes it, but errors are
/// lost.
pub struct OutputWriter {
    stream: OutputStream,
}

impl OutputWriter {
    /// Flush all output, and for BGZF output write the EOF block.
    pub fn finish(self) -> io::Result<()> {
        match self.stream {
            OutputStream::Plain(mut writer) => writer.flush(),
            OutputStream::Bgzf(writer) => writer.finish().map(|_| ()),
            OutputStream::Stdout(mut writer) => writer.flush(),
        }
    }
}

impl Write for OutputWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &mut self.stream {
            OutputStream::Plain(writer) => writer.write(buf),
            OutputStream::Bgzf(writer) => writer.write(buf),
            OutputStream::Stdout(writer) => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.stream {
            OutputStream::Plain(writer) => writer.flush(),
            OutputStream::Bgzf(writer) => writer.flush(),
            OutputStream::Stdout(writer) => writer.flush(),
        }
    }
}
