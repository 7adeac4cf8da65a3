//! Essential TSV parsing functionality, which wraps the blazingly-fast [`csv`] crate.

use csv::{Reader, ReaderBuilder};
use std::io::Read;
use std::path::PathBuf;

use crate::error::PopmungeError;
use crate::io::file::InputFile;

/// Build a TSV reader which ignores comment lines, works on gzip-compressed
/// files, and tolerates ragged rows.
///
/// Ragged rows are allowed since upstream tools are not always consistent about
/// trailing columns; parsers decide what a short row means.
pub fn build_tsv_reader(
    filepath: impl Into<PathBuf>,
    has_headers: bool,
) -> Result<Reader<Box<dyn Read>>, PopmungeError> {
    let input_file = InputFile::new(filepath);
    let stream: Box<dyn Read> = Box::new(input_file.reader()?);

    let reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(has_headers)
        .flexible(true)
        .comment(Some(b'#'))
        .from_reader(stream);
    Ok(reader)
}

/// Parse an optional field permissively: missing or unparsable cells are `None`.
pub fn parse_optional<T: std::str::FromStr>(field: Option<&str>) -> Option<T> {
    field.and_then(|value| value.trim().parse::<T>().ok())
}
