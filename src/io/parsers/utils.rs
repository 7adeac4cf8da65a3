use std::path::{Path, PathBuf};

/// Get the directory an input file lives in, so that derived outputs can be
/// written alongside it. A bare filename resolves to the current directory
/// (an empty path).
pub fn sibling_path<P: AsRef<Path>>(input: P, filename: &str) -> PathBuf {
    let directory = input
        .as_ref()
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    directory.join(filename)
}
