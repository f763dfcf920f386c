use std::fs::File;
use std::io::Read;

use crate::error::{Error, Result};

// The input path which means "read from standard input".
pub const STDIN_PATH: &str = "-";

// Check whether the input path refers to standard input.
pub fn is_stdin(path: &str) -> bool {
    path.is_empty() || path == STDIN_PATH
}

// Read the whole markdown document into memory, either from the named file or
// from 'stdin' when the path is empty or "-".
pub fn read_input(path: &str, stdin: impl Read) -> Result<Vec<u8>> {
    if is_stdin(path) {
        log::debug!("reading markdown from standard input");
        return read_all(stdin);
    }

    let file = File::open(path).map_err(|source| Error::InputOpen {
        path: path.to_string(),
        source,
    })?;
    log::debug!("reading markdown from \"{}\"", path);
    read_all(file)
}

fn read_all(mut reader: impl Read) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf).map_err(Error::InputRead)?;
    Ok(buf)
}
