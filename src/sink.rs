//! Output destinations of a run.
//!
//! A run writes either to standard output or, in preview mode, to `out.html`
//! inside a freshly created temporary directory. [`PreviewDir`] owns that
//! directory and removes it when it is closed or dropped, so every exit path
//! of a run releases it.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::error::{Error, Result};

/// Prefix of the temporary directories created in preview mode.
pub const TEMP_DIR_PREFIX: &str = "rmd";

/// Name of the single file rendered into the temporary directory.
pub const OUTPUT_FILE_NAME: &str = "out.html";

/// A uniquely named temporary directory holding the preview output.
#[derive(Debug)]
pub struct PreviewDir {
    dir: Option<TempDir>,
    output: PathBuf,
}

impl PreviewDir {
    /// Create the directory under `root`.
    pub fn create_in(root: impl AsRef<Path>) -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix(TEMP_DIR_PREFIX)
            .tempdir_in(root)
            .map_err(Error::TempDir)?;
        let output = dir.path().join(OUTPUT_FILE_NAME);
        log::debug!("created temporary directory {}", dir.path().display());
        Ok(PreviewDir {
            dir: Some(dir),
            output,
        })
    }

    pub fn path(&self) -> &Path {
        self.dir
            .as_ref()
            .map(TempDir::path)
            .unwrap_or_else(|| Path::new(""))
    }

    pub fn output_path(&self) -> &Path {
        &self.output
    }

    /// Create the output file, which becomes the sink of the run.
    pub fn create_output(&self) -> Result<File> {
        File::create(&self.output).map_err(|source| Error::TempFile {
            path: self.output.clone(),
            source,
        })
    }

    /// Remove the directory and everything in it.
    pub fn close(mut self) -> Result<()> {
        self.remove()
    }

    fn remove(&mut self) -> Result<()> {
        let Some(dir) = self.dir.take() else {
            return Ok(());
        };
        let path = dir.path().to_path_buf();
        dir.close()
            .map_err(|source| Error::Cleanup {
                path: path.clone(),
                source,
            })?;
        log::debug!("removed temporary directory {}", path.display());
        Ok(())
    }
}

impl Drop for PreviewDir {
    fn drop(&mut self) {
        if let Err(e) = self.remove() {
            report_cleanup(&e);
        }
    }
}

/// Report a failed removal on stderr. The run's outcome stays as it is, so
/// this goes out regardless of the log level.
pub fn report_cleanup(e: &Error) {
    eprintln!("rmd: {}", e);
}

/// The single destination of the rendered html.
pub enum Sink<W: Write> {
    Stdout(W),
    File(BufWriter<File>),
}

impl<W: Write> Sink<W> {
    /// Flush buffered output and release the destination.
    pub fn finish(mut self) -> Result<()> {
        self.flush().map_err(Error::Render)
    }
}

impl<W: Write> Write for Sink<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Sink::Stdout(w) => w.write(buf),
            Sink::File(f) => f.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Sink::Stdout(w) => w.flush(),
            Sink::File(f) => f.flush(),
        }
    }
}
