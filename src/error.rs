//! Error types for every stage of a render run.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Every failure a run can hit. All of them abort the run except
/// [`Error::Cleanup`], which is only reported on stderr.
#[derive(Debug, Error)]
pub enum Error {
    #[error("error opening input file {path}: {source}")]
    InputOpen {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("error reading all Markdown content from input: {0}")]
    InputRead(#[source] io::Error),

    #[error("error creating temporary directory: {0}")]
    TempDir(#[source] io::Error),

    #[error("error creating temporary output file {}: {source}", .path.display())]
    TempFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("error building html output prefix: {0}")]
    Template(#[from] tinytemplate::error::Error),

    #[error("error rendering Markdown to sink: {0}")]
    Render(#[source] io::Error),

    #[error("error opening OS's default web page viewer for {}: {source}", .path.display())]
    Launch {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("error removing temporary directory {}: {source}", .path.display())]
    Cleanup {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read config \"{path}\": {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config \"{path}\": {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config value: {0}")]
    ConfigValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_stage() {
        let e = Error::InputOpen {
            path: "missing.md".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(
            e.to_string(),
            "error opening input file missing.md: not found"
        );

        let e = Error::TempDir(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        assert_eq!(e.to_string(), "error creating temporary directory: denied");

        let e = Error::Launch {
            path: PathBuf::from("/tmp/rmd1/out.html"),
            source: io::Error::new(io::ErrorKind::Other, "no handler"),
        };
        assert!(e.to_string().contains("/tmp/rmd1/out.html"));
    }
}
