//! rmd renders markdown into html and optionally previews the result in the
//! host's default web page viewer.
//!
//! A run is a straight pipeline: read the input, pick the sink (stdout or a
//! temporary `out.html`), write the optional styled preamble, convert, write
//! the closing tags, and in preview mode open the file and remove the
//! temporary directory again.

use std::io;

pub mod cli;
pub mod config;
pub mod convert;
pub mod error;
pub mod input;
pub mod launch;
pub mod logger;
pub mod pipeline;
pub mod sink;
pub mod style;

pub use config::Config;
pub use convert::Converter;
pub use error::{Error, Result};
pub use launch::{Launcher, Opener, SystemOpener};
pub use pipeline::{Options, Pipeline};

// Run the pipeline against the process's stdin and stdout.
pub fn run(options: Options) -> Result<()> {
    Pipeline::new(options).run(io::stdin().lock(), io::stdout().lock())
}
