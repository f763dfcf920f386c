use std::fmt;
use std::io::{self, Write};

use comrak::{Arena, Options};

use crate::error::{Error, Result};

/// Markdown to HTML conversion backed by `comrak`.
///
/// The default converter enables the GitHub flavored extension set (tables,
/// strikethrough, autolinks and task lists) and renders every soft line break
/// inside a paragraph as a hard `<br />`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Converter {
    pub gfm: bool,
    pub hard_wraps: bool,
}

impl Default for Converter {
    fn default() -> Self {
        Converter {
            gfm: true,
            hard_wraps: true,
        }
    }
}

impl Converter {
    // Render the markdown bytes straight into the sink. Bytes that are not valid
    // UTF-8 are replaced before parsing.
    pub fn convert(&self, markdown: &[u8], sink: &mut dyn Write) -> Result<()> {
        let text = String::from_utf8_lossy(markdown);
        let mut out = SinkWriter { sink, error: None };
        if self.format(&text, &mut out).is_err() {
            let e = out.error.take().unwrap_or_else(|| {
                io::Error::new(io::ErrorKind::Other, "formatting html failed")
            });
            return Err(Error::Render(e));
        }
        Ok(())
    }

    // Render a markdown string into an html fragment.
    pub fn to_html(&self, text: &str) -> String {
        let mut html = String::new();
        // writing into a String can't fail
        let _ = self.format(text, &mut html);
        html
    }

    fn format(&self, text: &str, mut out: &mut dyn fmt::Write) -> fmt::Result {
        let options = self.options();
        let arena = Arena::new();
        let root = comrak::parse_document(&arena, text, &options);
        comrak::format_html(root, &options, &mut out)
    }

    fn options(&self) -> Options {
        let mut options = Options::default();
        options.extension.table = self.gfm;
        options.extension.strikethrough = self.gfm;
        options.extension.autolink = self.gfm;
        options.extension.tasklist = self.gfm;
        options.render.hardbreaks = self.hard_wraps;
        options
    }
}

// SinkWriter lets the html formatter write into an io sink, the first io error is kept
// because fmt::Error carries no details.
struct SinkWriter<'sink_writer> {
    sink: &'sink_writer mut dyn Write,
    error: Option<io::Error>,
}

impl fmt::Write for SinkWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        match self.sink.write_all(s.as_bytes()) {
            Ok(()) => Ok(()),
            Err(e) => {
                self.error.get_or_insert(e);
                Err(fmt::Error)
            }
        }
    }
}
