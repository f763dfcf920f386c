use std::io::{BufWriter, Read, Write};
use std::path::PathBuf;

use crate::config::Config;
use crate::convert::Converter;
use crate::error::Result;
use crate::input::{self, STDIN_PATH};
use crate::launch::Launcher;
use crate::sink::{report_cleanup, PreviewDir, Sink};
use crate::style::StyleWrapper;

// Options of a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub input: String,
    pub preview: bool,
    pub style: bool,
    pub config: Config,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            input: String::from(STDIN_PATH),
            preview: false,
            style: false,
            config: Config::default(),
        }
    }
}

// Pipeline reads the markdown, renders it into the selected sink and, in preview
// mode, opens the result and removes the temporary directory afterwards.
pub struct Pipeline {
    options: Options,
    converter: Converter,
    launcher: Launcher,
    temp_root: PathBuf,
}

impl Pipeline {
    pub fn new(options: Options) -> Self {
        Pipeline {
            options,
            converter: Converter::default(),
            launcher: Launcher::default(),
            temp_root: std::env::temp_dir(),
        }
    }

    pub fn launcher(mut self, launcher: Launcher) -> Self {
        self.launcher = launcher;
        self
    }

    // Directory under which the preview directory gets created.
    pub fn temp_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.temp_root = root.into();
        self
    }

    pub fn run<R: Read, W: Write>(&self, stdin: R, stdout: W) -> Result<()> {
        let markdown = input::read_input(&self.options.input, stdin)?;

        // The sink is released before the directory holding it, on every path.
        let preview = if self.options.preview {
            Some(PreviewDir::create_in(&self.temp_root)?)
        } else {
            None
        };
        let mut sink = match &preview {
            Some(dir) => Sink::File(BufWriter::new(dir.create_output()?)),
            None => Sink::Stdout(stdout),
        };

        self.render(&markdown, &mut sink)?;
        sink.finish()?;

        let Some(dir) = preview else {
            return Ok(());
        };
        let launched = self.launcher.launch(dir.output_path());
        if let Err(e) = dir.close() {
            report_cleanup(&e);
        }
        launched
    }

    // Write the converted markdown, wrapped in the styled page when enabled.
    fn render(&self, markdown: &[u8], sink: &mut dyn Write) -> Result<()> {
        let wrapper = if self.options.style {
            Some(StyleWrapper::new(&self.options.config)?)
        } else {
            None
        };

        if let Some(w) = &wrapper {
            w.write_preamble(sink)?;
        }
        self.converter.convert(markdown, sink)?;
        if let Some(w) = &wrapper {
            w.write_suffix(sink)?;
        }
        log::info!("rendered {} bytes of markdown", markdown.len());
        Ok(())
    }
}
