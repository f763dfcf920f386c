use std::io;
use std::path::Path;
use std::thread;
use std::time::Duration;

use crate::error::{Error, Result};

// How long to wait after handing the file to the viewer before it gets deleted.
// This only narrows the race with the viewer reading the file, it doesn't remove it.
pub const SETTLE_DELAY: Duration = Duration::from_secs(1);

// Opener hands a file over to an application which can display it.
pub trait Opener {
    fn open(&self, path: &Path) -> io::Result<()>;
}

// SystemOpener opens files with the default application registered in the
// host OS for their type. It returns once the launch command exits.
pub struct SystemOpener;

impl Opener for SystemOpener {
    fn open(&self, path: &Path) -> io::Result<()> {
        open::that(path)
    }
}

pub struct Launcher {
    opener: Box<dyn Opener>,
    settle: Duration,
}

impl Default for Launcher {
    fn default() -> Self {
        Launcher::new(Box::new(SystemOpener))
    }
}

impl Launcher {
    pub fn new(opener: Box<dyn Opener>) -> Self {
        Launcher {
            opener,
            settle: SETTLE_DELAY,
        }
    }

    pub fn settle(mut self, delay: Duration) -> Self {
        self.settle = delay;
        self
    }

    // Open the rendered html, then give the viewer a moment to read it.
    pub fn launch(&self, path: &Path) -> Result<()> {
        log::info!("opening {} in the default html viewer", path.display());
        self.opener.open(path).map_err(|source| Error::Launch {
            path: path.to_path_buf(),
            source,
        })?;
        thread::sleep(self.settle);
        Ok(())
    }
}
