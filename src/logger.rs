//! Diagnostic logging for rmd
//!
//! Controlled by the RMD_LOG environment variable, either a level name
//! (off, error, warn, info, debug, trace) or a number:
//! - 0: No logging
//! - 1: Errors only
//! - 2: Warnings (default)
//! - 3: Info level (stage progress)
//! - 4: Debug level (paths, config)
//! - 5: Trace level
//!
//! Everything goes to stderr, stdout is reserved for the rendered html.

use std::io::Write;
use std::str::FromStr;
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

use log::{LevelFilter, Log, Metadata, Record};

pub const LOG_ENV: &str = "RMD_LOG";

const DEFAULT_LEVEL: LevelFilter = LevelFilter::Warn;

struct StderrLogger {
    level: LevelFilter,
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!(
            "[{}] [{:<5}] [{}] {}\n",
            get_timestamp(),
            record.level(),
            record.target(),
            record.args()
        );
        // Nothing sensible to do when stderr itself is gone.
        let _ = std::io::stderr().lock().write_all(line.as_bytes());
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static LOGGER: OnceLock<StderrLogger> = OnceLock::new();

fn get_timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:06}", now.as_secs(), now.subsec_micros())
}

// Parse a level from its name or its number, unknown values fall back to the default.
pub fn parse_level(val: &str) -> LevelFilter {
    let val = val.trim();
    match val.parse::<u8>() {
        Ok(0) => LevelFilter::Off,
        Ok(1) => LevelFilter::Error,
        Ok(2) => LevelFilter::Warn,
        Ok(3) => LevelFilter::Info,
        Ok(4) => LevelFilter::Debug,
        Ok(_) => LevelFilter::Trace,
        Err(_) => LevelFilter::from_str(val).unwrap_or(DEFAULT_LEVEL),
    }
}

fn level_from_env() -> LevelFilter {
    match std::env::var(LOG_ENV) {
        Ok(val) => parse_level(&val),
        Err(_) => DEFAULT_LEVEL,
    }
}

// Install the stderr logger, calling it more than once is harmless.
pub fn init() {
    let logger = LOGGER.get_or_init(|| StderrLogger {
        level: level_from_env(),
    });
    if log::set_logger(logger).is_ok() {
        log::set_max_level(logger.level);
    }
}
