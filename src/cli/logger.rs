//! Minimal stderr logger backing `--verbose`.

use log::{Level, Log, Metadata, Record, SetLoggerError};

struct StderrLogger {
    level: Level,
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{} {}] {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

/// Installs the logger: `Debug` when verbose, otherwise warnings only.
pub fn init(verbose: bool) -> Result<(), SetLoggerError> {
    let level = if verbose { Level::Debug } else { Level::Warn };
    log::set_boxed_logger(Box::new(StderrLogger { level }))?;
    log::set_max_level(level.to_level_filter());
    Ok(())
}
