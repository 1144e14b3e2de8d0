//! File sink for the `log` facade. The terminal belongs to the UI, so log
//! lines go to `.deckgen/deckgen.log` instead of stderr.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use log::{LevelFilter, Log, Metadata, Record};

use dg_base::DeckError;

pub struct FileLogger {
    file: Mutex<File>,
    level: LevelFilter,
}

impl FileLogger {
    pub fn open(path: &Path, level: LevelFilter) -> Result<Self, DeckError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| DeckError::io(parent.display().to_string(), e))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| DeckError::io(path.display().to_string(), e))?;
        Ok(Self { file: Mutex::new(file), level })
    }
}

/// One log line: `2026-01-02T03:04:05.678 INFO  target: message`
pub fn format_line(timestamp: &str, record: &Record) -> String {
    format!("{} {:<5} {}: {}\n", timestamp, record.level(), record.target(), record.args())
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let timestamp = chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f").to_string();
        let line = format_line(&timestamp, record);
        if let Ok(mut file) = self.file.lock() {
            let _ = file.write_all(line.as_bytes());
        }
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}

/// Install the file logger as the global `log` backend.
pub fn init(path: &Path, level: LevelFilter) -> Result<(), DeckError> {
    let logger = FileLogger::open(path, level)?;
    // A second init (tests) keeps the first logger.
    if log::set_boxed_logger(Box::new(logger)).is_ok() {
        log::set_max_level(level);
    }
    Ok(())
}
