//! Buffers log lines so the UI can drain them into its log panel. Every line also goes to stderr.

use once_cell::sync::{Lazy, OnceCell};
use std::sync::Mutex;

static LOG_BUFFER: Lazy<Mutex<Vec<String>>> = Lazy::new(|| Mutex::new(Vec::new()));
static LOGGER: OnceCell<BufferLogger> = OnceCell::new();

const MAX_BUFFER_LEN: usize = 500;

struct BufferLogger {
    level: log::LevelFilter,
}

fn should_log(level: log::Level, max: log::LevelFilter) -> bool {
    // Errors and warnings are kept whatever the configured level.
    level <= log::Level::Warn || level <= max
}

impl log::Log for BufferLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        should_log(metadata.level(), self.level)
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        push(format!("[{}] {}: {}", record.level(), record.target(), record.args()));
    }

    fn flush(&self) {}
}

/// Push a line (also prints to stderr).
pub fn push(s: String) {
    eprintln!("{}", s);
    if let Ok(mut v) = LOG_BUFFER.lock() {
        v.push(s);
        let n = v.len();
        if n > MAX_BUFFER_LEN {
            v.drain(0..n - MAX_BUFFER_LEN);
        }
    }
}

/// Drain and clear buffered lines.
pub fn drain() -> Vec<String> {
    LOG_BUFFER
        .lock()
        .map(|mut v| std::mem::take(&mut *v))
        .unwrap_or_default()
}

/// Install the buffering logger. Later calls keep the first level.
pub fn init(level: log::LevelFilter) {
    let logger = LOGGER.get_or_init(|| BufferLogger { level });
    if log::set_logger(logger).is_ok() {
        log::set_max_level(logger.level.max(log::LevelFilter::Warn));
    }
}
