//! Browser console backend for the `log` facade.
//!
//! Trace records from drag-over and hover handlers can fire on every pointer
//! move, so they are throttled.

use log::{Level, LevelFilter, Log, Metadata, Record};
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};

static LOGGER: ConsoleLogger = ConsoleLogger;
static TRACE_COUNT: AtomicUsize = AtomicUsize::new(0);
const TRACE_WINDOW: usize = 100;
const MAX_TRACES_PER_WINDOW: usize = 5;

struct ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if record.level() == Level::Trace && !trace_allowed() {
            return;
        }
        match record.level() {
            Level::Error | Level::Warn => {
                zoon::eprintln!("[{}] {}: {}", record.level(), record.target(), record.args())
            }
            _ => zoon::println!("[{}] {}: {}", record.level(), record.target(), record.args()),
        }
    }

    fn flush(&self) {}
}

fn trace_allowed() -> bool {
    let count = TRACE_COUNT.fetch_add(1, Ordering::Relaxed) % TRACE_WINDOW;
    count < MAX_TRACES_PER_WINDOW
}

/// Parse a level name, falling back to `info`.
pub fn parse_level(level: &str) -> LevelFilter {
    LevelFilter::from_str(level.trim()).unwrap_or(LevelFilter::Info)
}

/// Install the console logger. Later calls only adjust the level.
pub fn init(level: &str) {
    let level = parse_level(level);
    if log::set_logger(&LOGGER).is_err() {
        log::debug!("logger already installed");
    }
    log::set_max_level(level);
}
