//! A `log` backend for tests that records entries per thread.
//!
//! `#[tokio::test]` runs on a current-thread runtime, so everything a test logs
//! lands in that test's own buffer even when tests run in parallel.

use std::cell::RefCell;
use std::sync::Once;

use log::{Level, LevelFilter, Log, Metadata, Record};

thread_local! {
    static RECORDS: RefCell<Vec<(Level, String)>> = const { RefCell::new(Vec::new()) };
}

static INIT: Once = Once::new();
static LOGGER: CaptureLogger = CaptureLogger;

struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        // Only this crate, never reqwest/hyper.
        if !record.target().starts_with(env!("CARGO_CRATE_NAME")) {
            return;
        }
        RECORDS.with(|records| {
            records
                .borrow_mut()
                .push((record.level(), record.args().to_string()))
        });
    }

    fn flush(&self) {}
}

/// Installs the capture logger and drops anything this thread logged so far.
pub(crate) fn start() {
    INIT.call_once(|| {
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(LevelFilter::Trace);
        }
    });
    RECORDS.with(|records| records.borrow_mut().clear());
}

/// Error entries logged on this thread since [`start`], oldest first.
pub(crate) fn errors() -> Vec<String> {
    RECORDS.with(|records| {
        records
            .borrow()
            .iter()
            .filter(|(level, _)| *level == Level::Error)
            .map(|(_, message)| message.clone())
            .collect()
    })
}
