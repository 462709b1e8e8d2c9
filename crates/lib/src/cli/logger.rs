use std::io::Write;

use log::{Log, Metadata, Record};

/// Logger writing to stderr, so that it never interleaves with answers.
pub(crate) struct Logger;

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let _ = writeln!(
            std::io::stderr().lock(),
            "{level:5} {target}: {args}",
            level = record.level(),
            target = record.target(),
            args = record.args(),
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}
