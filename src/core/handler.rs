//! Record handler: renders each record to the structured sink and the console
//!
//! A handler is immutable once built. `with_attrs` and `with_group` return new
//! handlers that share the same outputs, so deriving from one handler on
//! several threads at once needs no synchronization.

use super::{
    attribute::Attr,
    error::{LoggerError, Result},
    group::AttrTree,
    log_level::LogLevel,
    record::Record,
    source::process_root,
    timestamp::TimestampFormat,
};
use crate::output::{ConsoleFormatter, JsonEncoder, SharedWriter};

#[derive(Debug, Clone)]
pub struct Handler {
    sink: SharedWriter,
    console: SharedWriter,
    console_mode: bool,
    min_level: LogLevel,
    attrs: AttrTree,
    encoder: JsonEncoder,
    formatter: ConsoleFormatter,
}

impl Handler {
    /// Create a handler writing structured records to `sink` and console
    /// lines to stdout.
    ///
    /// With `console_mode` set the structured write is skipped, which is what
    /// you want when `sink` is itself the terminal.
    pub fn new(sink: SharedWriter, console_mode: bool) -> Self {
        Self::from_parts(
            sink,
            SharedWriter::stdout(),
            console_mode,
            LogLevel::Trace,
            true,
            TimestampFormat::default(),
            process_root().to_string(),
        )
    }

    pub(crate) fn from_parts(
        sink: SharedWriter,
        console: SharedWriter,
        console_mode: bool,
        min_level: LogLevel,
        use_colors: bool,
        timestamp_format: TimestampFormat,
        source_root: String,
    ) -> Self {
        Self {
            sink,
            console,
            console_mode,
            min_level,
            attrs: AttrTree::new(),
            encoder: JsonEncoder::new(timestamp_format.clone(), source_root.clone()),
            formatter: ConsoleFormatter::new(use_colors, timestamp_format, source_root),
        }
    }

    /// The structured sink
    pub fn writer(&self) -> &SharedWriter {
        &self.sink
    }

    pub fn is_console_mode(&self) -> bool {
        self.console_mode
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        level.is_enabled_at(self.min_level)
    }

    /// The bound attribute context
    pub fn attrs(&self) -> &AttrTree {
        &self.attrs
    }

    #[must_use]
    pub fn with_attrs(&self, attrs: impl IntoIterator<Item = Attr>) -> Self {
        Self {
            attrs: self.attrs.with_attrs(attrs),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_group(&self, name: impl Into<String>) -> Self {
        Self {
            attrs: self.attrs.with_group(name),
            ..self.clone()
        }
    }

    /// Emit one record.
    ///
    /// Outside console mode the structured line is written first; if that
    /// write fails the error is returned and no console line is printed.
    /// Console write failures are reported on stderr and otherwise ignored.
    pub fn handle(&self, record: &Record) -> Result<()> {
        let attrs = self.attrs.render_with(record.attrs.iter().cloned());

        if !self.console_mode {
            let line = self.encoder.encode(record, &attrs)?;
            self.sink.write_line(&line).map_err(LoggerError::sink_write)?;
        }

        let line = self.formatter.format(record, &attrs);
        if let Err(e) = self.console.write_line(&line) {
            eprintln!("[LOGGER ERROR] Console write to {} failed: {}", self.console.name(), e);
        }
        Ok(())
    }

    /// Flush both outputs, reporting the first failure
    pub fn flush(&self) -> Result<()> {
        let sink = self
            .sink
            .flush()
            .map_err(|e| LoggerError::flush("sink", e));
        let console = self
            .console
            .flush()
            .map_err(|e| LoggerError::flush("console", e));
        sink.and(console)
    }
}
