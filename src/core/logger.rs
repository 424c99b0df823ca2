//! Logger facade
//!
//! `Logger` owns no rendering logic. Every call shape converges on building
//! one [`Record`] and passing it to the bound [`Handler`]. All public emission
//! methods are `#[track_caller]`, so the record's source is the line that
//! called the logger, whichever method or macro was used.

use super::{
    attribute::Attr,
    error::{LoggerError, Result},
    handler::Handler,
    log_level::{LogLevel, TerminalAction},
    record::Record,
    source::{normalize_root, process_root, SourceLocation},
    timestamp::TimestampFormat,
};
use crate::output::SharedWriter;
use std::fmt;
use std::io::Write;
use std::sync::Arc;

/// Environment variable read by [`LoggerBuilder::from_env`] for the threshold
pub const LOG_LEVEL_ENV: &str = "LOG_LEVEL";

/// Environment variable that disables colors when set to a non-empty value
pub const NO_COLOR_ENV: &str = "NO_COLOR";

#[derive(Debug, Clone)]
pub struct Logger {
    handler: Arc<Handler>,
}

macro_rules! level_methods {
    ($($level:ident => $plain:ident, $formatted:ident;)*) => {
        $(
            #[track_caller]
            pub fn $plain(
                &self,
                message: impl fmt::Display,
                attrs: impl IntoIterator<Item = Attr>,
            ) -> Result<()> {
                self.emit(
                    LogLevel::$level,
                    message.to_string(),
                    attrs.into_iter().collect(),
                    SourceLocation::caller(),
                )
            }

            #[track_caller]
            pub fn $formatted(&self, args: fmt::Arguments<'_>) -> Result<()> {
                self.emit(
                    LogLevel::$level,
                    fmt::format(args),
                    Vec::new(),
                    SourceLocation::caller(),
                )
            }
        )*
    };
}

impl Logger {
    /// Create a logger writing structured records to `sink`.
    ///
    /// Pass `console_mode = true` when `sink` is the terminal, so records are
    /// only shown as console lines.
    pub fn new<W: Write + Send + 'static>(sink: W, console_mode: bool) -> Self {
        Self::from_handler(Handler::new(SharedWriter::new(sink), console_mode))
    }

    pub fn from_handler(handler: Handler) -> Self {
        Self {
            handler: Arc::new(handler),
        }
    }

    /// Console-mode logger on stdout
    pub fn stdout() -> Self {
        Self::builder().build()
    }

    /// Console-mode logger on stderr; console lines go to stderr as well
    pub fn stderr() -> Self {
        let stderr = SharedWriter::stderr();
        Self::builder()
            .shared_sink(stderr.clone())
            .shared_console_writer(stderr)
            .console_mode(true)
            .build()
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use duallog::prelude::*;
    ///
    /// let logger = Logger::builder()
    ///     .sink(std::io::sink())
    ///     .min_level(LogLevel::Debug)
    ///     .colors(false)
    ///     .build();
    /// assert!(!logger.enabled(LogLevel::Trace));
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    pub fn handler(&self) -> &Handler {
        &self.handler
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        self.handler.enabled(level)
    }

    /// Derive a logger with `attrs` bound to every record it emits
    #[must_use]
    pub fn with_attrs(&self, attrs: impl IntoIterator<Item = Attr>) -> Logger {
        Self::from_handler(self.handler.with_attrs(attrs))
    }

    /// Derive a logger whose later attributes are nested under `name`
    #[must_use]
    pub fn with_group(&self, name: impl Into<String>) -> Logger {
        Self::from_handler(self.handler.with_group(name))
    }

    /// Emit at an arbitrary level.
    ///
    /// `Panic` and `Fatal` never return: see [`Logger::panic`] and
    /// [`Logger::fatal`].
    #[track_caller]
    pub fn log(
        &self,
        level: LogLevel,
        message: impl fmt::Display,
        attrs: impl IntoIterator<Item = Attr>,
    ) -> Result<()> {
        self.emit(
            level,
            message.to_string(),
            attrs.into_iter().collect(),
            SourceLocation::caller(),
        )
    }

    #[track_caller]
    pub fn logf(&self, level: LogLevel, args: fmt::Arguments<'_>) -> Result<()> {
        self.emit(level, fmt::format(args), Vec::new(), SourceLocation::caller())
    }

    level_methods! {
        Trace => trace, tracef;
        Debug => debug, debugf;
        Info => info, infof;
        Warn => warn, warnf;
        Error => error, errorf;
    }

    /// Emit at `Panic`, then panic with the message as payload
    #[track_caller]
    pub fn panic(&self, message: impl fmt::Display, attrs: impl IntoIterator<Item = Attr>) -> ! {
        self.emit_terminal(
            LogLevel::Panic,
            TerminalAction::Panic,
            message.to_string(),
            attrs.into_iter().collect(),
            SourceLocation::caller(),
        )
    }

    #[track_caller]
    pub fn panicf(&self, args: fmt::Arguments<'_>) -> ! {
        self.emit_terminal(
            LogLevel::Panic,
            TerminalAction::Panic,
            fmt::format(args),
            Vec::new(),
            SourceLocation::caller(),
        )
    }

    /// Emit at `Fatal`, flush, then exit the process with status 1
    #[track_caller]
    pub fn fatal(&self, message: impl fmt::Display, attrs: impl IntoIterator<Item = Attr>) -> ! {
        self.emit_terminal(
            LogLevel::Fatal,
            TerminalAction::Exit(1),
            message.to_string(),
            attrs.into_iter().collect(),
            SourceLocation::caller(),
        )
    }

    #[track_caller]
    pub fn fatalf(&self, args: fmt::Arguments<'_>) -> ! {
        self.emit_terminal(
            LogLevel::Fatal,
            TerminalAction::Exit(1),
            fmt::format(args),
            Vec::new(),
            SourceLocation::caller(),
        )
    }

    /// Flush the structured sink and the console writer
    pub fn flush(&self) -> Result<()> {
        self.handler.flush()
    }

    #[track_caller]
    fn emit(
        &self,
        level: LogLevel,
        message: String,
        attrs: Vec<Attr>,
        source: SourceLocation,
    ) -> Result<()> {
        if let Some(action) = level.terminal_action() {
            self.emit_terminal(level, action, message, attrs, source);
        }
        if !self.enabled(level) {
            return Ok(());
        }

        let record = Record::new(level, message, source).with_attrs(attrs);
        self.handler.handle(&record)
    }

    /// Terminal levels act even when filtered out or when the write fails
    #[track_caller]
    fn emit_terminal(
        &self,
        level: LogLevel,
        action: TerminalAction,
        message: String,
        attrs: Vec<Attr>,
        source: SourceLocation,
    ) -> ! {
        let record = Record::new(level, message, source).with_attrs(attrs);
        if self.enabled(level) {
            if let Err(e) = self.handler.handle(&record) {
                eprintln!("[LOGGER ERROR] {} record at {} not written: {}", level, source, e);
            }
        }

        match action {
            TerminalAction::Panic => std::panic::panic_any(record.message),
            TerminalAction::Exit(code) => {
                if let Err(e) = self.handler.flush() {
                    eprintln!("[LOGGER ERROR] Flush before exit failed: {}", e);
                }
                std::process::exit(code)
            }
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::stdout()
    }
}

/// Builder for creating a Logger with custom configuration
///
/// Without an explicit sink the logger writes to stdout in console mode.
/// Setting a sink turns console mode off unless [`LoggerBuilder::console_mode`]
/// says otherwise.
#[derive(Debug, Clone)]
pub struct LoggerBuilder {
    sink: Option<SharedWriter>,
    console_writer: Option<SharedWriter>,
    console_mode: Option<bool>,
    min_level: LogLevel,
    colors: bool,
    timestamp_format: TimestampFormat,
    source_root: Option<String>,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self {
            sink: None,
            console_writer: None,
            console_mode: None,
            min_level: LogLevel::Trace,
            colors: true,
            timestamp_format: TimestampFormat::default(),
            source_root: None,
        }
    }

    /// Start from the environment: `LOG_LEVEL` sets the threshold and a
    /// non-empty `NO_COLOR` disables colors
    pub fn from_env() -> Result<Self> {
        let mut builder = Self::new();

        if let Ok(value) = std::env::var(LOG_LEVEL_ENV) {
            builder.min_level = value
                .parse()
                .map_err(|e: String| LoggerError::config(LOG_LEVEL_ENV, e))?;
        }
        if std::env::var_os(NO_COLOR_ENV).is_some_and(|v| !v.is_empty()) {
            builder.colors = false;
        }

        Ok(builder)
    }

    /// Destination for structured records
    #[must_use = "builder methods return a new value"]
    pub fn sink<W: Write + Send + 'static>(self, writer: W) -> Self {
        self.shared_sink(SharedWriter::named("sink", writer))
    }

    #[must_use = "builder methods return a new value"]
    pub fn shared_sink(mut self, writer: SharedWriter) -> Self {
        self.sink = Some(writer);
        self
    }

    /// Destination for console lines (stdout by default)
    #[must_use = "builder methods return a new value"]
    pub fn console_writer<W: Write + Send + 'static>(self, writer: W) -> Self {
        self.shared_console_writer(SharedWriter::named("console", writer))
    }

    #[must_use = "builder methods return a new value"]
    pub fn shared_console_writer(mut self, writer: SharedWriter) -> Self {
        self.console_writer = Some(writer);
        self
    }

    /// Skip the structured write for every record
    #[must_use = "builder methods return a new value"]
    pub fn console_mode(mut self, enabled: bool) -> Self {
        self.console_mode = Some(enabled);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn colors(mut self, enabled: bool) -> Self {
        self.colors = enabled;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Directory stripped from the front of reported source paths.
    ///
    /// Defaults to the working directory at first use.
    #[must_use = "builder methods return a new value"]
    pub fn source_root(mut self, root: impl AsRef<str>) -> Self {
        self.source_root = Some(normalize_root(root.as_ref()));
        self
    }

    /// Build the Logger
    pub fn build(self) -> Logger {
        let console_mode = self.console_mode.unwrap_or(self.sink.is_none());
        let console = self.console_writer.unwrap_or_else(SharedWriter::stdout);
        let sink = match self.sink {
            Some(sink) => sink,
            None => console.clone(),
        };
        let source_root = self
            .source_root
            .unwrap_or_else(|| process_root().to_string());

        Logger::from_handler(Handler::from_parts(
            sink,
            console,
            console_mode,
            self.min_level,
            self.colors,
            self.timestamp_format,
            source_root,
        ))
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
