//! Logging macros.
//!
//! Each level macro has two forms:
//!
//! - `info!(logger, "message"; "key" => value, ...)` logs a message with
//!   attributes,
//! - `info!(logger, "format {}", args...)` logs a formatted message.
//!
//! The reported source is the line of the macro invocation.
//!
//! # Examples
//!
//! ```
//! use duallog::prelude::*;
//! use duallog::info;
//!
//! let logger = Logger::builder().sink(std::io::sink()).colors(false).build();
//!
//! info!(logger, "connected"; "host" => "db1", "port" => 5432)?;
//!
//! let port = 8080;
//! info!(logger, "listening on port {}", port)?;
//! # Ok::<(), duallog::LoggerError>(())
//! ```

/// Build a `Vec<Attr>` from `key => value` pairs.
///
/// ```
/// use duallog::{attrs, Attr};
///
/// let list = attrs!["host" => "db1", "port" => 5432];
/// assert_eq!(list, vec![Attr::new("host", "db1"), Attr::new("port", 5432)]);
/// ```
#[macro_export]
macro_rules! attrs {
    () => {
        ::std::vec::Vec::<$crate::Attr>::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        ::std::vec![$($crate::Attr::new($key, $value)),+]
    };
}

/// Log at an explicit level.
///
/// ```
/// # use duallog::prelude::*;
/// # let logger = Logger::builder().sink(std::io::sink()).build();
/// use duallog::log;
/// log!(logger, LogLevel::Info, "Simple message").unwrap();
/// log!(logger, LogLevel::Error, "Error code: {}", 500).unwrap();
/// log!(logger, LogLevel::Warn, "retrying"; "attempt" => 3).unwrap();
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $msg:expr; $($key:expr => $value:expr),+ $(,)?) => {
        $logger.log($level, $msg, $crate::attrs![$($key => $value),+])
    };
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.logf($level, ::std::format_args!($($arg)+))
    };
}

/// Log a trace-level message.
#[macro_export]
macro_rules! trace {
    ($logger:expr, $msg:expr; $($key:expr => $value:expr),+ $(,)?) => {
        $logger.trace($msg, $crate::attrs![$($key => $value),+])
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.tracef(::std::format_args!($($arg)+))
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $msg:expr; $($key:expr => $value:expr),+ $(,)?) => {
        $logger.debug($msg, $crate::attrs![$($key => $value),+])
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.debugf(::std::format_args!($($arg)+))
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $msg:expr; $($key:expr => $value:expr),+ $(,)?) => {
        $logger.info($msg, $crate::attrs![$($key => $value),+])
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.infof(::std::format_args!($($arg)+))
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $msg:expr; $($key:expr => $value:expr),+ $(,)?) => {
        $logger.warn($msg, $crate::attrs![$($key => $value),+])
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.warnf(::std::format_args!($($arg)+))
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $msg:expr; $($key:expr => $value:expr),+ $(,)?) => {
        $logger.error($msg, $crate::attrs![$($key => $value),+])
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.errorf(::std::format_args!($($arg)+))
    };
}

/// Log a panic-level message, then panic with it as payload.
#[macro_export]
macro_rules! log_panic {
    ($logger:expr, $msg:expr; $($key:expr => $value:expr),+ $(,)?) => {
        $logger.panic($msg, $crate::attrs![$($key => $value),+])
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.panicf(::std::format_args!($($arg)+))
    };
}

/// Log a fatal-level message, then exit the process with status 1.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $msg:expr; $($key:expr => $value:expr),+ $(,)?) => {
        $logger.fatal($msg, $crate::attrs![$($key => $value),+])
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.fatalf(::std::format_args!($($arg)+))
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{LogLevel, Logger};
    use crate::output::MemoryWriter;

    fn capture() -> (Logger, MemoryWriter) {
        let sink = MemoryWriter::new();
        let logger = Logger::builder()
            .sink(sink.clone())
            .console_writer(std::io::sink())
            .colors(false)
            .build();
        (logger, sink)
    }

    fn parse(line: &str) -> serde_json::Value {
        serde_json::from_str(line).expect("valid json")
    }

    #[test]
    fn test_log_macro() {
        let (logger, sink) = capture();
        log!(logger, LogLevel::Info, "Test message").expect("log");
        log!(logger, LogLevel::Info, "Formatted: {}", 42).expect("log");
        log!(logger, LogLevel::Info, "With attrs"; "k" => 1).expect("log");

        let lines = sink.lines();
        assert_eq!(parse(&lines[1])["msg"], "Formatted: 42");
        assert_eq!(parse(&lines[2])["k"], 1);
    }

    #[test]
    fn test_level_macros() {
        let (logger, sink) = capture();
        trace!(logger, "Trace message").expect("log");
        debug!(logger, "Count: {}", 5).expect("log");
        info!(logger, "connected"; "host" => "db1", "port" => 5432).expect("log");
        warn!(logger, "Retry {} of {}", 1, 3).expect("log");
        error!(logger, "failed"; "code" => 500,).expect("log");

        let levels: Vec<_> = sink
            .lines()
            .iter()
            .map(|l| parse(l)["level"].as_str().unwrap_or_default().to_string())
            .collect();
        assert_eq!(levels, vec!["TRACE", "DEBUG", "INFO", "WARN", "ERROR"]);
    }

    #[test]
    fn test_macro_reports_invocation_line() {
        let (logger, sink) = capture();
        let line = line!() + 1;
        info!(logger, "where am I").expect("log");

        let source = parse(&sink.lines()[0])["source"]
            .as_str()
            .unwrap_or_default()
            .to_string();
        assert!(source.ends_with(&format!("macros.rs:{}", line)), "{}", source);
    }

    #[test]
    fn test_log_panic_macro() {
        let (logger, _) = capture();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            log_panic!(logger, "gave up after {} tries", 3);
        }));
        let payload = result.expect_err("must panic");
        assert_eq!(
            payload.downcast_ref::<String>().map(String::as_str),
            Some("gave up after 3 tries")
        );
    }
}
