//! Log level definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum LogLevel {
    #[default]
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    Panic = 5,
    Fatal = 6,
}

/// What happens to the caller once a record at a given level has been emitted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalAction {
    /// Unwind the calling thread with the message as panic payload
    Panic,
    /// Terminate the process with the given status code
    Exit(i32),
}

impl LogLevel {
    /// All levels, least severe first
    pub const ALL: [LogLevel; 7] = [
        LogLevel::Trace,
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
        LogLevel::Panic,
        LogLevel::Fatal,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Panic => "PANIC",
            LogLevel::Fatal => "FATAL",
        }
    }

    /// Numeric severity, higher is more severe
    pub fn severity(&self) -> u8 {
        *self as u8
    }

    /// Whether a record at this level passes a handler thresholded at `threshold`
    pub fn is_enabled_at(&self, threshold: LogLevel) -> bool {
        self.severity() >= threshold.severity()
    }

    pub fn terminal_action(&self) -> Option<TerminalAction> {
        match self {
            LogLevel::Panic => Some(TerminalAction::Panic),
            LogLevel::Fatal => Some(TerminalAction::Exit(1)),
            _ => None,
        }
    }

    /// Render the level label, padded to a fixed width, for the console line.
    ///
    /// Falls back to the plain label when `use_colors` is false or the
    /// `console` feature is disabled.
    pub fn colorize(&self, use_colors: bool) -> String {
        let label = format!("{:5}", self.to_str());
        if !use_colors {
            return label;
        }
        self.paint(label)
    }

    #[cfg(feature = "console")]
    fn paint(&self, label: String) -> String {
        use colored::Colorize;
        match self {
            LogLevel::Trace => label.dimmed().to_string(),
            LogLevel::Debug => label.bright_black().to_string(),
            LogLevel::Info => label,
            LogLevel::Warn => label.yellow().to_string(),
            LogLevel::Error => label.red().to_string(),
            LogLevel::Panic | LogLevel::Fatal => label.red().bold().to_string(),
        }
    }

    #[cfg(not(feature = "console"))]
    fn paint(&self, label: String) -> String {
        label
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "TRACE" => Ok(LogLevel::Trace),
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" | "WARNING" => Ok(LogLevel::Warn),
            "ERROR" => Ok(LogLevel::Error),
            "PANIC" => Ok(LogLevel::Panic),
            "FATAL" => Ok(LogLevel::Fatal),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_filtering() {
        assert!(LogLevel::Warn.is_enabled_at(LogLevel::Warn));
        assert!(LogLevel::Error.is_enabled_at(LogLevel::Warn));
        assert!(!LogLevel::Info.is_enabled_at(LogLevel::Warn));
        assert!(LogLevel::Trace.is_enabled_at(LogLevel::Trace));
        assert!(!LogLevel::Panic.is_enabled_at(LogLevel::Fatal));
    }

    #[test]
    fn test_terminal_actions() {
        assert_eq!(LogLevel::Panic.terminal_action(), Some(TerminalAction::Panic));
        assert_eq!(LogLevel::Fatal.terminal_action(), Some(TerminalAction::Exit(1)));
        for level in &LogLevel::ALL[..5] {
            assert_eq!(level.terminal_action(), None);
        }
    }

    #[test]
    fn test_plain_colorize_is_padded_label() {
        assert_eq!(LogLevel::Info.colorize(false), "INFO ");
        assert_eq!(LogLevel::Error.colorize(false), "ERROR");
    }

    #[test]
    fn test_parse() {
        assert_eq!("warning".parse::<LogLevel>(), Ok(LogLevel::Warn));
        assert_eq!(" Panic ".parse::<LogLevel>(), Ok(LogLevel::Panic));
        assert!("verbose".parse::<LogLevel>().is_err());
    }
}
