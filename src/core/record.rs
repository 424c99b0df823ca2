//! Log record structure

use super::attribute::Attr;
use super::log_level::LogLevel;
use super::source::SourceLocation;
use chrono::{DateTime, Local};

/// One logged event, built per call and consumed by the handler
#[derive(Debug, Clone)]
pub struct Record {
    pub timestamp: DateTime<Local>,
    pub level: LogLevel,
    pub message: String,
    pub source: SourceLocation,
    /// Attributes passed at the call, distinct from the handler's bound ones
    pub attrs: Vec<Attr>,
}

impl Record {
    /// Create a record stamped with the current time
    pub fn new(level: LogLevel, message: impl Into<String>, source: SourceLocation) -> Self {
        Self::at(Local::now(), level, message, source)
    }

    /// Create a record with an explicit timestamp
    pub fn at(
        timestamp: DateTime<Local>,
        level: LogLevel,
        message: impl Into<String>,
        source: SourceLocation,
    ) -> Self {
        Self {
            timestamp,
            level,
            message: message.into(),
            source,
            attrs: Vec::new(),
        }
    }

    pub fn with_attrs(mut self, attrs: impl IntoIterator<Item = Attr>) -> Self {
        self.attrs.extend(attrs);
        self
    }

    /// The message with line breaks and tabs escaped, so a console line can
    /// never be split into what looks like several records
    pub fn single_line_message(&self) -> String {
        self.message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }
}
