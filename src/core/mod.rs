//! Core logger types

pub mod attribute;
pub mod error;
pub mod group;
pub mod handler;
pub mod log_level;
pub mod logger;
pub mod record;
pub mod source;
pub mod timestamp;

pub use attribute::{Attr, AttrValue};
pub use error::{LoggerError, Result};
pub use group::AttrTree;
pub use handler::Handler;
pub use log_level::{LogLevel, TerminalAction};
pub use logger::{Logger, LoggerBuilder, LOG_LEVEL_ENV, NO_COLOR_ENV};
pub use record::Record;
pub use source::{process_root, SourceLocation};
pub use timestamp::{TimestampFormat, DEFAULT_TIMESTAMP_PATTERN};
