//! # duallog
//!
//! A structured-logging front end. Every record is rendered twice: as one
//! JSON line for log-processing backends and as one colorized console line
//! for the developer watching the terminal.
//!
//! ## Features
//!
//! - **Seven levels**: `Trace` through `Fatal`; `Panic` unwinds and `Fatal`
//!   exits after the record is written
//! - **Nested groups**: `with_group` / `with_attrs` derive new loggers that
//!   scope their attributes
//! - **Accurate sources**: every record points at the line that logged it
//! - **Console mode**: skip the JSON write when the sink is the terminal
//!
//! ```
//! use duallog::prelude::*;
//!
//! let logger = Logger::builder()
//!     .sink(std::io::sink())
//!     .colors(false)
//!     .build()
//!     .with_group("request")
//!     .with_attrs([Attr::new("id", 42)]);
//!
//! logger.info("handled", [Attr::new("status", 200)])?;
//! # Ok::<(), duallog::LoggerError>(())
//! ```

pub mod core;
pub mod global;
pub mod macros;
pub mod output;

pub mod prelude {
    pub use crate::core::{
        Attr, AttrTree, AttrValue, Handler, LogLevel, Logger, LoggerBuilder, LoggerError,
        Record, Result, SourceLocation, TimestampFormat,
    };
    pub use crate::global::{default_logger, set_default};
    pub use crate::output::{MemoryWriter, SharedWriter};
}

pub use crate::core::{
    Attr, AttrTree, AttrValue, Handler, LogLevel, Logger, LoggerBuilder, LoggerError, Record,
    Result, SourceLocation, TerminalAction, TimestampFormat,
};
pub use global::{
    debug, debugf, default_logger, error, errorf, fatal, fatalf, info, infof, log, panic, panicf,
    set_default, trace, tracef, warn, warnf,
};
pub use output::{ConsoleFormatter, JsonEncoder, MemoryWriter, SharedWriter};
