//! Process-wide default logger and the free functions that forward to it
//!
//! The default starts as a console-mode logger on stdout and is created on
//! first use. [`set_default`] swaps it atomically: callers that already loaded
//! the previous logger finish with it, later calls see the new one, and no
//! reader ever observes a partially replaced value.
//!
//! Code that wants to stay testable can take a [`Logger`] as a parameter
//! instead of reaching for these functions.

use crate::core::{Attr, LogLevel, Logger, Result};
use arc_swap::ArcSwap;
use once_cell::sync::Lazy;
use std::fmt;
use std::sync::Arc;

static DEFAULT_LOGGER: Lazy<ArcSwap<Logger>> =
    Lazy::new(|| ArcSwap::from_pointee(Logger::stdout()));

/// The current default logger
pub fn default_logger() -> Arc<Logger> {
    DEFAULT_LOGGER.load_full()
}

/// Replace the default logger for every later call
pub fn set_default(logger: Logger) {
    DEFAULT_LOGGER.store(Arc::new(logger));
}

macro_rules! forward {
    ($($plain:ident, $formatted:ident;)*) => {
        $(
            #[track_caller]
            pub fn $plain(
                message: impl fmt::Display,
                attrs: impl IntoIterator<Item = Attr>,
            ) -> Result<()> {
                DEFAULT_LOGGER.load().$plain(message, attrs)
            }

            #[track_caller]
            pub fn $formatted(args: fmt::Arguments<'_>) -> Result<()> {
                DEFAULT_LOGGER.load().$formatted(args)
            }
        )*
    };
}

forward! {
    trace, tracef;
    debug, debugf;
    info, infof;
    warn, warnf;
    error, errorf;
}

#[track_caller]
pub fn log(
    level: LogLevel,
    message: impl fmt::Display,
    attrs: impl IntoIterator<Item = Attr>,
) -> Result<()> {
    DEFAULT_LOGGER.load().log(level, message, attrs)
}

#[track_caller]
pub fn panic(message: impl fmt::Display, attrs: impl IntoIterator<Item = Attr>) -> ! {
    default_logger().panic(message, attrs)
}

#[track_caller]
pub fn panicf(args: fmt::Arguments<'_>) -> ! {
    default_logger().panicf(args)
}

#[track_caller]
pub fn fatal(message: impl fmt::Display, attrs: impl IntoIterator<Item = Attr>) -> ! {
    default_logger().fatal(message, attrs)
}

#[track_caller]
pub fn fatalf(args: fmt::Arguments<'_>) -> ! {
    default_logger().fatalf(args)
}
