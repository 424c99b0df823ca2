//! Output encoders and the shared sink handle

pub mod console;
pub mod json;
pub mod writer;

pub use console::ConsoleFormatter;
pub use json::JsonEncoder;
pub use writer::{MemoryWriter, SharedWriter};
