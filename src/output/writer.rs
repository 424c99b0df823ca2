//! Shared byte-stream sink

use parking_lot::Mutex;
use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

/// A cloneable handle to one underlying writer.
///
/// Every clone writes to the same destination. Each call to
/// [`SharedWriter::write_line`] holds the lock for a single `write_all`, so
/// concurrent records never interleave partial lines.
#[derive(Clone)]
pub struct SharedWriter {
    name: &'static str,
    inner: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl SharedWriter {
    pub fn new<W: Write + Send + 'static>(writer: W) -> Self {
        Self::named("writer", writer)
    }

    pub fn named<W: Write + Send + 'static>(name: &'static str, writer: W) -> Self {
        Self {
            name,
            inner: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    pub fn stdout() -> Self {
        Self::named("stdout", io::stdout())
    }

    pub fn stderr() -> Self {
        Self::named("stderr", io::stderr())
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Write `line` followed by a newline as one `write_all`
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut buf = String::with_capacity(line.len() + 1);
        buf.push_str(line);
        buf.push('\n');
        self.inner.lock().write_all(buf.as_bytes())
    }

    pub fn flush(&self) -> io::Result<()> {
        self.inner.lock().flush()
    }

    /// Whether both handles write to the same destination
    pub fn same_as(&self, other: &SharedWriter) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for SharedWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedWriter").field("name", &self.name).finish()
    }
}

/// In-memory writer whose contents stay readable after it is handed to a
/// logger. Useful for capturing output in tests and tools.
#[derive(Debug, Clone, Default)]
pub struct MemoryWriter {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl MemoryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buf.lock()).into_owned()
    }

    /// Written lines, without terminators
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.lock().is_empty()
    }
}

impl Write for MemoryWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.lock().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
