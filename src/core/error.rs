//! Error types for the logger

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Writing an encoded record to the structured sink failed
    #[error("Failed to write record to structured sink: {source}")]
    SinkWrite {
        #[source]
        source: std::io::Error,
    },

    /// Flushing one of the outputs failed
    #[error("Failed to flush {output}: {source}")]
    Flush {
        output: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },
}

impl LoggerError {
    /// Create a sink write error
    pub fn sink_write(source: std::io::Error) -> Self {
        LoggerError::SinkWrite { source }
    }

    /// Create a flush error for the named output
    pub fn flush(output: &'static str, source: std::io::Error) -> Self {
        LoggerError::Flush { output, source }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err = LoggerError::sink_write(io_err);
        assert!(matches!(err, LoggerError::SinkWrite { .. }));

        let err = LoggerError::config("LOG_LEVEL", "unknown level 'loud'");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err = LoggerError::sink_write(io_err);
        assert_eq!(
            err.to_string(),
            "Failed to write record to structured sink: pipe closed"
        );

        let err = LoggerError::config("LOG_LEVEL", "unknown level 'loud'");
        assert_eq!(
            err.to_string(),
            "Invalid configuration for LOG_LEVEL: unknown level 'loud'"
        );

        let io_err = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let err = LoggerError::flush("sink", io_err);
        assert_eq!(err.to_string(), "Failed to flush sink: disk full");
    }

    #[test]
    fn test_error_source_chain() {
        use std::error::Error;

        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = LoggerError::sink_write(io_err);
        let source = err.source().expect("sink errors carry their io source");
        assert_eq!(source.to_string(), "access denied");
    }
}
