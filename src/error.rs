//! Error types for the cumulo webhook

use thiserror::Error;

/// Main error type for webhook operations
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The patch document could not be serialized
    #[error("patch encoding error: {0}")]
    Encoding(String),

    /// Serving certificate or key could not be loaded
    #[error("TLS configuration error: {0}")]
    Tls(String),

    /// Listener or server I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Tracing subscriber could not be installed
    #[error("telemetry error: {0}")]
    Telemetry(String),
}

impl Error {
    /// Create an encoding error with the given message
    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::Encoding(msg.into())
    }

    /// Create a TLS configuration error with the given message
    pub fn tls(msg: impl Into<String>) -> Self {
        Self::Tls(msg.into())
    }

    /// Create a telemetry error with the given message
    pub fn telemetry(msg: impl Into<String>) -> Self {
        Self::Telemetry(msg.into())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Encoding(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==========================================================================
    // Story Tests: Error Propagation in Admission Handling
    // ==========================================================================

    /// Story: a patch that cannot be encoded becomes an admission denial
    ///
    /// The handler turns encoding errors into a denied AdmissionResponse, so
    /// the message must say what went wrong.
    #[test]
    fn story_encoding_failure_is_reported_to_the_caller() {
        let err = Error::encoding("key must be a string");
        assert!(err.to_string().contains("patch encoding error"));
        assert!(err.to_string().contains("key must be a string"));

        match Error::encoding("any message") {
            Error::Encoding(msg) => assert_eq!(msg, "any message"),
            _ => panic!("Expected Encoding variant"),
        }
    }

    /// Story: serde_json failures are encoding failures
    #[test]
    fn story_serde_json_errors_map_to_encoding() {
        let json_err = serde_json::from_str::<Vec<String>>("[1,").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Encoding(_)));
    }

    /// Story: a missing certificate stops the server before it listens
    #[test]
    fn story_tls_errors_during_startup() {
        let err = Error::tls("failed to read /etc/certs/tls.crt: No such file or directory");
        assert!(err.to_string().contains("TLS configuration error"));
        assert!(err.to_string().contains("/etc/certs/tls.crt"));
    }

    /// Story: bind failures keep the underlying io::Error
    #[test]
    fn story_io_errors_are_wrapped() {
        let io = std::io::Error::new(std::io::ErrorKind::AddrInUse, "address in use");
        let err: Error = io.into();
        assert!(err.to_string().contains("I/O error"));
        assert!(err.to_string().contains("address in use"));
    }

    #[test]
    fn test_telemetry_error_display() {
        let err = Error::telemetry("a global default trace dispatcher has already been set");
        assert!(err.to_string().starts_with("telemetry error"));
    }
}
