//! Error types for sqlcls operations.

use std::fmt;

/// The primary error type for all sqlcls operations.
///
/// The interceptor itself only ever produces [`Error::Install`]. The
/// remaining variants describe failures of the wrapped driver; they are
/// delivered to callbacks exactly as the driver produced them, never
/// wrapped or transformed by the binding layer.
#[derive(Debug)]
pub enum Error {
    /// Installation-time structural errors (missing extension points)
    Install(InstallError),
    /// Connection-related errors (connect, disconnect)
    Connection(ConnectionError),
    /// Query execution errors
    Query(QueryError),
    /// Pool checkout errors
    Pool(PoolError),
    /// Custom error with message
    Custom(String),
}

#[derive(Debug)]
pub struct InstallError {
    pub kind: InstallErrorKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallErrorKind {
    /// The driver build registered no command-dispatch entry point
    MissingCommandQueue,
    /// The driver build registered no connection-acquisition entry point
    MissingConnectionSource,
}

#[derive(Debug)]
pub struct ConnectionError {
    pub kind: ConnectionErrorKind,
    pub message: String,
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionErrorKind {
    /// Failed to establish connection
    Connect,
    /// Authentication failed
    Authentication,
    /// Connection lost during operation
    Disconnected,
    /// Connection refused
    Refused,
}

#[derive(Debug)]
pub struct QueryError {
    pub kind: QueryErrorKind,
    pub sql: Option<String>,
    pub message: String,
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryErrorKind {
    /// Syntax error in SQL
    Syntax,
    /// Constraint violation (unique, foreign key, etc.)
    Constraint,
    /// Statement timeout
    Timeout,
    /// Other database error
    Database,
}

#[derive(Debug)]
pub struct PoolError {
    pub kind: PoolErrorKind,
    pub message: String,
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolErrorKind {
    /// Pool exhausted (no available connections)
    Exhausted,
    /// Connection checkout timeout
    Timeout,
    /// Pool is closed
    Closed,
}

impl InstallError {
    /// Create an install error for a missing extension point.
    pub fn missing(kind: InstallErrorKind) -> Self {
        let message = match kind {
            InstallErrorKind::MissingCommandQueue => {
                "driver exposes no command-dispatch entry point".to_string()
            }
            InstallErrorKind::MissingConnectionSource => {
                "driver exposes no connection-acquisition entry point".to_string()
            }
        };
        Self { kind, message }
    }
}

impl Error {
    /// Is this an installation-time structural error?
    pub fn is_install(&self) -> bool {
        matches!(self, Error::Install(_))
    }

    /// Is this a retryable error (pool exhausted, timeouts)?
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Pool(p) => matches!(p.kind, PoolErrorKind::Exhausted | PoolErrorKind::Timeout),
            Error::Query(q) => matches!(q.kind, QueryErrorKind::Timeout),
            _ => false,
        }
    }

    /// Get the SQL that caused this error, if available.
    pub fn sql(&self) -> Option<&str> {
        match self {
            Error::Query(q) => q.sql.as_deref(),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Install(e) => write!(f, "Install error: {}", e.message),
            Error::Connection(e) => write!(f, "Connection error: {}", e.message),
            Error::Query(e) => write!(f, "Query error: {}", e.message),
            Error::Pool(e) => write!(f, "Pool error: {}", e.message),
            Error::Custom(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Connection(e) => e
                .source
                .as_deref()
                .map(|err| err as &(dyn std::error::Error + 'static)),
            Error::Query(e) => e
                .source
                .as_deref()
                .map(|err| err as &(dyn std::error::Error + 'static)),
            Error::Pool(e) => e
                .source
                .as_deref()
                .map(|err| err as &(dyn std::error::Error + 'static)),
            _ => None,
        }
    }
}

impl fmt::Display for InstallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Display for ConnectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Display for PoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl From<InstallError> for Error {
    fn from(err: InstallError) -> Self {
        Error::Install(err)
    }
}

impl From<ConnectionError> for Error {
    fn from(err: ConnectionError) -> Self {
        Error::Connection(err)
    }
}

impl From<QueryError> for Error {
    fn from(err: QueryError) -> Self {
        Error::Query(err)
    }
}

impl From<PoolError> for Error {
    fn from(err: PoolError) -> Self {
        Error::Pool(err)
    }
}

/// Result type alias for sqlcls operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn install_error_messages_name_the_missing_seam() {
        let err = Error::from(InstallError::missing(InstallErrorKind::MissingCommandQueue));
        assert!(err.is_install());
        assert!(err.to_string().contains("command-dispatch"));

        let err = Error::from(InstallError::missing(
            InstallErrorKind::MissingConnectionSource,
        ));
        assert!(err.to_string().contains("connection-acquisition"));
    }

    #[test]
    fn retryable_flags() {
        let exhausted = Error::Pool(PoolError {
            kind: PoolErrorKind::Exhausted,
            message: "pool exhausted".to_string(),
            source: None,
        });
        assert!(exhausted.is_retryable());

        let closed = Error::Pool(PoolError {
            kind: PoolErrorKind::Closed,
            message: "pool closed".to_string(),
            source: None,
        });
        assert!(!closed.is_retryable());

        let syntax = Error::Query(QueryError {
            kind: QueryErrorKind::Syntax,
            sql: Some("SELEC 1".to_string()),
            message: "syntax error".to_string(),
            source: None,
        });
        assert!(!syntax.is_retryable());
        assert_eq!(syntax.sql(), Some("SELEC 1"));
    }

    #[test]
    fn query_error_source_is_exposed() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe");
        let err = Error::Query(QueryError {
            kind: QueryErrorKind::Database,
            sql: None,
            message: "write failed".to_string(),
            source: Some(Box::new(io)),
        });
        assert!(std::error::Error::source(&err).is_some());
    }
}
