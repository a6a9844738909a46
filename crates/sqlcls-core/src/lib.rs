//! Core contracts for sqlcls.
//!
//! This crate defines the pieces the binding layer in `sqlcls` is built
//! against:
//!
//! - [`Namespace`] - the continuation-local context capability
//!   (`run`/`bind`/`set`/`get`)
//! - [`CommandQueue`] and [`ConnectionSource`] - the wrapped driver's two
//!   extension points, as explicit seams
//! - [`Command`] - the unit of work submitted to the command queue, with an
//!   optional error-first completion [`Callback`]
//! - [`Error`] - the error taxonomy, including install-time structural
//!   failures
//! - [`LocalNamespace`] - a reference namespace for tests and embedders
//!   without an ambient-context facility
//!
//! Driver crates implement the seams; applications implement (or adapt)
//! the namespace; `sqlcls` connects the two.

pub mod acquire;
pub mod command;
pub mod context;
pub mod error;
pub mod local;

pub use acquire::ConnectionSource;
pub use command::{Command, CommandId, CommandKind, CommandQueue};
pub use context::{Callback, Namespace};
pub use error::{
    ConnectionError, ConnectionErrorKind, Error, InstallError, InstallErrorKind, PoolError,
    PoolErrorKind, QueryError, QueryErrorKind, Result,
};
pub use local::LocalNamespace;
