//! Continuation-local context propagation for callback-based SQL drivers.
//!
//! A driver that queues protocol commands and pools connections completes
//! I/O under whatever execution context happens to be active when the
//! operation finishes, which for queued or pooled work is frequently *not*
//! the context that issued the request. Request-scoped values (trace ids,
//! tenant, auth principal) set before a query then vanish inside its
//! completion callback.
//!
//! This crate closes that gap without touching the driver: the driver's two
//! async re-entry points, the command queue and the connection checkout
//! path, are modeled as explicit seams ([`CommandQueue`],
//! [`ConnectionSource`]), and [`install`] wraps them in decorators that
//! capture the active context at submission time via [`Namespace::bind`].
//! Nothing else changes: argument shapes, return values, error objects, and
//! invocation order cross the decorators bit for bit.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use sqlcls::{install, Command, Extensions, LocalNamespace, Namespace};
//!
//! let ns = LocalNamespace::new();
//! let client = install(
//!     ns.clone(),
//!     Extensions::new()
//!         .command_queue(Arc::new(driver_queue))
//!         .connection_source(Arc::new(driver_pool)),
//! )?;
//!
//! ns.run(|| {
//!     ns.set("trace", serde_json::json!("r-42"));
//!     client.enqueue(Command::query("SELECT 1").callback({
//!         let ns = ns.clone();
//!         move |_rows| {
//!             // Runs on a later turn, still sees "r-42".
//!             assert!(ns.get("trace").is_some());
//!         }
//!     }));
//! });
//! ```
//!
//! Install exactly once, at startup, before any traffic. Layered installs
//! compose but are wasteful; see [`shim`] for the details.

pub mod bind;
pub mod shim;

pub use bind::{BoundQueue, BoundSource};
pub use shim::{Extensions, Shimmed, install};

pub use sqlcls_core::{
    Callback, Command, CommandId, CommandKind, CommandQueue, ConnectionError, ConnectionErrorKind,
    ConnectionSource, Error, InstallError, InstallErrorKind, LocalNamespace, Namespace, PoolError,
    PoolErrorKind, QueryError, QueryErrorKind, Result,
};

/// Convenience re-exports for consumers.
pub mod prelude {
    pub use crate::{
        Command, CommandKind, CommandQueue, ConnectionSource, Extensions, Namespace, Shimmed,
        install,
    };
}
