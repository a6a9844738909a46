//! The connection-acquisition seam.
//!
//! Pools and pool clusters check connections out asynchronously: the caller
//! hands over a callback and the driver invokes it once a connection is
//! available (or checkout fails). [`ConnectionSource`] is that entry point
//! made explicit, so a binding layer can decorate it.

use crate::context::Callback;

/// The driver's connection-acquisition entry point.
///
/// Implemented by pools, pool clusters, or anything else that hands out
/// connections via an error-first callback. The callback is the sole
/// argument and is invoked exactly once.
pub trait ConnectionSource: Send + Sync {
    /// The connection type handed to acquisition callbacks.
    type Conn: Send + 'static;

    /// Request a connection; `callback` fires when one is available or
    /// acquisition fails.
    fn acquire(&self, callback: Callback<Self::Conn>);
}
