//! Installation: from a driver's extension points to a context-aware client.
//!
//! [`install`] is the single public operation of this crate. It consumes an
//! [`Extensions`] registration (the two entry points a compatible driver
//! build exposes) and a namespace, and returns a [`Shimmed`] client whose
//! callbacks resume under the context active at submission time.
//!
//! Install exactly once, during startup, before traffic flows. Installing
//! over an already-shimmed client is legal and composes (each layer nests
//! the previous binding) but is wasteful; nothing enforces single
//! installation.

use std::sync::Arc;

use sqlcls_core::{
    Callback, Command, CommandId, CommandQueue, ConnectionSource, Error, InstallError,
    InstallErrorKind, Namespace, Result,
};

use crate::bind::{BoundQueue, BoundSource};

/// Registration of a driver build's extension points.
///
/// A driver version that does not expose one of the seams simply registers
/// nothing for it; [`install`] then fails fast instead of shipping a client
/// that silently propagates no context.
pub struct Extensions<Q, S> {
    queue: Option<Arc<Q>>,
    source: Option<Arc<S>>,
}

impl<Q, S> Extensions<Q, S> {
    /// Create an empty registration.
    pub fn new() -> Self {
        Self {
            queue: None,
            source: None,
        }
    }

    /// Register the command-dispatch entry point.
    pub fn command_queue(mut self, queue: Arc<Q>) -> Self {
        self.queue = Some(queue);
        self
    }

    /// Register the connection-acquisition entry point.
    pub fn connection_source(mut self, source: Arc<S>) -> Self {
        self.source = Some(source);
        self
    }
}

impl<Q, S> Default for Extensions<Q, S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Wrap a driver's extension points so callbacks resume under the context
/// active when they were handed over.
///
/// Fails with [`Error::Install`] if either entry point is missing; an
/// incompatible driver build must surface here, not at first use.
pub fn install<N, Q, S>(namespace: N, extensions: Extensions<Q, S>) -> Result<Shimmed<N, Q, S>>
where
    N: Namespace,
    Q: CommandQueue,
    S: ConnectionSource,
{
    let queue = extensions.queue.ok_or_else(|| {
        Error::Install(InstallError::missing(InstallErrorKind::MissingCommandQueue))
    })?;
    let source = extensions.source.ok_or_else(|| {
        Error::Install(InstallError::missing(
            InstallErrorKind::MissingConnectionSource,
        ))
    })?;

    tracing::debug!("installing continuation-local context propagation");
    let namespace = Arc::new(namespace);
    Ok(Shimmed {
        queue: BoundQueue::new(Arc::clone(&namespace), queue),
        source: BoundSource::new(namespace, source),
    })
}

/// A context-aware driver client.
///
/// Implements both seams by delegating to the bound decorators, so it is a
/// drop-in replacement for the driver handle it was installed over.
pub struct Shimmed<N, Q, S> {
    queue: BoundQueue<N, Q>,
    source: BoundSource<N, S>,
}

impl<N, Q, S> Shimmed<N, Q, S> {
    /// The bound command queue.
    pub fn queue(&self) -> &BoundQueue<N, Q> {
        &self.queue
    }

    /// The bound connection source.
    pub fn source(&self) -> &BoundSource<N, S> {
        &self.source
    }

    /// Reverse the installation, returning the undecorated entry points.
    pub fn into_inner(self) -> (Arc<Q>, Arc<S>) {
        (self.queue.into_inner(), self.source.into_inner())
    }
}

impl<N: Namespace, Q: CommandQueue, S: ConnectionSource> CommandQueue for Shimmed<N, Q, S> {
    type Reply = Q::Reply;

    fn enqueue(&self, command: Command<Q::Reply>) -> CommandId {
        self.queue.enqueue(command)
    }
}

impl<N: Namespace, Q: CommandQueue, S: ConnectionSource> ConnectionSource for Shimmed<N, Q, S> {
    type Conn = S::Conn;

    fn acquire(&self, callback: Callback<S::Conn>) {
        self.source.acquire(callback);
    }
}
