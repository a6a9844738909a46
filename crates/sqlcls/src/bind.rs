//! Context-binding decorators over the driver seams.
//!
//! Both decorators are stateless pass-throughs: the only thing they change
//! is the ambient context a callback eventually runs under. Argument
//! shapes, return values, invocation order, count, and timing are the inner
//! seam's, bit for bit. Context is captured at submission time, because the
//! driver completes I/O under whatever context happens to be active when
//! the socket turns readable, which for queued or pooled work is rarely the
//! submitter's.

use std::sync::Arc;

use sqlcls_core::{Callback, Command, CommandId, CommandQueue, ConnectionSource, Namespace};

/// A [`CommandQueue`] whose command callbacks run under the context active
/// at enqueue time.
pub struct BoundQueue<N, Q> {
    namespace: Arc<N>,
    inner: Arc<Q>,
}

impl<N, Q> BoundQueue<N, Q> {
    pub(crate) fn new(namespace: Arc<N>, inner: Arc<Q>) -> Self {
        Self { namespace, inner }
    }

    /// The undecorated queue.
    pub fn into_inner(self) -> Arc<Q> {
        self.inner
    }
}

impl<N, Q> Clone for BoundQueue<N, Q> {
    fn clone(&self) -> Self {
        Self {
            namespace: Arc::clone(&self.namespace),
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<N: Namespace, Q: CommandQueue> CommandQueue for BoundQueue<N, Q> {
    type Reply = Q::Reply;

    fn enqueue(&self, mut command: Command<Q::Reply>) -> CommandId {
        // Fire-and-forget commands carry no callback; nothing to rebind.
        if let Some(callback) = command.callback.take() {
            tracing::trace!(kind = command.kind.as_str(), "binding command callback");
            command.callback = Some(self.namespace.bind(callback));
        }
        self.inner.enqueue(command)
    }
}

/// A [`ConnectionSource`] whose acquisition callbacks run under the context
/// active at acquisition time.
pub struct BoundSource<N, S> {
    namespace: Arc<N>,
    inner: Arc<S>,
}

impl<N, S> BoundSource<N, S> {
    pub(crate) fn new(namespace: Arc<N>, inner: Arc<S>) -> Self {
        Self { namespace, inner }
    }

    /// The undecorated source.
    pub fn into_inner(self) -> Arc<S> {
        self.inner
    }
}

impl<N, S> Clone for BoundSource<N, S> {
    fn clone(&self) -> Self {
        Self {
            namespace: Arc::clone(&self.namespace),
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<N: Namespace, S: ConnectionSource> ConnectionSource for BoundSource<N, S> {
    type Conn = S::Conn;

    fn acquire(&self, callback: Callback<Self::Conn>) {
        tracing::trace!("binding acquisition callback");
        self.inner.acquire(self.namespace.bind(callback));
    }
}
