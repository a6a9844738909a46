//! The context-namespace capability.
//!
//! A [`Namespace`] associates values with the current logical flow of
//! execution so that they remain retrievable after an asynchronous
//! resumption, without threading them through every signature. The binding
//! layer in `sqlcls` only needs four operations from the facility:
//!
//! - [`Namespace::run`] - execute a scope with a fresh context active
//! - [`Namespace::bind`] - capture the active context into a callback
//! - [`Namespace::set`] / [`Namespace::get`] - context-local storage
//!
//! The production facility is expected to be supplied by the embedding
//! application; [`LocalNamespace`](crate::LocalNamespace) is a reference
//! implementation for tests and embedders without one.

use crate::error::Result;

/// An error-first completion callback, as the wrapped driver delivers them.
///
/// The driver invokes each callback exactly once, with `Err` carrying the
/// driver's own failure untouched by any binding layer.
pub type Callback<R> = Box<dyn FnOnce(Result<R>) + Send>;

/// A continuation-local context namespace.
///
/// Implementations must guarantee:
///
/// - `bind` never changes the argument, invocation order, count, or timing
///   of the wrapped callback; only the ambient context during the call.
/// - Nested bindings compose: each wrapper restores the chain it captured,
///   then puts back whatever it displaced, including when the callback
///   panics.
/// - Values set inside a `run` scope are visible to descendant scopes and
///   to callbacks bound within it, and invisible to sibling scopes.
pub trait Namespace: Send + Sync + 'static {
    /// Execute `scope` synchronously with a newly created context active.
    ///
    /// The new context is a child of the currently active one (if any);
    /// the previous context is restored when `scope` returns.
    fn run<T>(&self, scope: impl FnOnce() -> T) -> T;

    /// Capture the active context and return a callback that restores it
    /// for the duration of the call.
    fn bind<R: Send + 'static>(&self, callback: Callback<R>) -> Callback<R>;

    /// Store a value in the active context.
    fn set(&self, key: &str, value: serde_json::Value);

    /// Look up a value, walking the active context chain outward.
    fn get(&self, key: &str) -> Option<serde_json::Value>;
}
