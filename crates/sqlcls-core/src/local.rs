//! Reference namespace implementation.
//!
//! [`LocalNamespace`] is a minimal, correct implementation of [`Namespace`]
//! backed by a chain of frames behind a shared active pointer. It exists so
//! the repository's own tests (and embedders without an ambient-context
//! facility) can exercise the binding layer end to end; applications with a
//! real continuation-local facility should adapt that instead.
//!
//! All clones of a handle share one active chain. The intended model is a
//! single-threaded event loop, but locking is poison-tolerant so a driver
//! completing callbacks from another thread remains sound.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::context::{Callback, Namespace};
use crate::error::Result;

/// A shared-state reference implementation of [`Namespace`].
#[derive(Clone, Default)]
pub struct LocalNamespace {
    shared: Arc<Shared>,
}

#[derive(Default)]
struct Shared {
    /// Innermost frame of the currently active context chain.
    active: Mutex<Option<Arc<Frame>>>,
}

struct Frame {
    parent: Option<Arc<Frame>>,
    values: Mutex<HashMap<String, serde_json::Value>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Swaps the active chain in on construction and back out on drop, so the
/// previous chain is restored even if the scope or callback panics.
struct ActiveGuard<'a> {
    shared: &'a Shared,
    previous: Option<Arc<Frame>>,
}

impl<'a> ActiveGuard<'a> {
    fn enter(shared: &'a Shared, chain: Option<Arc<Frame>>) -> Self {
        let previous = std::mem::replace(&mut *lock(&shared.active), chain);
        Self { shared, previous }
    }
}

impl Drop for ActiveGuard<'_> {
    fn drop(&mut self) {
        *lock(&self.shared.active) = self.previous.take();
    }
}

impl LocalNamespace {
    /// Create a namespace with no active context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any context is currently active on this namespace.
    pub fn has_active_context(&self) -> bool {
        lock(&self.shared.active).is_some()
    }
}

impl Namespace for LocalNamespace {
    fn run<T>(&self, scope: impl FnOnce() -> T) -> T {
        let parent = lock(&self.shared.active).clone();
        let frame = Arc::new(Frame {
            parent,
            values: Mutex::new(HashMap::new()),
        });
        let _restore = ActiveGuard::enter(&self.shared, Some(frame));
        scope()
    }

    fn bind<R: Send + 'static>(&self, callback: Callback<R>) -> Callback<R> {
        let shared = Arc::clone(&self.shared);
        let captured = lock(&shared.active).clone();
        Box::new(move |result: Result<R>| {
            let _restore = ActiveGuard::enter(&shared, captured);
            callback(result);
        })
    }

    fn set(&self, key: &str, value: serde_json::Value) {
        match lock(&self.shared.active).clone() {
            Some(frame) => {
                lock(&frame.values).insert(key.to_string(), value);
            }
            None => {
                tracing::warn!(key, "set outside an active context; value dropped");
            }
        }
    }

    fn get(&self, key: &str) -> Option<serde_json::Value> {
        let mut cursor = lock(&self.shared.active).clone();
        while let Some(frame) = cursor {
            if let Some(value) = lock(&frame.values).get(key) {
                return Some(value.clone());
            }
            cursor = frame.parent.clone();
        }
        None
    }
}

impl std::fmt::Debug for LocalNamespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalNamespace")
            .field("active", &self.has_active_context())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn set_and_get_inside_run() {
        let ns = LocalNamespace::new();
        ns.run(|| {
            ns.set("user", json!("alice"));
            assert_eq!(ns.get("user"), Some(json!("alice")));
        });
        assert!(!ns.has_active_context());
        assert_eq!(ns.get("user"), None);
    }

    #[test]
    fn descendant_scopes_inherit_and_shadow() {
        let ns = LocalNamespace::new();
        ns.run(|| {
            ns.set("a", json!(1));
            ns.run(|| {
                assert_eq!(ns.get("a"), Some(json!(1)));
                ns.set("a", json!(2));
                assert_eq!(ns.get("a"), Some(json!(2)));
            });
            // Shadowing in the child never leaks back out.
            assert_eq!(ns.get("a"), Some(json!(1)));
        });
    }

    #[test]
    fn sibling_scopes_are_isolated() {
        let ns = LocalNamespace::new();
        ns.run(|| ns.set("k", json!("first")));
        ns.run(|| {
            assert_eq!(ns.get("k"), None);
            ns.set("k", json!("second"));
            assert_eq!(ns.get("k"), Some(json!("second")));
        });
    }

    #[test]
    fn bind_captures_the_context_at_bind_time() {
        let ns = LocalNamespace::new();
        let observed = Arc::new(Mutex::new(None));

        let bound = ns.run(|| {
            ns.set("req", json!(42));
            let ns2 = ns.clone();
            let observed = Arc::clone(&observed);
            ns.bind::<()>(Box::new(move |_| {
                *lock(&observed) = ns2.get("req");
            }))
        });

        // Invoked inside an unrelated context: the captured one must win.
        ns.run(|| {
            ns.set("req", json!(7));
            bound(Ok(()));
            // And the unrelated context is restored afterwards.
            assert_eq!(ns.get("req"), Some(json!(7)));
        });

        assert_eq!(*lock(&observed), Some(json!(42)));
    }

    #[test]
    fn nested_binds_compose() {
        let ns = LocalNamespace::new();
        let observed = Arc::new(Mutex::new(None));

        let inner = ns.run(|| {
            ns.set("layer", json!("inner"));
            let ns2 = ns.clone();
            let observed = Arc::clone(&observed);
            ns.bind::<()>(Box::new(move |_| {
                *lock(&observed) = ns2.get("layer");
            }))
        });
        let outer = ns.run(|| {
            ns.set("layer", json!("outer"));
            ns.bind(inner)
        });

        outer(Ok(()));
        // The innermost capture governs what the callback observes.
        assert_eq!(*lock(&observed), Some(json!("inner")));
        assert!(!ns.has_active_context());
    }

    #[test]
    fn panicking_callback_still_restores_the_previous_context() {
        let ns = LocalNamespace::new();
        let bound = ns.run(|| ns.bind::<()>(Box::new(|_| panic!("callback failed"))));

        ns.run(|| {
            ns.set("k", json!(1));
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                bound(Ok(()));
            }));
            assert!(result.is_err());
            assert_eq!(ns.get("k"), Some(json!(1)));
        });
        assert!(!ns.has_active_context());
    }

    #[test]
    fn set_outside_any_context_is_a_no_op() {
        let ns = LocalNamespace::new();
        ns.set("orphan", json!(true));
        assert_eq!(ns.get("orphan"), None);
    }

    #[test]
    fn clones_share_the_active_chain() {
        let ns = LocalNamespace::new();
        let other = ns.clone();
        ns.run(|| {
            ns.set("shared", json!(1));
            assert_eq!(other.get("shared"), Some(json!(1)));
        });
    }
}
