//! Memoize: cache results by argument identity
//!
//! The cache key is the canonical JSON of the argument tuple, so argument
//! lists that differ structurally (`0` vs `"0"`, one element vs two) always
//! key differently, while maps that merely differ in insertion order key the
//! same; `serde_json` keeps object keys sorted. An optional dependency
//! snapshot, taken at call time, is appended to the key so memoization
//! invalidates when external state changes even though the explicit
//! arguments have not.
//!
//! The cache has no eviction and no TTL: it grows for the lifetime of the
//! wrapper, one entry per distinct key. Callers memoizing unbounded argument
//! spaces own that growth.

use std::collections::HashMap;
use std::sync::Mutex;

use serde::Serialize;
use serde_json::Value;
use tracing::trace;

use crate::error::Result;
use crate::lock;

/// Joins the argument half of the key to the dependency half. U+001F cannot
/// appear unescaped in JSON text, so the two halves never bleed together.
const KEY_SEPARATOR: char = '\u{1f}';

/// A memoized wrapper around a computation.
pub struct Memo<A, R> {
    compute: Box<dyn Fn(&A) -> R + Send + Sync>,
    deps: Option<Box<dyn Fn() -> Value + Send + Sync>>,
    cache: Mutex<HashMap<String, R>>,
}

impl<A, R> Memo<A, R>
where
    A: Serialize,
    R: Clone,
{
    pub fn new(compute: impl Fn(&A) -> R + Send + Sync + 'static) -> Self {
        Self {
            compute: Box::new(compute),
            deps: None,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Memoize with a dependency snapshot: `deps` runs on every call and its
    /// value becomes part of the cache key.
    pub fn with_deps(
        compute: impl Fn(&A) -> R + Send + Sync + 'static,
        deps: impl Fn() -> Value + Send + Sync + 'static,
    ) -> Self {
        Self {
            compute: Box::new(compute),
            deps: Some(Box::new(deps)),
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Invoke the wrapper. On a hit the stored value is returned and the
    /// computation does not run — its side effects do not occur again. Fails
    /// synchronously if the arguments cannot be serialized into a key.
    pub fn call(&self, args: &A) -> Result<R> {
        let key = self.cache_key(args)?;

        if let Some(cached) = lock(&self.cache).get(&key) {
            trace!("memo hit");
            return Ok(cached.clone());
        }

        // Computed outside the lock; two racing misses both compute and the
        // second insert wins, which is harmless for a pure computation.
        let value = (self.compute)(args);
        lock(&self.cache).insert(key, value.clone());
        Ok(value)
    }

    /// Number of distinct keys cached so far.
    pub fn len(&self) -> usize {
        lock(&self.cache).len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.cache).is_empty()
    }

    fn cache_key(&self, args: &A) -> Result<String> {
        let mut key = serde_json::to_value(args)?.to_string();
        if let Some(deps) = &self.deps {
            key.push(KEY_SEPARATOR);
            key.push_str(&deps().to_string());
        }
        Ok(key)
    }
}
