//! Shared ambient configuration scope.
//!
//! Arbitrarily many lifecycles read one scope concurrently; the owning
//! application may install a replacement config at any time and readers
//! pick it up on their next dispatch. Lifecycles never write the scope.

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::config::schema::AmbientConfig;

/// Read-mostly handle to the ambient defaults for a set of lifecycles.
#[derive(Clone)]
pub struct AmbientScope {
    inner: Arc<ArcSwap<AmbientConfig>>,
}

impl AmbientScope {
    /// Create a scope with the given defaults.
    pub fn new(config: AmbientConfig) -> Self {
        Self {
            inner: Arc::new(ArcSwap::from_pointee(config)),
        }
    }

    /// Scope with no defaults at all (every field absent).
    pub fn empty() -> Self {
        Self::new(AmbientConfig::default())
    }

    /// Snapshot of the current ambient defaults.
    pub fn current(&self) -> Arc<AmbientConfig> {
        self.inner.load_full()
    }

    /// Install a replacement config, visible to readers on their next
    /// dispatch. In-flight episodes keep the values they resolved with.
    pub fn install(&self, config: AmbientConfig) {
        self.inner.store(Arc::new(config));
    }
}

impl Default for AmbientScope {
    fn default() -> Self {
        Self::empty()
    }
}
