//! Search configuration.
//!
//! [`SearchConfig`] controls how the engine fans out work and how far the scope resolver
//! reaches. The presets cover the common cases; individual fields can be adjusted after
//! construction.

/// Configuration for cross-reference searches
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Visit types on a rayon worker pool instead of on the consuming thread
    pub parallel: bool,

    /// Size of a dedicated worker pool; `None` uses the global rayon pool.
    /// Ignored for sequential searches.
    pub worker_threads: Option<usize>,

    /// Number of results buffered between the workers and the consumer (default: 256).
    /// Workers block when the buffer is full, so a slow consumer bounds memory use.
    pub channel_capacity: usize,

    /// Narrow the scope of private and assembly-internal targets to the declaring assembly
    /// and its `InternalsVisibleTo` friends (default: off)
    pub accessibility_scoping: bool,

    /// Maximum number of base types followed in one inheritance walk (default: 64)
    pub max_inheritance_depth: usize,

    /// Full names of additional attribute types treated as pseudo-custom attributes
    pub extra_pseudo_attributes: Vec<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            worker_threads: None,
            channel_capacity: 256,
            accessibility_scoping: false,
            max_inheritance_depth: 64,
            extra_pseudo_attributes: Vec::new(),
        }
    }
}

impl SearchConfig {
    /// Creates a configuration that visits every type on the consuming thread.
    ///
    /// Results arrive in scope order: module order, then type order, then member order.
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Creates a configuration that runs on a dedicated pool of `threads` workers
    #[must_use]
    pub fn parallel(threads: usize) -> Self {
        Self {
            parallel: true,
            worker_threads: Some(threads.max(1)),
            ..Self::default()
        }
    }

    /// Enables accessibility-narrowed scopes
    #[must_use]
    pub fn with_accessibility_scoping(mut self) -> Self {
        self.accessibility_scoping = true;
        self
    }

    /// Registers an additional pseudo-custom-attribute type by full name
    #[must_use]
    pub fn with_pseudo_attribute(mut self, fullname: &str) -> Self {
        self.extra_pseudo_attributes.push(fullname.to_string());
        self
    }
}
