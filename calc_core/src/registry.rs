//! # Operation Registry
//!
//! Lookup table from [`OperationTag`] to the strategy that implements it.
//!
//! The standard registry is assembled once from the fixed table of
//! [`BuiltinOperation`]s. Re-registration is an administrative action: it
//! needs `&mut` access, so a registry that is already shared between callers
//! can only be changed behind external synchronization (for example an
//! `RwLock`). Lookups on a shared registry are always safe.
//!
//! ## Usage
//!
//! ```rust
//! use calc_core::operations::OperationTag;
//! use calc_core::registry::OperationRegistry;
//!
//! let registry = OperationRegistry::standard();
//! assert!(registry.supports(OperationTag::Divide));
//!
//! let empty = OperationRegistry::new();
//! assert!(empty.lookup(OperationTag::Add).is_none());
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use crate::operations::{BuiltinOperation, Operation, OperationTag};

/// Tag-to-strategy table. Each tag maps to at most one operation.
#[derive(Debug, Clone, Default)]
pub struct OperationRegistry {
    entries: HashMap<OperationTag, Arc<dyn Operation>>,
}

impl OperationRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the four built-in operations.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        for operation in BuiltinOperation::ALL {
            registry.register(Arc::new(operation));
        }
        registry
    }

    /// Insert `operation` under its own tag, replacing any existing entry.
    ///
    /// Returns the operation previously registered for that tag, if any.
    pub fn register(&mut self, operation: Arc<dyn Operation>) -> Option<Arc<dyn Operation>> {
        self.entries.insert(operation.tag(), operation)
    }

    /// Remove the entry for `tag`, returning it if it existed.
    pub fn unregister(&mut self, tag: OperationTag) -> Option<Arc<dyn Operation>> {
        self.entries.remove(&tag)
    }

    /// The operation registered for `tag`.
    pub fn lookup(&self, tag: OperationTag) -> Option<Arc<dyn Operation>> {
        self.entries.get(&tag).cloned()
    }

    /// Whether an operation is registered for `tag`
    pub fn supports(&self, tag: OperationTag) -> bool {
        self.entries.contains_key(&tag)
    }

    /// Registered tags, in [`OperationTag::ALL`] order
    pub fn tags(&self) -> Vec<OperationTag> {
        OperationTag::ALL
            .into_iter()
            .filter(|tag| self.supports(*tag))
            .collect()
    }

    /// Number of registered operations
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no operation is registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
