//! Host document capability.
//!
//! The framework never touches a real browser document directly. Everything it
//! needs from the host page goes through [`HostDocument`]:
//! - element creation (one container per component)
//! - child insertion (first/last) and detachment
//! - subtree containment and connectedness queries
//!
//! Elements are identified by [`ElementId`] handles, like components in an
//! index-based registry. Identity is stable for as long as the document keeps
//! the element around.
//!
//! [`MemoryDocument`] is an arena-backed implementation used by tests and demos.

mod memory;

pub use memory::MemoryDocument;

use std::fmt;

// =============================================================================
// Element Handle
// =============================================================================

/// Handle to an element of a host document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

impl ElementId {
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where a child is inserted among its new siblings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    First,
    Last,
}

// =============================================================================
// Host Document
// =============================================================================

/// Minimal DOM surface the lifecycle framework relies on.
///
/// Implementations are free to be mutated by third parties between calls; the
/// framework re-queries on every operation and never caches answers.
pub trait HostDocument {
    /// The live document root. Elements are rendered iff reachable from it.
    fn root(&self) -> ElementId;

    /// Create a new detached element.
    fn create_element(&self, tag: &str) -> ElementId;

    fn set_attribute(&self, element: ElementId, name: &str, value: &str);

    /// Insert `child` under `parent`. A child that already has a parent is
    /// moved, never duplicated.
    fn insert_child(&self, parent: ElementId, child: ElementId, position: Position);

    /// Detach `element` from its parent. No-op when already detached.
    fn detach(&self, element: ElementId);

    /// Inclusive subtree containment: an element contains itself.
    fn contains(&self, ancestor: ElementId, element: ElementId) -> bool;

    /// Whether `element` is currently part of the live document.
    fn is_connected(&self, element: ElementId) -> bool {
        self.contains(self.root(), element)
    }
}
