//! Component lifecycle state.
//!
//! Two independent axes:
//! - attached: the container is a child of some host element
//! - mounted: the rendering root holds rendered content
//!
//! Every combination is valid. A component can be mounted into a container
//! that is currently detached, and attached without having rendered yet.

use std::fmt;

use crate::dom::ElementId;

/// Attach/mount state of a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ComponentState {
    attached: bool,
    mounted: bool,
}

impl ComponentState {
    /// Constructed, neither placed nor rendered.
    pub const INITIALIZED: Self = Self { attached: false, mounted: false };

    pub const fn new(attached: bool, mounted: bool) -> Self {
        Self { attached, mounted }
    }

    pub const fn is_attached(self) -> bool {
        self.attached
    }

    pub const fn is_mounted(self) -> bool {
        self.mounted
    }

    pub const fn is_initialized(self) -> bool {
        !self.attached && !self.mounted
    }

    pub(crate) const fn with_attached(self, attached: bool) -> Self {
        Self { attached, ..self }
    }

    pub(crate) const fn with_mounted(self, mounted: bool) -> Self {
        Self { mounted, ..self }
    }
}

impl fmt::Display for ComponentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match (self.attached, self.mounted) {
            (false, false) => "initialized",
            (true, false) => "attached",
            (false, true) => "mounted",
            (true, true) => "attached+mounted",
        })
    }
}

/// Where a component was last placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Placement {
    /// Never placed.
    #[default]
    Unplaced,
    /// Placed under this host element.
    Placed(ElementId),
    /// Explicitly removed from the document.
    Removed,
}

impl Placement {
    /// Host element, if currently placed.
    pub fn host(self) -> Option<ElementId> {
        match self {
            Placement::Placed(host) => Some(host),
            Placement::Unplaced | Placement::Removed => None,
        }
    }
}
