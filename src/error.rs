//! Error types for the lifecycle framework.
//!
//! - [`Error`] - Everything a single Component/Feature operation can fail with
//! - [`BatchError`] - Aggregate of the failures collected during one
//!   Feature-level sweep (`render`, `unmount`, `remove`)
//!
//! Driver-supplied code (views, action callbacks) reports failures as
//! [`anyhow::Error`]; the framework wraps them with the identity of the
//! offending Component or Action.

use std::fmt;

use thiserror::Error;

use crate::dom::ElementId;

/// Result alias used across the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

// =============================================================================
// Error
// =============================================================================

#[derive(Debug, Error)]
pub enum Error {
    /// `append_to`/`prepend_to` targeted an element the component may not be
    /// placed under. The component is left untouched.
    #[error("cannot place component `{name}` ({id}) under element {target}: {reason}")]
    InvalidPlacement {
        id: String,
        name: String,
        target: ElementId,
        reason: PlacementViolation,
    },

    /// The rendering root rejected the component's node.
    #[error("component `{name}` ({id}) failed to render")]
    Render {
        id: String,
        name: String,
        #[source]
        source: anyhow::Error,
    },

    /// The component's root was asked to render while it was already
    /// rendering, e.g. from inside its own view.
    #[error("component `{name}` ({id}) is already rendering")]
    Busy { id: String, name: String },

    /// An action callback failed.
    #[error("action #{index} of feature `{feature}` failed during {phase}")]
    Action {
        feature: String,
        index: usize,
        phase: Phase,
        #[source]
        source: anyhow::Error,
    },

    #[error(transparent)]
    Batch(#[from] BatchError),
}

/// Why a placement target was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementViolation {
    /// Target lies outside the feature container subtree.
    OutsideFeature,
    /// Target lies inside the component's own container.
    InsideComponent,
}

impl fmt::Display for PlacementViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementViolation::OutsideFeature => {
                f.write_str("target is not part of the feature container")
            }
            PlacementViolation::InsideComponent => {
                f.write_str("target is inside the component's own container")
            }
        }
    }
}

// =============================================================================
// Batch Errors
// =============================================================================

/// Feature-level sweep that produced a [`BatchError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Render,
    Unmount,
    Remove,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Render => "render",
            Phase::Unmount => "unmount",
            Phase::Remove => "remove",
        })
    }
}

/// Identity of the Component or Action that failed inside a sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Component { id: String, name: String },
    Action { index: usize },
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Component { id, name } => write!(f, "component `{name}` ({id})"),
            Target::Action { index } => write!(f, "action #{index}"),
        }
    }
}

/// One failure collected during a sweep.
#[derive(Debug)]
pub struct Failure {
    pub target: Target,
    pub error: Error,
}

/// All failures of one Feature-level sweep.
///
/// Only produced after the sweep visited every Component and Action.
#[derive(Debug, Error)]
#[error("{phase} of feature `{feature}` failed for {}", describe(.failures))]
pub struct BatchError {
    pub feature: String,
    pub phase: Phase,
    pub failures: Vec<Failure>,
}

impl BatchError {
    /// Targets that failed, in sweep order.
    pub fn targets(&self) -> impl Iterator<Item = &Target> {
        self.failures.iter().map(|failure| &failure.target)
    }

    /// Whether the component with `id` is among the failures.
    pub fn names_component(&self, id: &str) -> bool {
        self.targets().any(|target| matches!(target, Target::Component { id: failed, .. } if failed == id))
    }
}

fn describe(failures: &[Failure]) -> String {
    failures
        .iter()
        .map(|failure| failure.target.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
