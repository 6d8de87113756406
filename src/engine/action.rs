//! Actions - render/unmount side-effect pairs.
//!
//! An action is a lifecycle participant without a DOM fragment of its own,
//! e.g. tinting a host element while the feature is rendered. The feature
//! calls `render` on every render sweep and `unmount` on every teardown;
//! whatever state the effect needs lives in the closures.

use std::fmt;
use std::rc::Rc;

use crate::error::{Error, Phase, Result};

/// Callback type for both halves of an action.
pub type ActionCallback = Box<dyn Fn() -> anyhow::Result<()>>;

/// Handle to a registered action.
#[derive(Clone)]
pub struct Action {
    inner: Rc<ActionInner>,
}

struct ActionInner {
    feature: String,
    index: usize,
    render: ActionCallback,
    unmount: ActionCallback,
}

impl Action {
    pub(crate) fn new(feature: &str, index: usize, render: ActionCallback, unmount: ActionCallback) -> Self {
        Self {
            inner: Rc::new(ActionInner {
                feature: feature.to_string(),
                index,
                render,
                unmount,
            }),
        }
    }

    /// Registration index within the owning feature.
    pub fn index(&self) -> usize {
        self.inner.index
    }

    /// Run the render half.
    pub fn render(&self) -> Result<()> {
        (self.inner.render)().map_err(|source| self.error(Phase::Render, source))
    }

    /// Run the unmount half.
    pub fn unmount(&self) -> Result<()> {
        (self.inner.unmount)().map_err(|source| self.error(Phase::Unmount, source))
    }

    fn error(&self, phase: Phase, source: anyhow::Error) -> Error {
        Error::Action {
            feature: self.inner.feature.clone(),
            index: self.inner.index,
            phase,
            source,
        }
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("feature", &self.inner.feature)
            .field("index", &self.inner.index)
            .finish_non_exhaustive()
    }
}
