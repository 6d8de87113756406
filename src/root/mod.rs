//! Rendering roots.
//!
//! A rendering root owns the content rendered into one container element.
//! Every component asks its [`RootProvider`] for exactly one root at
//! construction and keeps it for its whole lifetime.
//!
//! Contract for [`RenderRoot`] implementations:
//! - `render` may be called repeatedly (re-render), also after `unmount`
//! - `unmount` is idempotent
//! - both take effect before returning

mod markup;

pub use markup::{view, MarkupRoots, Node, Scope, View};

use crate::dom::ElementId;

/// Options forwarded to the root provider when a component creates its root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RootOptions {
    /// Prefix for identifiers generated by content rendered into this root.
    pub identifier_prefix: Option<String>,
}

/// Content holder bound to a single container element.
pub trait RenderRoot<N> {
    /// Container element this root renders into.
    fn container(&self) -> ElementId;

    /// Render `node` into the container, replacing previous content.
    fn render(&mut self, node: &N) -> anyhow::Result<()>;

    /// Clear all rendered content.
    fn unmount(&mut self);
}

/// Factory for rendering roots.
pub trait RootProvider<N> {
    fn create_root(&self, container: ElementId, options: &RootOptions) -> Box<dyn RenderRoot<N>>;
}
