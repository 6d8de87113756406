//! Markup roots - text rendering into a [`MemoryDocument`].
//!
//! A [`View`] produces the markup for one component; [`MarkupRoots`] hands out
//! roots that write that markup into the component container's text content.
//! Views are usually closures that read live data (signals, shared state) each
//! time they render:
//!
//! ```ignore
//! let summary = view(move |_scope| Ok(format!("{:.0}%", win_rate.get())));
//! feature.add_component(summary).append_to(Some(card))?;
//! ```

use std::rc::Rc;

use crate::dom::{ElementId, MemoryDocument};

use super::{RenderRoot, RootOptions, RootProvider};

// =============================================================================
// View
// =============================================================================

/// Render context handed to a [`View`].
#[derive(Debug, Clone)]
pub struct Scope {
    prefix: String,
    container: ElementId,
}

impl Scope {
    /// Container the view renders into.
    pub fn container(&self) -> ElementId {
        self.container
    }

    /// Identifier unique to this root, built from the root's identifier prefix.
    pub fn identifier(&self, local: &str) -> String {
        format!("{}{}", self.prefix, local)
    }
}

/// Something that renders to markup.
pub trait View {
    fn render(&self, scope: &Scope) -> anyhow::Result<String>;
}

impl<F> View for F
where
    F: Fn(&Scope) -> anyhow::Result<String>,
{
    fn render(&self, scope: &Scope) -> anyhow::Result<String> {
        self(scope)
    }
}

/// Shared, type-erased view. The node type rendered by [`MarkupRoots`].
pub type Node = Rc<dyn View>;

/// Wrap a closure as a [`Node`].
pub fn view<F>(render: F) -> Node
where
    F: Fn(&Scope) -> anyhow::Result<String> + 'static,
{
    Rc::new(render)
}

// =============================================================================
// Markup Roots
// =============================================================================

/// [`RootProvider`] writing view output into a [`MemoryDocument`].
#[derive(Debug, Clone)]
pub struct MarkupRoots {
    document: Rc<MemoryDocument>,
}

impl MarkupRoots {
    pub fn new(document: Rc<MemoryDocument>) -> Self {
        Self { document }
    }
}

impl RootProvider<Node> for MarkupRoots {
    fn create_root(&self, container: ElementId, options: &RootOptions) -> Box<dyn RenderRoot<Node>> {
        Box::new(MarkupRoot {
            document: self.document.clone(),
            scope: Scope {
                prefix: options.identifier_prefix.clone().unwrap_or_default(),
                container,
            },
        })
    }
}

struct MarkupRoot {
    document: Rc<MemoryDocument>,
    scope: Scope,
}

impl RenderRoot<Node> for MarkupRoot {
    fn container(&self) -> ElementId {
        self.scope.container
    }

    fn render(&mut self, node: &Node) -> anyhow::Result<()> {
        // A failing view keeps the last committed markup.
        let markup = node.render(&self.scope)?;
        self.document.set_text(self.scope.container, Some(markup));
        Ok(())
    }

    fn unmount(&mut self) {
        self.document.set_text(self.scope.container, None);
    }
}
