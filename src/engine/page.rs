//! Page - the host environment a feature works in.
//!
//! Bundles the host document with the rendering root provider so every
//! component of a feature creates its container and root the same way.

use std::fmt;
use std::rc::Rc;

use crate::dom::HostDocument;
use crate::root::RootProvider;

pub struct Page<N> {
    document: Rc<dyn HostDocument>,
    roots: Rc<dyn RootProvider<N>>,
}

impl<N> Page<N> {
    pub fn new<D, R>(document: Rc<D>, roots: R) -> Self
    where
        D: HostDocument + 'static,
        R: RootProvider<N> + 'static,
    {
        Self {
            document,
            roots: Rc::new(roots),
        }
    }

    pub fn document(&self) -> &Rc<dyn HostDocument> {
        &self.document
    }

    pub fn roots(&self) -> &Rc<dyn RootProvider<N>> {
        &self.roots
    }
}

impl<N> Clone for Page<N> {
    fn clone(&self) -> Self {
        Self {
            document: self.document.clone(),
            roots: self.roots.clone(),
        }
    }
}

impl<N> fmt::Debug for Page<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Page")
            .field("root", &self.document.root())
            .finish_non_exhaustive()
    }
}
