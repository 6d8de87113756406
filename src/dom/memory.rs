//! In-memory host document.
//!
//! Elements live in an arena and are addressed by index. Parent links and
//! ordered child lists are kept in sync on every mutation, so containment is a
//! walk up the parent chain. Beyond the [`HostDocument`] surface it stores
//! attributes, inline styles and text content, which is what rendering roots
//! and actions need to leave observable effects.

use std::cell::RefCell;

use super::{ElementId, HostDocument, Position};

#[derive(Debug)]
struct ElementData {
    tag: String,
    attributes: Vec<(String, String)>,
    style: Vec<(String, String)>,
    text: Option<String>,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
}

impl ElementData {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attributes: Vec::new(),
            style: Vec::new(),
            text: None,
            parent: None,
            children: Vec::new(),
        }
    }
}

/// Arena-backed [`HostDocument`].
///
/// Unknown element handles are ignored by mutations and answer `false`/`None`
/// to queries.
#[derive(Debug)]
pub struct MemoryDocument {
    elements: RefCell<Vec<ElementData>>,
}

impl MemoryDocument {
    /// Create a document whose root is a `body` element.
    pub fn new() -> Self {
        Self {
            elements: RefCell::new(vec![ElementData::new("body")]),
        }
    }

    /// Create an element and append it under `parent`.
    pub fn append_element(&self, parent: ElementId, tag: &str) -> ElementId {
        let element = self.create_element(tag);
        self.insert_child(parent, element, Position::Last);
        element
    }

    /// Number of elements ever created, detached ones included.
    pub fn len(&self) -> usize {
        self.elements.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn parent(&self, element: ElementId) -> Option<ElementId> {
        self.elements.borrow().get(element.index()).and_then(|data| data.parent)
    }

    pub fn children(&self, element: ElementId) -> Vec<ElementId> {
        self.elements
            .borrow()
            .get(element.index())
            .map(|data| data.children.clone())
            .unwrap_or_default()
    }

    pub fn tag(&self, element: ElementId) -> Option<String> {
        self.elements.borrow().get(element.index()).map(|data| data.tag.clone())
    }

    pub fn attribute(&self, element: ElementId, name: &str) -> Option<String> {
        let elements = self.elements.borrow();
        let data = elements.get(element.index())?;
        data.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.clone())
    }

    /// First connected element whose `id` attribute equals `id`.
    pub fn find_by_id(&self, id: &str) -> Option<ElementId> {
        let count = self.len();
        (0..count)
            .map(ElementId::new)
            .find(|&element| {
                self.attribute(element, "id").as_deref() == Some(id) && self.is_connected(element)
            })
    }

    pub fn text(&self, element: ElementId) -> Option<String> {
        self.elements
            .borrow()
            .get(element.index())
            .and_then(|data| data.text.clone())
    }

    /// Replace the text content; `None` clears it.
    pub fn set_text(&self, element: ElementId, text: Option<String>) {
        if let Some(data) = self.elements.borrow_mut().get_mut(element.index()) {
            data.text = text;
        }
    }

    pub fn style(&self, element: ElementId, property: &str) -> Option<String> {
        let elements = self.elements.borrow();
        let data = elements.get(element.index())?;
        data.style
            .iter()
            .find(|(key, _)| key == property)
            .map(|(_, value)| value.clone())
    }

    /// Set an inline style property. An empty value removes the property.
    pub fn set_style(&self, element: ElementId, property: &str, value: &str) {
        let mut elements = self.elements.borrow_mut();
        let Some(data) = elements.get_mut(element.index()) else {
            return;
        };
        data.style.retain(|(key, _)| key != property);
        if !value.is_empty() {
            data.style.push((property.to_string(), value.to_string()));
        }
    }

    fn exists(&self, element: ElementId) -> bool {
        element.index() < self.len()
    }
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl HostDocument for MemoryDocument {
    fn root(&self) -> ElementId {
        ElementId::new(0)
    }

    fn create_element(&self, tag: &str) -> ElementId {
        let mut elements = self.elements.borrow_mut();
        elements.push(ElementData::new(tag));
        ElementId::new(elements.len() - 1)
    }

    fn set_attribute(&self, element: ElementId, name: &str, value: &str) {
        let mut elements = self.elements.borrow_mut();
        let Some(data) = elements.get_mut(element.index()) else {
            return;
        };
        match data.attributes.iter_mut().find(|(key, _)| key == name) {
            Some((_, current)) => *current = value.to_string(),
            None => data.attributes.push((name.to_string(), value.to_string())),
        }
    }

    fn insert_child(&self, parent: ElementId, child: ElementId, position: Position) {
        if !self.exists(parent) || !self.exists(child) {
            return;
        }
        // Refuse to create a cycle.
        if self.contains(child, parent) {
            tracing::debug!(%parent, %child, "refusing to insert an element under itself");
            return;
        }

        self.detach(child);

        let mut elements = self.elements.borrow_mut();
        let siblings = &mut elements[parent.index()].children;
        match position {
            Position::First => siblings.insert(0, child),
            Position::Last => siblings.push(child),
        }
        elements[child.index()].parent = Some(parent);
    }

    fn detach(&self, element: ElementId) {
        let mut elements = self.elements.borrow_mut();
        let Some(parent) = elements.get_mut(element.index()).and_then(|data| data.parent.take())
        else {
            return;
        };
        elements[parent.index()].children.retain(|&child| child != element);
    }

    fn contains(&self, ancestor: ElementId, element: ElementId) -> bool {
        let elements = self.elements.borrow();
        if elements.get(element.index()).is_none() {
            return false;
        }

        let mut current = Some(element);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = elements[node.index()].parent;
        }
        false
    }
}
