//! Component - an isolated render unit.
//!
//! A component pairs one container element with one rendering root. The
//! container is created once and reused across every attach/detach cycle; the
//! root is created once and reused across every mount/unmount cycle.
//!
//! # Lifecycle
//!
//! Placement and rendering are separate axes:
//! - [`Component::append_to`] / [`Component::prepend_to`] / [`Component::remove`]
//!   move the container around the host document
//! - [`Component::mount`] / [`Component::unmount`] drive the rendering root
//!
//! The host page may discard anchors at any time, so a driver can re-anchor a
//! component without losing its rendered content, and re-render it without
//! touching placement.
//!
//! ```ignore
//! let sidebar = feature.add_component(node).prepend_to(Some(card))?;
//! sidebar.mount()?;
//! assert!(sidebar.is_rendered());
//! sidebar.remove();
//! ```

use std::cell::{Cell, Ref, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::dom::{ElementId, HostDocument, Position};
use crate::error::{Error, PlacementViolation, Result};
use crate::root::{RenderRoot, RootOptions};
use crate::settings;

use super::feature::{Feature, FeatureInner};
use super::state::{ComponentState, Placement};

// =============================================================================
// Id Generation
// =============================================================================

/// Process-wide id counter. Ids are never reused.
static NEXT_ID: AtomicU64 = AtomicU64::new(0);

fn generate_id() -> String {
    let suffix = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    format!("{}-{}", settings::id_prefix(), base36(suffix))
}

fn base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    let mut digits = Vec::new();
    loop {
        digits.push(DIGITS[(value % 36) as usize]);
        value /= 36;
        if value == 0 {
            break;
        }
    }
    digits.iter().rev().map(|&digit| digit as char).collect()
}

// =============================================================================
// Options
// =============================================================================

/// Construction options for [`Feature::add_component_with`].
#[derive(Debug, Clone, Default)]
pub struct ComponentOptions {
    /// Human-readable name. Defaults to the owning feature's name.
    pub name: Option<String>,
    /// Forwarded to the rendering root provider.
    pub root: RootOptions,
}

impl ComponentOptions {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }
}

// =============================================================================
// Component
// =============================================================================

/// Handle to an isolated render unit.
///
/// Cloning the handle does not clone the component. The owning [`Feature`]
/// keeps every component it created alive.
pub struct Component<N> {
    inner: Rc<ComponentInner<N>>,
}

struct ComponentInner<N> {
    feature: Weak<FeatureInner<N>>,
    document: Rc<dyn HostDocument>,
    id: String,
    name: String,
    container: ElementId,
    root: RefCell<Box<dyn RenderRoot<N>>>,
    node: N,
    placement: Cell<Placement>,
    state: Cell<ComponentState>,
}

impl<N: 'static> Component<N> {
    /// Create a component owned by `feature` and register it there.
    pub(crate) fn new(feature: &Feature<N>, node: N, options: ComponentOptions) -> Self {
        let page = feature.page();
        let document = page.document().clone();

        let id = generate_id();
        let name = options.name.unwrap_or_else(|| feature.name().to_string());

        let container = document.create_element("div");
        document.set_attribute(container, "id", &id);
        document.set_attribute(container, "name", &name);

        let root = page.roots().create_root(container, &options.root);

        let component = Self {
            inner: Rc::new(ComponentInner {
                feature: feature.downgrade(),
                document,
                id,
                name,
                container,
                root: RefCell::new(root),
                node,
                placement: Cell::new(Placement::Unplaced),
                state: Cell::new(ComponentState::INITIALIZED),
            }),
        };

        feature.extend_components(component.clone());
        tracing::trace!(feature = %feature.name(), component = %component.id(), "component created");
        component
    }

    /// Owning feature, if it is still alive.
    pub fn feature(&self) -> Option<Feature<N>> {
        self.inner.feature.upgrade().map(Feature::from_inner)
    }

    /// Append the container as the last child of `target`.
    ///
    /// `None` targets the feature container. See [`Component::prepend_to`]
    /// for the placement rules.
    pub fn append_to(&self, target: Option<ElementId>) -> Result<Self> {
        self.place(target, Position::Last)
    }

    /// Prepend the container as the first child of `target`.
    ///
    /// - Feature container unresolved (unset, detached, or feature dropped):
    ///   nothing happens and the component is returned unchanged.
    /// - Target outside the feature container, or inside this component's own
    ///   container: [`Error::InvalidPlacement`], nothing changes.
    /// - Otherwise the container is detached from its previous parent and
    ///   inserted under `target`, which becomes the host. Mount state is not
    ///   touched.
    pub fn prepend_to(&self, target: Option<ElementId>) -> Result<Self> {
        self.place(target, Position::First)
    }

    fn place(&self, target: Option<ElementId>, position: Position) -> Result<Self> {
        let feature_container = self.feature().and_then(|feature| feature.resolved_container());
        let Some(feature_container) = feature_container else {
            tracing::debug!(component = %self.id(), "feature container unresolved, skipping placement");
            return Ok(self.clone());
        };

        let target = target.unwrap_or(feature_container);
        let document = &self.inner.document;

        // Containment is re-checked on every call, the page may have moved things.
        if !document.contains(feature_container, target) {
            return Err(self.invalid_placement(target, PlacementViolation::OutsideFeature));
        }
        if document.contains(self.inner.container, target) {
            return Err(self.invalid_placement(target, PlacementViolation::InsideComponent));
        }

        document.detach(self.inner.container);
        document.insert_child(target, self.inner.container, position);

        self.inner.placement.set(Placement::Placed(target));
        self.set_state(self.state().with_attached(true));
        tracing::trace!(component = %self.id(), host = %target, ?position, "component attached");
        Ok(self.clone())
    }

    fn invalid_placement(&self, target: ElementId, reason: PlacementViolation) -> Error {
        Error::InvalidPlacement {
            id: self.inner.id.clone(),
            name: self.inner.name.clone(),
            target,
            reason,
        }
    }

    /// Unmount the root and detach the container from the document.
    ///
    /// Idempotent. Called while the root is rendering (from inside a view),
    /// the container is still detached but the root keeps its content.
    pub fn remove(&self) {
        let unmounted = self.unmount_root();
        self.inner.document.detach(self.inner.container);
        self.inner.placement.set(Placement::Removed);
        let state = self.state().with_attached(false);
        self.set_state(if unmounted { state.with_mounted(false) } else { state });
        tracing::trace!(component = %self.id(), "component removed");
    }

    /// Render the node into the root. Re-renders when already mounted.
    ///
    /// On failure the mount state is left as it was. A mount requested while
    /// this component's view is still rendering fails with [`Error::Busy`].
    pub fn mount(&self) -> Result<()> {
        let Ok(mut root) = self.inner.root.try_borrow_mut() else {
            tracing::trace!(component = %self.id(), "root busy, skipping re-entrant mount");
            return Err(Error::Busy {
                id: self.inner.id.clone(),
                name: self.inner.name.clone(),
            });
        };
        let rendered = root.render(&self.inner.node);
        drop(root);

        rendered.map_err(|source| Error::Render {
            id: self.inner.id.clone(),
            name: self.inner.name.clone(),
            source,
        })?;

        self.set_state(self.state().with_mounted(true));
        tracing::trace!(component = %self.id(), "component mounted");
        Ok(())
    }

    /// Clear the rendered content. Idempotent, placement is untouched.
    ///
    /// No-op while the root is rendering.
    pub fn unmount(&self) {
        if self.unmount_root() {
            self.set_state(self.state().with_mounted(false));
            tracing::trace!(component = %self.id(), "component unmounted");
        }
    }

    fn unmount_root(&self) -> bool {
        match self.inner.root.try_borrow_mut() {
            Ok(mut root) => {
                root.unmount();
                true
            }
            Err(_) => {
                tracing::trace!(component = %self.id(), "root busy, skipping re-entrant unmount");
                false
            }
        }
    }

    /// Read access to the rendering root, `None` while it is rendering.
    pub fn root(&self) -> Option<Ref<'_, dyn RenderRoot<N>>> {
        let root = self.inner.root.try_borrow().ok()?;
        Some(Ref::map(root, |root| &**root))
    }

    /// Whether the container is reachable from the live document root.
    ///
    /// Independent from [`ComponentState`]: the host page can drop an ancestor
    /// of an attached component without telling anyone.
    pub fn is_rendered(&self) -> bool {
        self.inner.document.is_connected(self.inner.container)
    }
}

impl<N> Component<N> {
    pub fn id(&self) -> &str {
        &self.inner.id
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// The element created to host this component.
    pub fn container(&self) -> ElementId {
        self.inner.container
    }

    /// Element the component was last placed under, `None` when unplaced or
    /// removed. Use [`Component::placement`] to tell those two apart.
    pub fn host(&self) -> Option<ElementId> {
        self.inner.placement.get().host()
    }

    pub fn placement(&self) -> Placement {
        self.inner.placement.get()
    }

    pub fn state(&self) -> ComponentState {
        self.inner.state.get()
    }

    pub fn node(&self) -> &N {
        &self.inner.node
    }

    /// Whether both handles refer to the same component.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    fn set_state(&self, state: ComponentState) {
        self.inner.state.set(state);
    }
}

impl<N> Clone for Component<N> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<N> fmt::Debug for Component<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component")
            .field("id", &self.inner.id)
            .field("name", &self.inner.name)
            .field("container", &self.inner.container)
            .field("placement", &self.inner.placement.get())
            .field("state", &self.inner.state.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::dom::MemoryDocument;
    use crate::engine::Page;
    use crate::root::{view, MarkupRoots, Node};

    fn setup() -> (Rc<MemoryDocument>, Feature<Node>, ElementId) {
        let doc = Rc::new(MemoryDocument::new());
        let page = Page::new(doc.clone(), MarkupRoots::new(doc.clone()));
        let feature = Feature::new("map", page);
        let anchor = doc.append_element(doc.root(), "section");
        feature.set_container(Some(anchor));
        (doc, feature, anchor)
    }

    fn text(content: &'static str) -> Node {
        view(move |_| Ok(content.to_string()))
    }

    #[test]
    fn test_base36() {
        assert_eq!(base36(0), "0");
        assert_eq!(base36(35), "z");
        assert_eq!(base36(36), "10");
        assert_eq!(base36(1295), "zz");
    }

    #[test]
    fn test_new_component_is_initialized() {
        let (doc, feature, _) = setup();
        let component = feature.add_component(text("a"));

        assert_eq!(component.state(), ComponentState::INITIALIZED);
        assert_eq!(component.placement(), Placement::Unplaced);
        assert_eq!(component.name(), "map");
        assert!(!component.is_rendered());
        assert_eq!(doc.attribute(component.container(), "id").as_deref(), Some(component.id()));
        assert_eq!(doc.attribute(component.container(), "name").as_deref(), Some("map"));
        assert_eq!(doc.tag(component.container()).as_deref(), Some("div"));
    }

    #[test]
    fn test_ids_are_unique_and_prefixed() {
        let (_, feature, _) = setup();
        let a = feature.add_component(text("a"));
        let b = feature.add_component(text("b"));

        assert_ne!(a.id(), b.id());
        assert!(a.id().starts_with(&format!("{}-", settings::id_prefix())));
    }

    #[test]
    fn test_append_defaults_to_feature_container() {
        let (doc, feature, anchor) = setup();
        let component = feature.add_component(text("a")).append_to(None).unwrap();

        assert!(component.state().is_attached());
        assert!(!component.state().is_mounted());
        assert_eq!(component.host(), Some(anchor));
        assert_eq!(doc.parent(component.container()), Some(anchor));
        assert!(component.is_rendered());
    }

    #[test]
    fn test_prepend_and_append_order() {
        let (doc, feature, anchor) = setup();
        let existing = doc.append_element(anchor, "div");

        let first = feature.add_component(text("first")).prepend_to(Some(anchor)).unwrap();
        let last = feature.add_component(text("last")).append_to(Some(anchor)).unwrap();

        assert_eq!(
            doc.children(anchor),
            vec![first.container(), existing, last.container()]
        );
    }

    #[test]
    fn test_placement_outside_feature_fails_without_side_effects() {
        let (doc, feature, _) = setup();
        let outside = doc.append_element(doc.root(), "aside");
        let component = feature.add_component(text("a"));

        let err = component.append_to(Some(outside)).unwrap_err();

        assert!(matches!(
            err,
            Error::InvalidPlacement { reason: PlacementViolation::OutsideFeature, .. }
        ));
        assert_eq!(component.state(), ComponentState::INITIALIZED);
        assert_eq!(component.placement(), Placement::Unplaced);
        assert_eq!(doc.parent(component.container()), None);
    }

    #[test]
    fn test_placement_inside_own_container_fails() {
        let (doc, feature, _) = setup();
        let component = feature.add_component(text("a")).append_to(None).unwrap();
        let inner = doc.append_element(component.container(), "span");

        let err = component.append_to(Some(inner)).unwrap_err();

        assert!(matches!(
            err,
            Error::InvalidPlacement { reason: PlacementViolation::InsideComponent, .. }
        ));
        assert!(component.is_rendered());
    }

    #[test]
    fn test_placement_is_exclusive() {
        let (doc, feature, anchor) = setup();
        let a = doc.append_element(anchor, "div");
        let b = doc.append_element(anchor, "div");

        let component = feature.add_component(text("x"));
        component.append_to(Some(a)).unwrap();
        component.append_to(Some(b)).unwrap();

        assert!(doc.children(a).is_empty());
        assert_eq!(doc.children(b), vec![component.container()]);
        assert_eq!(component.host(), Some(b));
    }

    #[test]
    fn test_missing_feature_container_is_noop() {
        let (doc, feature, anchor) = setup();
        let target = doc.append_element(anchor, "div");
        feature.set_container(None);

        let component = feature.add_component(text("a"));
        let returned = component.append_to(Some(target)).unwrap();

        assert!(returned.ptr_eq(&component));
        assert_eq!(component.state(), ComponentState::INITIALIZED);
        assert_eq!(component.placement(), Placement::Unplaced);
    }

    #[test]
    fn test_detached_feature_container_is_noop() {
        let (doc, feature, anchor) = setup();
        doc.detach(anchor);

        let component = feature.add_component(text("a")).append_to(None).unwrap();

        assert_eq!(component.state(), ComponentState::INITIALIZED);
        assert!(!feature.has_container());
    }

    #[test]
    fn test_mount_twice_and_unmount_twice() {
        let (doc, feature, _) = setup();
        let component = feature.add_component(text("kpi"));

        component.mount().unwrap();
        component.mount().unwrap();
        assert!(component.state().is_mounted());
        assert!(!component.state().is_attached());
        assert_eq!(doc.text(component.container()).as_deref(), Some("kpi"));

        component.unmount();
        component.unmount();
        assert!(!component.state().is_mounted());
        assert_eq!(doc.text(component.container()), None);
    }

    #[test]
    fn test_failed_mount_reports_component() {
        let (_, feature, _) = setup();
        let component = feature.add_component(view(|_| anyhow::bail!("no metrics")));

        let err = component.mount().unwrap_err();

        match err {
            Error::Render { id, .. } => assert_eq!(id, component.id()),
            other => panic!("unexpected error: {other}"),
        }
        assert!(!component.state().is_mounted());
    }

    #[test]
    fn test_remove_detaches_and_unmounts() {
        let (doc, feature, _) = setup();
        let component = feature.add_component(text("a")).append_to(None).unwrap();
        component.mount().unwrap();

        component.remove();

        assert!(!component.is_rendered());
        assert!(!component.state().is_attached());
        assert!(!component.state().is_mounted());
        assert_eq!(component.placement(), Placement::Removed);
        assert_eq!(component.host(), None);
        assert_eq!(doc.text(component.container()), None);

        // Idempotent
        component.remove();
        assert_eq!(component.state(), ComponentState::INITIALIZED);
    }

    #[test]
    fn test_is_rendered_tracks_host_page_removals() {
        let (doc, feature, anchor) = setup();
        let card = doc.append_element(anchor, "div");
        let component = feature.add_component(text("a")).append_to(Some(card)).unwrap();
        assert!(component.is_rendered());

        // The page drops the card on its own
        doc.detach(card);

        assert!(!component.is_rendered());
        assert!(component.state().is_attached());
    }

    #[test]
    fn test_reattach_after_remove_reuses_container() {
        let (doc, feature, anchor) = setup();
        let component = feature.add_component(text("a")).append_to(None).unwrap();
        let container = component.container();

        component.remove();
        component.prepend_to(Some(anchor)).unwrap();

        assert_eq!(component.container(), container);
        assert_eq!(doc.children(anchor), vec![container]);
        assert!(component.state().is_attached());
    }

    #[test]
    fn test_dropped_feature_makes_placement_noop() {
        let (_, feature, _) = setup();
        let component = feature.add_component(text("a"));
        drop(feature);

        assert!(component.feature().is_none());
        let component = component.append_to(None).unwrap();
        assert_eq!(component.state(), ComponentState::INITIALIZED);
    }

    #[test]
    fn test_root_is_bound_to_container() {
        let (_, feature, _) = setup();
        let component = feature.add_component(text("a"));

        let root = component.root().unwrap();
        assert_eq!(root.container(), component.container());
    }

    #[test]
    fn test_mount_from_inside_own_view_is_refused() {
        let (doc, feature, _) = setup();
        let slot: Rc<RefCell<Option<Component<Node>>>> = Rc::new(RefCell::new(None));
        let nested = Rc::new(RefCell::new(None));

        let slot_clone = slot.clone();
        let nested_clone = nested.clone();
        let component = feature.add_component(view(move |_| {
            if let Some(component) = slot_clone.borrow().as_ref() {
                assert!(component.root().is_none());
                component.unmount();
                *nested_clone.borrow_mut() = Some(component.mount());
            }
            Ok("outer".to_string())
        }));
        *slot.borrow_mut() = Some(component.clone());

        component.mount().unwrap();

        let nested = nested.borrow_mut().take().unwrap();
        assert!(matches!(nested, Err(Error::Busy { ref id, .. }) if id == component.id()));
        assert!(component.state().is_mounted());
        assert_eq!(doc.text(component.container()).as_deref(), Some("outer"));
        assert!(component.root().is_some());

        slot.borrow_mut().take();
    }
}
