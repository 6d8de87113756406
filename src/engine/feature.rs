//! Feature - a named aggregate of components and actions.
//!
//! A feature is the unit a page integration works with: it owns every
//! component and action it created, one feature-level container in the host
//! document, and exposes one-call render/teardown for all of them.
//!
//! # Construction
//!
//! ```ignore
//! let feature = Feature::build("map", page, |feature| {
//!     feature.set_container(Some(matchroom));
//!     for card in map_cards {
//!         feature.add_component(sidebar(card)).prepend_to(Some(card))?;
//!         feature.add_action(
//!             move || { tint(card); Ok(()) },
//!             move || { untint(card); Ok(()) },
//!         );
//!     }
//!     Ok(())
//! })?;
//!
//! let subscription = feature.add_listener(&metrics);
//! feature.render()?;
//! ```
//!
//! # Sweeps
//!
//! `render`, `unmount` and `remove` visit components first, then actions, both
//! in registration order, over a snapshot taken when the sweep starts.
//! Anything registered during a sweep is picked up by the next one. A failing
//! component or action never stops the sweep; failures are collected into one
//! [`BatchError`] returned at the end.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use crate::dom::ElementId;
use crate::error::{BatchError, Failure, Phase, Result, Target};
use crate::source::{ChangeSource, Subscription};

use super::action::Action;
use super::component::{Component, ComponentOptions};
use super::page::Page;

/// Handle to a feature. Clones share the same feature.
pub struct Feature<N> {
    inner: Rc<FeatureInner<N>>,
}

pub(crate) struct FeatureInner<N> {
    name: String,
    page: Page<N>,
    container: Cell<Option<ElementId>>,
    components: RefCell<Vec<Component<N>>>,
    actions: RefCell<Vec<Action>>,
}

impl<N: 'static> Feature<N> {
    /// Create an empty feature without a container.
    pub fn new(name: impl Into<String>, page: Page<N>) -> Self {
        Self {
            inner: Rc::new(FeatureInner {
                name: name.into(),
                page,
                container: Cell::new(None),
                components: RefCell::new(Vec::new()),
                actions: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Create a feature and hand it to `builder` right away.
    ///
    /// The builder registers components and actions and assigns the container.
    /// Nothing is rendered here; a builder error aborts construction.
    pub fn build<F>(name: impl Into<String>, page: Page<N>, builder: F) -> Result<Self>
    where
        F: FnOnce(&Feature<N>) -> Result<()>,
    {
        let feature = Self::new(name, page);
        builder(&feature)?;
        tracing::debug!(
            feature = %feature.name(),
            components = feature.inner.components.borrow().len(),
            actions = feature.inner.actions.borrow().len(),
            "feature built"
        );
        Ok(feature)
    }

    pub(crate) fn from_inner(inner: Rc<FeatureInner<N>>) -> Self {
        Self { inner }
    }

    pub(crate) fn downgrade(&self) -> Weak<FeatureInner<N>> {
        Rc::downgrade(&self.inner)
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn page(&self) -> &Page<N> {
        &self.inner.page
    }

    // =========================================================================
    // Container
    // =========================================================================

    /// The assigned feature container, whether or not it is still connected.
    pub fn container(&self) -> Option<ElementId> {
        self.inner.container.get()
    }

    pub fn set_container(&self, container: Option<ElementId>) {
        self.inner.container.set(container);
    }

    /// Whether the container is assigned and part of the live document.
    ///
    /// Placement is a silent no-op while this is false.
    pub fn has_container(&self) -> bool {
        self.resolved_container().is_some()
    }

    pub(crate) fn resolved_container(&self) -> Option<ElementId> {
        let document = self.inner.page.document();
        self.container()
            .filter(|&container| document.is_connected(container))
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Create a component owned by this feature, unattached and unmounted.
    pub fn add_component(&self, node: N) -> Component<N> {
        self.add_component_with(node, ComponentOptions::default())
    }

    pub fn add_component_with(&self, node: N, options: ComponentOptions) -> Component<N> {
        Component::new(self, node, options)
    }

    /// Register a render/unmount side-effect pair.
    pub fn add_action<R, U>(&self, render: R, unmount: U) -> Action
    where
        R: Fn() -> anyhow::Result<()> + 'static,
        U: Fn() -> anyhow::Result<()> + 'static,
    {
        let mut actions = self.inner.actions.borrow_mut();
        let action = Action::new(&self.inner.name, actions.len(), Box::new(render), Box::new(unmount));
        actions.push(action.clone());
        action
    }

    /// Registration hook used by [`Component`] construction.
    pub(crate) fn extend_components(&self, component: Component<N>) {
        self.inner.components.borrow_mut().push(component);
    }

    /// Snapshot of the owned components, in registration order.
    pub fn components(&self) -> Vec<Component<N>> {
        self.inner.components.borrow().clone()
    }

    /// Snapshot of the owned actions, in registration order.
    pub fn actions(&self) -> Vec<Action> {
        self.inner.actions.borrow().clone()
    }

    // =========================================================================
    // Sweeps
    // =========================================================================

    /// Mount every component, then render every action.
    pub fn render(&self) -> Result<(), BatchError> {
        let (components, actions) = self.snapshot();
        tracing::debug!(
            feature = %self.name(),
            components = components.len(),
            actions = actions.len(),
            "rendering feature"
        );

        let mut failures = Vec::new();
        for component in &components {
            if let Err(error) = component.mount() {
                failures.push(Failure {
                    target: component_target(component),
                    error,
                });
            }
        }
        for action in &actions {
            if let Err(error) = action.render() {
                failures.push(Failure {
                    target: Target::Action { index: action.index() },
                    error,
                });
            }
        }

        self.finish(Phase::Render, failures)
    }

    /// Unmount every component root, then unmount every action.
    ///
    /// Components stay attached where they are.
    pub fn unmount(&self) -> Result<(), BatchError> {
        let (components, actions) = self.snapshot();
        tracing::debug!(feature = %self.name(), components = components.len(), "unmounting feature");

        for component in &components {
            component.unmount();
        }
        let failures = unmount_actions(&actions);

        self.finish(Phase::Unmount, failures)
    }

    /// Remove every component from the document, then unmount every action.
    pub fn remove(&self) -> Result<(), BatchError> {
        let (components, actions) = self.snapshot();
        tracing::debug!(feature = %self.name(), components = components.len(), "removing feature");

        for component in &components {
            component.remove();
        }
        let failures = unmount_actions(&actions);

        self.finish(Phase::Remove, failures)
    }

    fn snapshot(&self) -> (Vec<Component<N>>, Vec<Action>) {
        (self.components(), self.actions())
    }

    fn finish(&self, phase: Phase, failures: Vec<Failure>) -> Result<(), BatchError> {
        if failures.is_empty() {
            return Ok(());
        }

        let error = BatchError {
            feature: self.inner.name.clone(),
            phase,
            failures,
        };
        tracing::warn!(feature = %self.name(), %phase, failed = error.failures.len(), "{error}");
        Err(error)
    }

    // =========================================================================
    // Change Notifications
    // =========================================================================

    /// Re-render this feature whenever `source` reports a change.
    ///
    /// The listener holds the feature weakly and goes quiet once the feature is
    /// dropped. Unsubscribing is up to the caller. Render failures have no
    /// caller to go back to and are logged.
    pub fn add_listener<S>(&self, source: &S) -> Subscription
    where
        S: ChangeSource + ?Sized,
    {
        let feature = self.downgrade();
        source.add_listener(Rc::new(move || {
            let Some(inner) = feature.upgrade() else {
                return;
            };
            let feature = Feature::from_inner(inner);
            if let Err(error) = feature.render() {
                tracing::warn!(feature = %feature.name(), %error, "change-triggered render failed");
            }
        }))
    }
}

fn component_target<N>(component: &Component<N>) -> Target {
    Target::Component {
        id: component.id().to_string(),
        name: component.name().to_string(),
    }
}

fn unmount_actions(actions: &[Action]) -> Vec<Failure> {
    actions
        .iter()
        .filter_map(|action| {
            action.unmount().err().map(|error| Failure {
                target: Target::Action { index: action.index() },
                error,
            })
        })
        .collect()
}

impl<N> Clone for Feature<N> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<N> fmt::Debug for Feature<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Feature")
            .field("name", &self.inner.name)
            .field("container", &self.inner.container.get())
            .field("components", &self.inner.components.borrow().len())
            .field("actions", &self.inner.actions.borrow().len())
            .finish()
    }
}
