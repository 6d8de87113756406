//! # matchroom-overlay
//!
//! Component/Feature lifecycle framework for statistics overlays injected
//! into a third-party matchroom page.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for
//! change notifications.
//!
//! ## Architecture
//!
//! The host page owns its DOM and rewrites it whenever it likes. The overlay
//! only ever adds its own containers under anchors the page integration found,
//! and keeps two things strictly apart:
//!
//! ```text
//! placement:  append_to / prepend_to / remove   → container ↔ host element
//! rendering:  mount / unmount                   → node ↔ rendering root
//! ```
//!
//! Components and actions are grouped into a [`Feature`] so a single data
//! change fans out to every fragment with one `render()` call.
//!
//! ## Modules
//!
//! - [`engine`] - Component, Feature, Action, lifecycle state
//! - [`dom`] - Host document capability + in-memory document
//! - [`root`] - Rendering roots + markup views
//! - [`source`] - Change sources (notifier, signals)
//! - [`settings`] - Extension naming configuration
//! - [`error`] - Error types

pub mod dom;
pub mod engine;
pub mod error;
pub mod root;
pub mod settings;
pub mod source;

pub use dom::{ElementId, HostDocument, MemoryDocument, Position};

pub use engine::{
    Action, ActionCallback, Component, ComponentOptions, ComponentState, Feature, Page, Placement,
};

pub use error::{BatchError, Error, Failure, Phase, PlacementViolation, Result, Target};

pub use root::{view, MarkupRoots, Node, RenderRoot, RootOptions, RootProvider, Scope, View};

pub use source::{ChangeSource, Listener, Notifier, Subscription};

pub use settings::{extension_name, id_prefix, reset_settings, set_extension_name};
