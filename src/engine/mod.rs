//! Lifecycle engine - components, features and actions.
//!
//! - [`Component`]: one container element + one rendering root, with
//!   independent attach/mount state
//! - [`Feature`]: named aggregate owning components and actions, with bulk
//!   render/unmount/remove and change subscriptions
//! - [`Action`]: render/unmount side-effect pair driven by its feature
//! - [`Page`]: host document + root provider shared by a feature's components
//!
//! # Ownership
//!
//! ```text
//! Feature ──owns──▶ Component ──owns──▶ container element + rendering root
//!    ▲                  │
//!    └──── weak ────────┘
//! Feature ──owns──▶ Action
//! ```
//!
//! Components look their feature up through a weak handle, so dropping the
//! feature releases everything it created. Containers already in the document
//! stay there until removed.

mod action;
mod component;
mod feature;
mod page;
mod state;

pub use action::{Action, ActionCallback};
pub use component::{Component, ComponentOptions};
pub use feature::Feature;
pub use page::Page;
pub use state::{ComponentState, Placement};
