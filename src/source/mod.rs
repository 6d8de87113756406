//! Change sources - where "data changed" notifications come from.
//!
//! The framework only needs one capability from a data provider: register a
//! callback that runs after every change. It never interprets the payload.
//!
//! Implementations:
//! - [`Notifier`] - explicit listener list, the driver calls `notify()`
//! - `spark_signals::Signal<T>` - fires after every change of the signal
//!
//! Subscriptions are not tied to anyone's lifetime. Dropping a
//! [`Subscription`] keeps the listener registered; call
//! [`Subscription::unsubscribe`] to detach it.

mod notifier;
mod signal;

pub use notifier::Notifier;

use std::fmt;
use std::rc::Rc;

/// Change callback.
pub type Listener = Rc<dyn Fn()>;

/// Anything a feature can subscribe to.
pub trait ChangeSource {
    fn add_listener(&self, listener: Listener) -> Subscription;
}

/// Handle to a registered listener.
#[must_use = "dropping a Subscription leaves the listener registered"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Detach the listener from its source.
    pub fn unsubscribe(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}
