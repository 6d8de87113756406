//! Notifier - a plain listener list.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::{ChangeSource, Listener, Subscription};

/// Listener list with explicit notification.
///
/// Clones share the same list.
#[derive(Clone, Default)]
pub struct Notifier {
    inner: Rc<NotifierInner>,
}

#[derive(Default)]
struct NotifierInner {
    next_id: Cell<u64>,
    listeners: RefCell<Vec<(u64, Listener)>>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call every listener registered before this call, in order.
    pub fn notify(&self) {
        // Listeners may (un)subscribe while being notified.
        let listeners: Vec<Listener> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();

        tracing::trace!(listeners = listeners.len(), "notifying listeners");
        for listener in listeners {
            listener();
        }
    }

    pub fn len(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ChangeSource for Notifier {
    fn add_listener(&self, listener: Listener) -> Subscription {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        self.inner.listeners.borrow_mut().push((id, listener));

        let inner = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = inner.upgrade() {
                inner.listeners.borrow_mut().retain(|(other, _)| *other != id);
            }
        })
    }
}
