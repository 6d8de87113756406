//! Signals as change sources.
//!
//! Subscribing creates an effect that reads the signal, which makes the
//! effect re-run on every change. The effect's first run happens immediately
//! on creation and only records the current value, so listeners see changes
//! made after subscribing.
//!
//! The listener runs inside the effect, so any signal it reads (a view
//! rendering a different signal, say) also re-runs the effect. Those runs
//! find the subscribed value unchanged and stay quiet.

use std::cell::RefCell;

use spark_signals::{effect, Signal};

use super::{ChangeSource, Listener, Subscription};

impl<T: Clone + PartialEq + 'static> ChangeSource for Signal<T> {
    fn add_listener(&self, listener: Listener) -> Subscription {
        let signal = self.clone();
        let last: RefCell<Option<T>> = RefCell::new(None);

        let stop = effect(move || {
            let current = signal.get();
            let previous = last.borrow_mut().replace(current.clone());
            match previous {
                Some(previous) if previous != current => listener(),
                _ => {}
            }
        });

        Subscription::new(stop)
    }
}
