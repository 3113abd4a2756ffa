//! Observer registration for notifications emitted by tab groups and the
//! drag overlay.
//!
//! Handlers run synchronously, in registration order, on the thread that
//! calls [`Signal::emit`].  A handler must not assume the emitting
//! component is unchanged once it returns.

use std::fmt;

/// Handle returned by [`Signal::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler<T> = Box<dyn FnMut(&T)>;

/// A list of handlers for one kind of notification.
pub struct Signal<T> {
    handlers: Vec<(SubscriptionId, Handler<T>)>,
    next_id: u64,
}

impl<T> Default for Signal<T> {
    fn default() -> Self {
        Self {
            handlers: Vec::new(),
            next_id: 0,
        }
    }
}

impl<T> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

impl<T> Signal<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, handler: impl FnMut(&T) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.handlers.push((id, Box::new(handler)));
        id
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(h, _)| *h != id);
        self.handlers.len() != before
    }

    pub fn emit(&mut self, value: &T) {
        for (_, handler) in self.handlers.iter_mut() {
            handler(value);
        }
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn emits_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut signal = Signal::<u32>::new();
        let a = log.clone();
        signal.subscribe(move |v| a.borrow_mut().push(("a", *v)));
        let b = log.clone();
        signal.subscribe(move |v| b.borrow_mut().push(("b", *v)));

        signal.emit(&7);
        assert_eq!(*log.borrow(), vec![("a", 7), ("b", 7)]);
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let count = Rc::new(RefCell::new(0));
        let mut signal = Signal::<()>::new();
        let c = count.clone();
        let id = signal.subscribe(move |_| *c.borrow_mut() += 1);

        signal.emit(&());
        assert!(signal.unsubscribe(id));
        assert!(!signal.unsubscribe(id));
        signal.emit(&());

        assert_eq!(*count.borrow(), 1);
        assert!(signal.is_empty());
    }
}
