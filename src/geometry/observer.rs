use std::fmt;

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Token returned by a subscription; pass it back to unsubscribe.
    pub struct Subscription;
}

/// Registry of change listeners, keyed by generational [`Subscription`] tokens.
///
/// A stale token never removes a newer listener that reused its slot.
pub struct ChangeObservers<T: ?Sized> {
    listeners: SlotMap<Subscription, Box<dyn FnMut(&T)>>,
}

impl<T: ?Sized> ChangeObservers<T> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            listeners: SlotMap::with_key(),
        }
    }

    /// Registers a listener.
    pub fn subscribe(&mut self, listener: impl FnMut(&T) + 'static) -> Subscription {
        self.listeners.insert(Box::new(listener))
    }

    /// Removes a listener. Returns `false` if the token was already spent.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        self.listeners.remove(subscription).is_some()
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Returns `true` if nobody is listening.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Invokes every listener with `subject`.
    pub fn notify(&mut self, subject: &T) {
        for (_, listener) in &mut self.listeners {
            listener(subject);
        }
    }
}

impl<T: ?Sized> Default for ChangeObservers<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> fmt::Debug for ChangeObservers<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeObservers")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
