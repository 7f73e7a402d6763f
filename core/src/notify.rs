//! Typed fan-out of notifications to subscribers.

use std::fmt;

/// Ordered list of callbacks for one event type.
///
/// Subscribers run in subscription order, each to completion, before `emit`
/// returns.
pub struct Notifier<T> {
    subscribers: Vec<Box<dyn FnMut(&T)>>,
}

impl<T> Notifier<T> {
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
        }
    }

    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: FnMut(&T) + 'static,
    {
        self.subscribers.push(Box::new(callback));
    }

    pub fn emit(&mut self, event: &T) {
        for subscriber in &mut self.subscribers {
            subscriber(event);
        }
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

impl<T> Default for Notifier<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Notifier<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
