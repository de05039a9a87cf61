//! Change notification
//!
//! Models and runners publish named events to any number of subscribers.
//! Delivery is synchronous and in subscription order; a subscriber is any
//! type implementing [`Observer`], including plain closures.

/// Receiver of events of type `E`.
pub trait Observer<E> {
    fn notify(&mut self, event: &E);
}

impl<E, F> Observer<E> for F
where
    F: FnMut(&E),
{
    fn notify(&mut self, event: &E) {
        self(event)
    }
}

/// Ordered list of subscribers for one event type.
pub struct Observers<E> {
    list: Vec<Box<dyn Observer<E>>>,
}

impl<E> Observers<E> {
    pub fn new() -> Self {
        Observers { list: Vec::new() }
    }

    /// Register a subscriber; it receives every later event.
    pub fn subscribe(&mut self, observer: impl Observer<E> + 'static) {
        self.list.push(Box::new(observer));
    }

    /// Deliver `event` to every subscriber.
    pub fn publish(&mut self, event: E) {
        for observer in &mut self.list {
            observer.notify(&event);
        }
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}

impl<E> Default for Observers<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> std::fmt::Debug for Observers<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("subscribers", &self.list.len())
            .finish()
    }
}
