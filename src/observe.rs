//! Explicit change subscriptions.
//!
//! A component that owns some state keeps a [`Publisher`] next to it and calls
//! [`Publisher::publish`] after each change it makes. Consumers hold the
//! receiving end of a channel and redraw when a value arrives. Subscribers whose
//! receiver has been dropped are pruned on the next publish.

use std::sync::mpsc::{Receiver, Sender, channel};

#[derive(Debug)]
pub struct Publisher<T: Clone> {
    subscribers: Vec<Sender<T>>,
}

impl<T: Clone> Default for Publisher<T> {
    fn default() -> Self {
        Self {
            subscribers: Vec::new(),
        }
    }
}

impl<T: Clone> Publisher<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new subscriber. It only sees values published afterwards.
    pub fn subscribe(&mut self) -> Receiver<T> {
        let (tx, rx) = channel();
        self.subscribers.push(tx);
        rx
    }

    /// Deliver `value` to every live subscriber.
    pub fn publish(&mut self, value: &T) {
        self.subscribers.retain(|tx| tx.send(value.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_reaches_all_subscribers() {
        let mut publisher = Publisher::new();
        let first = publisher.subscribe();
        let second = publisher.subscribe();

        publisher.publish(&7u32);

        assert_eq!(first.try_recv().unwrap(), 7);
        assert_eq!(second.try_recv().unwrap(), 7);
    }

    #[test]
    fn test_dropped_subscribers_are_pruned() {
        let mut publisher = Publisher::new();
        let kept = publisher.subscribe();
        drop(publisher.subscribe());

        publisher.publish(&"tick".to_string());

        assert_eq!(publisher.subscriber_count(), 1);
        assert_eq!(kept.try_recv().unwrap(), "tick");
    }
}
