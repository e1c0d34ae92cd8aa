//! Broadcast of post-mutation state to display widgets.
//!
//! The controller owns an ordered subscriber registry; delivery order and
//! unsubscription are part of the typed contract. Callbacks run
//! synchronously after the mutation has been persisted, so a subscriber
//! always observes a consistent post-mutation snapshot.

use gamification_core::{Achievement, ProgressSnapshot};

/// Payload delivered to subscribers after every committed mutation.
#[derive(Clone, Debug)]
pub struct GamificationUpdate {
    /// Post-mutation snapshot.
    pub snapshot: ProgressSnapshot,
    /// Achievements minted by this operation, in award order.
    pub new_achievements: Vec<Achievement>,
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

type Callback = Box<dyn FnMut(&GamificationUpdate)>;

/// Ordered callback registry owned by the controller.
pub(crate) struct SubscriberSet {
    next_id: u64,
    entries: Vec<(SubscriberId, Callback)>,
}

impl SubscriberSet {
    pub(crate) fn new() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }

    pub(crate) fn subscribe(&mut self, callback: Callback) -> SubscriberId {
        let id = SubscriberId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, callback));
        id
    }

    /// Removes a subscriber. Returns false when the id is unknown, which
    /// makes double-unsubscribe harmless.
    pub(crate) fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    /// Delivers the update to every subscriber in registration order.
    pub(crate) fn emit(&mut self, update: &GamificationUpdate) {
        for (_, callback) in &mut self.entries {
            callback(update);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn update() -> GamificationUpdate {
        GamificationUpdate {
            snapshot: ProgressSnapshot::new("user-1"),
            new_achievements: Vec::new(),
        }
    }

    #[test]
    fn delivery_follows_registration_order() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut subscribers = SubscriberSet::new();

        for tag in ["stats", "animation", "modal"] {
            let order = Rc::clone(&order);
            subscribers.subscribe(Box::new(move |_| order.borrow_mut().push(tag)));
        }

        subscribers.emit(&update());
        assert_eq!(*order.borrow(), vec!["stats", "animation", "modal"]);
    }

    #[test]
    fn unsubscribed_callbacks_stop_receiving() {
        let count = Rc::new(RefCell::new(0));
        let mut subscribers = SubscriberSet::new();

        let counter = Rc::clone(&count);
        let id = subscribers.subscribe(Box::new(move |_| *counter.borrow_mut() += 1));

        subscribers.emit(&update());
        assert!(subscribers.unsubscribe(id));
        subscribers.emit(&update());

        assert_eq!(*count.borrow(), 1);
        assert!(!subscribers.unsubscribe(id));
    }
}
