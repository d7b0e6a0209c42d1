//! Event notification (spec.md §9 re-architecture note): subscriber
//! lists live on the *collaborator* that owns the event, never on
//! [`crate::rigid_body::RigidBody`] itself, so a body and its
//! collaborators never form an ownership cycle through a callback.
//!
//! A body only exposes `subscribe`/`unsubscribe` against a list handed
//! to it from the outside (typically held by the simulation space that
//! owns the [`crate::rigid_body::RigidBodySet`]).

use crate::rigid_body::RigidBodyHandle;

/// A plain list of subscriber callbacks for one event kind. Held by a
/// collaborator (the simulation space, the collidable layer, ...), not
/// by the body that triggers the event.
///
/// Slots are tombstoned (left `None`) rather than `swap_remove`d on
/// unsubscribe, so a [`SubscriberId`] handed out earlier always names
/// the same callback (or nothing, if it's already been removed) even
/// after other subscribers come and go.
pub struct Subscribers<T> {
    callbacks: Vec<Option<Box<dyn FnMut(&T) + Send>>>,
}

impl<T> Subscribers<T> {
    pub fn new() -> Self {
        Self {
            callbacks: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, callback: impl FnMut(&T) + Send + 'static) -> SubscriberId {
        self.callbacks.push(Some(Box::new(callback)));
        SubscriberId(self.callbacks.len() - 1)
    }

    pub fn unsubscribe(&mut self, id: SubscriberId) {
        if let Some(slot) = self.callbacks.get_mut(id.0) {
            *slot = None;
        }
    }

    pub fn notify(&mut self, event: &T) {
        for callback in self.callbacks.iter_mut().flatten() {
            callback(event);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.iter().all(Option::is_none)
    }
}

impl<T> Default for Subscribers<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriberId(usize);

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn unsubscribe_removes_only_the_named_callback() {
        let mut subscribers = Subscribers::<u32>::new();
        let a_calls = Arc::new(Mutex::new(0));
        let b_calls = Arc::new(Mutex::new(0));

        let a_handle = Arc::clone(&a_calls);
        let id_a = subscribers.subscribe(move |_| *a_handle.lock().unwrap() += 1);
        let b_handle = Arc::clone(&b_calls);
        let id_b = subscribers.subscribe(move |_| *b_handle.lock().unwrap() += 1);

        subscribers.unsubscribe(id_a);
        subscribers.notify(&1);

        assert_eq!(*a_calls.lock().unwrap(), 0);
        assert_eq!(*b_calls.lock().unwrap(), 1);

        // The id for the still-subscribed callback keeps naming it even
        // though an earlier slot was vacated.
        subscribers.unsubscribe(id_b);
        subscribers.notify(&2);
        assert_eq!(*b_calls.lock().unwrap(), 1);
    }

    #[test]
    fn is_empty_accounts_for_tombstoned_slots() {
        let mut subscribers = Subscribers::<u32>::new();
        let id = subscribers.subscribe(|_| {});
        assert!(!subscribers.is_empty());

        subscribers.unsubscribe(id);
        assert!(subscribers.is_empty());
    }
}

/// Emitted once per tick per body, in whichever phase finalizes the
/// body's pose (spec.md §6).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionUpdated {
    pub body: RigidBodyHandle,
}

/// Emitted when a body's material is swapped out from under it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialChanged {
    pub body: RigidBodyHandle,
}

/// Emitted when a body's collidable shape is mutated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeChanged {
    pub body: RigidBodyHandle,
}
