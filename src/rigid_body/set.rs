//! Arena storage for bodies (spec.md §3: "unique id", §9: generation
//! safety for removed bodies). A [`RigidBodyHandle`] bundles a slot
//! index with a generation counter, so a handle to a removed body
//! never silently aliases whatever gets inserted in its place.

use derive_more::{From, Index, IndexMut, IntoIterator};
use slotmap::{new_key_type, SlotMap};

use super::RigidBody;

new_key_type! {
    pub struct RigidBodyHandle;
}

#[derive(Debug, Clone, Default, IntoIterator, Index, IndexMut, From)]
pub struct RigidBodySet {
    inner: SlotMap<RigidBodyHandle, RigidBody>,
}

impl RigidBodySet {
    pub fn new() -> Self {
        Self {
            inner: SlotMap::with_key(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: SlotMap::with_capacity_and_key(capacity),
        }
    }

    pub fn insert(&mut self, value: RigidBody) -> RigidBodyHandle {
        self.inner.insert(value)
    }

    pub fn remove(&mut self, handle: RigidBodyHandle) -> Option<RigidBody> {
        self.inner.remove(handle)
    }

    pub fn clear(&mut self) {
        self.inner.clear()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn get(&self, handle: RigidBodyHandle) -> Option<&RigidBody> {
        self.inner.get(handle)
    }

    pub fn get_mut(&mut self, handle: RigidBodyHandle) -> Option<&mut RigidBody> {
        self.inner.get_mut(handle)
    }

    pub fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    pub fn bodies(&self) -> impl Iterator<Item = &RigidBody> {
        self.inner.values()
    }

    pub fn bodies_mut(&mut self) -> impl Iterator<Item = &mut RigidBody> {
        self.inner.values_mut()
    }

    pub fn handles(&self) -> impl Iterator<Item = RigidBodyHandle> + '_ {
        self.inner.keys()
    }

    pub fn get_disjoint_mut<const N: usize>(
        &mut self,
        handles: [RigidBodyHandle; N],
    ) -> Option<[&mut RigidBody; N]> {
        self.inner.get_disjoint_mut(handles)
    }

    pub fn contains(&self, handle: RigidBodyHandle) -> bool {
        self.inner.contains_key(handle)
    }

    pub fn reserve(&mut self, additional: usize) {
        self.inner.reserve(additional)
    }

    pub fn iter(&self) -> impl Iterator<Item = (RigidBodyHandle, &RigidBody)> {
        self.inner.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (RigidBodyHandle, &mut RigidBody)> {
        self.inner.iter_mut()
    }

    pub fn drain(&mut self) -> impl Iterator<Item = (RigidBodyHandle, RigidBody)> + '_ {
        self.inner.drain()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::matrix::Mat3;

    #[test]
    fn removed_handle_does_not_alias_new_insert() {
        let mut set = RigidBodySet::new();
        let first = set.insert(RigidBody::new_dynamic(1.0, Mat3::IDENTITY, 0.4));
        set.remove(first);
        let second = set.insert(RigidBody::new_dynamic(2.0, Mat3::IDENTITY, 0.4));

        assert!(set.get(first).is_none());
        assert!(set.get(second).is_some());
    }

    #[test]
    fn disjoint_mut_lets_two_bodies_be_borrowed_together() {
        let mut set = RigidBodySet::new();
        let a = set.insert(RigidBody::new_kinematic());
        let b = set.insert(RigidBody::new_kinematic());

        let [body_a, body_b] = set.get_disjoint_mut([a, b]).unwrap();
        body_a.position.x = 1.0;
        body_b.position.x = 2.0;

        assert_eq!(set.get(a).unwrap().position().x, 1.0);
        assert_eq!(set.get(b).unwrap().position().x, 2.0);
    }
}
