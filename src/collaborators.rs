//! Collaborator contracts consumed by the core (spec.md §6).
//!
//! Everything in this module is a trait: the core crate never depends
//! on a concrete broad-phase, narrow-phase, solver, or sleep-island
//! implementation. A simulation crate built on top of this one
//! implements these traits over its own spatial index, manifold
//! generator, and island graph.

use crate::{
    math::{matrix::Mat3, quat::Quat, vector::Vec3},
    precision::Real,
    rigid_body::RigidBodyHandle,
};

/// Tracks whether a body's island is currently simulated or asleep.
pub trait ActivationHandle {
    fn activate(&mut self);
    fn is_active(&self) -> bool;
    fn is_slowing(&self) -> bool;
    fn velocity_time_below_limit(&self) -> Real;
    fn allow_stabilization(&self) -> bool;
    fn deactivation_manager(&self) -> &dyn DeactivationManager;
}

/// Global thresholds and island bookkeeping shared by every
/// [`ActivationHandle`] in a simulation.
pub trait DeactivationManager {
    fn use_stabilization(&self) -> bool;
    fn velocity_lower_limit(&self) -> Real;
    fn velocity_lower_limit_squared(&self) -> Real;
    fn low_velocity_time_minimum(&self) -> Real;
    fn add_island(&mut self, body: RigidBodyHandle);
    fn remove_island(&mut self, body: RigidBodyHandle);
}

/// Supplies the precomputed `gravity * dt` vector and is notified when
/// a body's dynamic/kinematic mode changes, so it can move the body
/// between its own internal worklists.
pub trait ForceUpdater {
    fn gravity_dt(&self) -> Vec3;
    fn force_updateable_becoming_dynamic(&mut self, body: RigidBodyHandle);
    fn force_updateable_becoming_kinematic(&mut self, body: RigidBodyHandle);
}

/// One contact pair tracked by the broad/narrow phase, as seen from
/// the continuous-collision side (spec.md §4.3, §6).
pub trait CcdPair {
    fn time_of_impact(&self) -> Real;
    fn set_time_of_impact(&mut self, toi: Real);
    fn update_material_properties(&mut self);
    fn update_time_of_impact(&mut self, other: RigidBodyHandle, dt: Real);
}

/// An opaque collision-group tag. Two well-known values are reserved
/// for bodies that haven't been assigned a group of their own yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CollisionGroup(pub u32);

/// The body's collidable shape, its contact pairs, and its collision
/// group — owned exclusively by the body but holding a reciprocal
/// back-pointer to it (spec.md §3).
pub trait CollidableHandle {
    fn entity(&self) -> RigidBodyHandle;
    fn volume_distribution(&self) -> Mat3;
    fn notify_shape_changed(&mut self);
    fn update_world_transform(&mut self, position: Vec3, orientation: Quat);
    fn collision_group(&self) -> CollisionGroup;
    fn set_collision_group(&mut self, group: CollisionGroup);

    /// Visits every tracked pair. Kept as a visitor rather than
    /// returning an iterator of trait objects so the trait stays
    /// object-safe across collidable implementations with different
    /// underlying pair storage.
    fn for_each_pair_mut(&mut self, visit: &mut dyn FnMut(&mut dyn CcdPair));

    /// The minimum `timeOfImpact` across all tracked pairs, or `1.0`
    /// when there are none (spec.md §4.3, step 1 of continuous-update).
    fn min_time_of_impact(&self) -> Real;
}

/// Notified when a body's material is swapped out from under it.
pub trait MaterialHandle {
    fn notify_material_changed(&mut self);
}

/// Global, read-only-during-a-tick simulation configuration.
pub trait MotionSettings {
    fn default_position_update_mode(&self) -> crate::position_updater::PositionUpdateMode;
    fn pair_allows_ccd(&self, body: RigidBodyHandle, pair: &dyn CcdPair) -> bool;
    fn default_kinematic_group(&self) -> CollisionGroup;
    fn default_dynamic_group(&self) -> CollisionGroup;
}

/// The shape-family constant `becomeDynamic`/`setMass` scale the mass
/// by before deriving a local inertia tensor from a shape's volume
/// distribution.
pub trait InertiaHelper {
    fn inertia_tensor_scale(&self) -> Real;
}

/// Minimal collaborator stand-ins used by `rigid_body` unit tests.
#[cfg(test)]
pub mod tests {
    use super::*;

    #[derive(Default)]
    pub struct RecordingActivation {
        pub activated: bool,
    }

    impl ActivationHandle for RecordingActivation {
        fn activate(&mut self) {
            self.activated = true;
        }

        fn is_active(&self) -> bool {
            self.activated
        }

        fn is_slowing(&self) -> bool {
            false
        }

        fn velocity_time_below_limit(&self) -> Real {
            0.0
        }

        fn allow_stabilization(&self) -> bool {
            true
        }

        fn deactivation_manager(&self) -> &dyn DeactivationManager {
            &NULL_DEACTIVATION_MANAGER
        }
    }

    struct NullDeactivationManager;

    static NULL_DEACTIVATION_MANAGER: NullDeactivationManager = NullDeactivationManager;

    impl DeactivationManager for NullDeactivationManager {
        fn use_stabilization(&self) -> bool {
            false
        }

        fn velocity_lower_limit(&self) -> Real {
            0.0
        }

        fn velocity_lower_limit_squared(&self) -> Real {
            0.0
        }

        fn low_velocity_time_minimum(&self) -> Real {
            0.0
        }

        fn add_island(&mut self, _body: RigidBodyHandle) {}
        fn remove_island(&mut self, _body: RigidBodyHandle) {}
    }

    #[derive(Default)]
    pub struct RecordingForceUpdater {
        pub became_dynamic_count: u32,
        pub became_kinematic_count: u32,
    }

    impl ForceUpdater for RecordingForceUpdater {
        fn gravity_dt(&self) -> Vec3 {
            Vec3::ZERO
        }

        fn force_updateable_becoming_dynamic(&mut self, _body: RigidBodyHandle) {
            self.became_dynamic_count += 1;
        }

        fn force_updateable_becoming_kinematic(&mut self, _body: RigidBodyHandle) {
            self.became_kinematic_count += 1;
        }
    }

    /// Minimal collidable stand-in used by `rigid_body::mass` unit
    /// tests; tracks only the collision group, since that's all those
    /// tests exercise.
    #[derive(Default)]
    pub struct StubCollidable {
        pub group: CollisionGroup,
    }

    impl CollidableHandle for StubCollidable {
        fn entity(&self) -> RigidBodyHandle {
            RigidBodyHandle::default()
        }

        fn volume_distribution(&self) -> Mat3 {
            Mat3::IDENTITY
        }

        fn notify_shape_changed(&mut self) {}

        fn update_world_transform(&mut self, _position: Vec3, _orientation: Quat) {}

        fn collision_group(&self) -> CollisionGroup {
            self.group
        }

        fn set_collision_group(&mut self, group: CollisionGroup) {
            self.group = group;
        }

        fn for_each_pair_mut(&mut self, _visit: &mut dyn FnMut(&mut dyn CcdPair)) {}

        fn min_time_of_impact(&self) -> Real {
            1.0
        }
    }

    pub struct StubMotionSettings;

    impl Default for StubMotionSettings {
        fn default() -> Self {
            Self
        }
    }

    impl MotionSettings for StubMotionSettings {
        fn default_position_update_mode(&self) -> crate::position_updater::PositionUpdateMode {
            crate::position_updater::PositionUpdateMode::Discrete
        }

        fn pair_allows_ccd(&self, _body: RigidBodyHandle, _pair: &dyn CcdPair) -> bool {
            true
        }

        fn default_kinematic_group(&self) -> CollisionGroup {
            CollisionGroup(1)
        }

        fn default_dynamic_group(&self) -> CollisionGroup {
            CollisionGroup(2)
        }
    }
}
