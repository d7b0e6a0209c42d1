//! Dynamic/kinematic mode transitions (spec.md §4.1, §6
//! `ForceUpdater`). Both directions notify the
//! [`crate::collaborators::ActivationHandle`] and
//! [`crate::collaborators::ForceUpdater`] so a sleeping body wakes up
//! and moves between whatever worklists the force updater keeps
//! internally, matching the teacher's `is_awake` bookkeeping on state
//! changes. Velocities are never touched by a mode transition — a
//! kinematic body keeps whatever velocity it's being driven with
//! (spec.md GLOSSARY: "transfers momentum ... but does not absorb
//! any").

use crate::{
    collaborators::{ActivationHandle, CollidableHandle, CollisionGroup, ForceUpdater, MotionSettings},
    error::{Error, Result},
    math::matrix::Mat3,
    precision::Real,
    rigid_body::RigidBodyHandle,
};

use super::RigidBody;

/// Moves `collidable`'s group to `new_default` when it currently sits
/// at `paired_default` or hasn't been assigned one at all (spec.md
/// §4.1: "sets collision-group to default-kinematic or default-dynamic
/// when the current group is the paired default or unset"). A group
/// the caller picked deliberately — anything else — is left alone.
fn carry_default_collision_group(
    collidable: &mut dyn CollidableHandle,
    paired_default: CollisionGroup,
    new_default: CollisionGroup,
) {
    let current = collidable.collision_group();
    if current == paired_default || current == CollisionGroup::default() {
        collidable.set_collision_group(new_default);
    }
}

impl RigidBody {
    /// Makes the body dynamic with an explicit local inertia tensor.
    /// Rejects a non-finite or non-positive mass without touching the
    /// body's current state (spec.md §7 `InvalidMassError`). Idempotent:
    /// calling this twice with the same arguments leaves the body in
    /// the same state as calling it once (spec.md §8).
    pub fn become_dynamic_with_tensor(
        &mut self,
        handle: RigidBodyHandle,
        mass: Real,
        local_inertia_tensor: Mat3,
        activation: &mut dyn ActivationHandle,
        force_updater: &mut dyn ForceUpdater,
        collidable: &mut dyn CollidableHandle,
        settings: &dyn MotionSettings,
    ) -> Result<()> {
        if !mass.is_finite() || mass <= 0.0 {
            return Err(Error::InvalidMass(mass));
        }

        let was_dynamic = self.is_dynamic;
        self.enter_dynamic(mass, local_inertia_tensor);

        if !was_dynamic {
            activation.activate();
            force_updater.force_updateable_becoming_dynamic(handle);
            carry_default_collision_group(
                collidable,
                settings.default_kinematic_group(),
                settings.default_dynamic_group(),
            );
        }
        Ok(())
    }

    /// Makes the body dynamic, deriving the local inertia tensor from
    /// `volume_distribution * (mass * inertia_tensor_scale)`.
    pub fn become_dynamic(
        &mut self,
        handle: RigidBodyHandle,
        mass: Real,
        volume_distribution: Mat3,
        inertia_tensor_scale: Real,
        activation: &mut dyn ActivationHandle,
        force_updater: &mut dyn ForceUpdater,
        collidable: &mut dyn CollidableHandle,
        settings: &dyn MotionSettings,
    ) -> Result<()> {
        let local_inertia_tensor = volume_distribution * (mass * inertia_tensor_scale);
        self.become_dynamic_with_tensor(
            handle,
            mass,
            local_inertia_tensor,
            activation,
            force_updater,
            collidable,
            settings,
        )
    }

    /// Makes the body kinematic: zeroes mass, inverse mass, and both
    /// inertia tensors. Idempotent; velocities are left untouched.
    pub fn become_kinematic(
        &mut self,
        handle: RigidBodyHandle,
        activation: &mut dyn ActivationHandle,
        force_updater: &mut dyn ForceUpdater,
        collidable: &mut dyn CollidableHandle,
        settings: &dyn MotionSettings,
    ) {
        let was_dynamic = self.is_dynamic;
        self.enter_kinematic();

        if was_dynamic {
            activation.activate();
            force_updater.force_updateable_becoming_kinematic(handle);
            carry_default_collision_group(
                collidable,
                settings.default_dynamic_group(),
                settings.default_kinematic_group(),
            );
        }
    }

    /// `setMass` (spec.md §4.1): a non-positive or non-finite mass
    /// demotes the body to kinematic rather than erroring. A mass that
    /// keeps the body dynamic rescales the *existing* local inertia
    /// tensor by `m / oldMass` rather than re-deriving it from the
    /// shape, so a body that's had its tensor hand-tuned keeps that
    /// shape under repeated mass edits. Becoming dynamic from
    /// kinematic still derives the tensor from the shape, since there
    /// is no existing tensor to rescale.
    pub fn set_mass(
        &mut self,
        handle: RigidBodyHandle,
        mass: Real,
        volume_distribution: Mat3,
        inertia_tensor_scale: Real,
        activation: &mut dyn ActivationHandle,
        force_updater: &mut dyn ForceUpdater,
        collidable: &mut dyn CollidableHandle,
        settings: &dyn MotionSettings,
    ) {
        if !mass.is_finite() || mass <= 0.0 {
            self.become_kinematic(handle, activation, force_updater, collidable, settings);
            return;
        }

        if self.is_dynamic {
            let scale = mass / self.mass;
            let rescaled_tensor = self.local_inertia_tensor * scale;
            // mass is validated above; become_dynamic_with_tensor cannot fail here.
            let _ = self.become_dynamic_with_tensor(
                handle,
                mass,
                rescaled_tensor,
                activation,
                force_updater,
                collidable,
                settings,
            );
        } else {
            let _ = self.become_dynamic(
                handle,
                mass,
                volume_distribution,
                inertia_tensor_scale,
                activation,
                force_updater,
                collidable,
                settings,
            );
        }
    }

    /// `setInverseMass` (spec.md §4.1): `im > 0` maps to `setMass(1/im)`,
    /// anything else maps to `setMass(0)` (i.e. kinematic).
    pub fn set_inverse_mass(
        &mut self,
        handle: RigidBodyHandle,
        inverse_mass: Real,
        volume_distribution: Mat3,
        inertia_tensor_scale: Real,
        activation: &mut dyn ActivationHandle,
        force_updater: &mut dyn ForceUpdater,
        collidable: &mut dyn CollidableHandle,
        settings: &dyn MotionSettings,
    ) {
        let mass = if inverse_mass > 0.0 {
            inverse_mass.recip()
        } else {
            0.0
        };
        self.set_mass(
            handle,
            mass,
            volume_distribution,
            inertia_tensor_scale,
            activation,
            force_updater,
            collidable,
            settings,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::tests::{RecordingActivation, RecordingForceUpdater, StubCollidable, StubMotionSettings};
    use approx::assert_relative_eq;
    use slotmap::SlotMap;

    fn dummy_handle() -> RigidBodyHandle {
        let mut map: SlotMap<RigidBodyHandle, ()> = SlotMap::with_key();
        map.insert(())
    }

    #[test]
    fn become_dynamic_rejects_non_positive_mass() {
        let mut body = RigidBody::new_kinematic();
        let mut activation = RecordingActivation::default();
        let mut updater = RecordingForceUpdater::default();
        let mut collidable = StubCollidable::default();
        let settings = StubMotionSettings::default();
        let err = body
            .become_dynamic(
                dummy_handle(),
                -1.0,
                Mat3::IDENTITY,
                0.4,
                &mut activation,
                &mut updater,
                &mut collidable,
                &settings,
            )
            .unwrap_err();
        assert!(matches!(err, Error::InvalidMass(_)));
        assert!(body.is_kinematic());
        assert!(!activation.activated);
    }

    #[test]
    fn become_dynamic_activates_and_notifies_force_updater_once() {
        let mut body = RigidBody::new_kinematic();
        let mut activation = RecordingActivation::default();
        let mut updater = RecordingForceUpdater::default();
        let mut collidable = StubCollidable::default();
        let settings = StubMotionSettings::default();
        body.become_dynamic(
            dummy_handle(),
            2.0,
            Mat3::IDENTITY,
            0.5,
            &mut activation,
            &mut updater,
            &mut collidable,
            &settings,
        )
        .unwrap();

        assert!(body.is_dynamic());
        assert_relative_eq!(body.inverse_mass(), 0.5);
        assert_eq!(updater.became_dynamic_count, 1);
        assert!(activation.activated);
    }

    #[test]
    fn become_dynamic_carries_default_collision_group_from_unset() {
        let mut body = RigidBody::new_kinematic();
        let mut activation = RecordingActivation::default();
        let mut updater = RecordingForceUpdater::default();
        let mut collidable = StubCollidable::default();
        let settings = StubMotionSettings::default();

        body.become_dynamic(
            dummy_handle(),
            1.0,
            Mat3::IDENTITY,
            0.4,
            &mut activation,
            &mut updater,
            &mut collidable,
            &settings,
        )
        .unwrap();

        assert_eq!(collidable.collision_group(), settings.default_dynamic_group());
    }

    #[test]
    fn become_dynamic_leaves_a_deliberately_chosen_group_alone() {
        let mut body = RigidBody::new_kinematic();
        let mut activation = RecordingActivation::default();
        let mut updater = RecordingForceUpdater::default();
        let custom = CollisionGroup(42);
        let mut collidable = StubCollidable {
            group: custom,
            ..Default::default()
        };
        let settings = StubMotionSettings::default();

        body.become_dynamic(
            dummy_handle(),
            1.0,
            Mat3::IDENTITY,
            0.4,
            &mut activation,
            &mut updater,
            &mut collidable,
            &settings,
        )
        .unwrap();

        assert_eq!(collidable.collision_group(), custom);
    }

    #[test]
    fn become_kinematic_preserves_velocity_activates_and_notifies_once() {
        let mut body = RigidBody::new_dynamic(1.0, Mat3::IDENTITY, 0.4)
            .with_linear_velocity(crate::math::vector::Vec3::new(1.0, 2.0, 3.0));
        let mut activation = RecordingActivation::default();
        let mut updater = RecordingForceUpdater::default();
        let mut collidable = StubCollidable::default();
        let settings = StubMotionSettings::default();

        body.become_kinematic(dummy_handle(), &mut activation, &mut updater, &mut collidable, &settings);

        assert!(body.is_kinematic());
        assert_eq!(
            body.linear_velocity(),
            crate::math::vector::Vec3::new(1.0, 2.0, 3.0)
        );
        assert_eq!(updater.became_kinematic_count, 1);
        assert!(activation.activated);
    }

    #[test]
    fn become_kinematic_carries_default_collision_group_from_paired_default() {
        let mut body = RigidBody::new_dynamic(1.0, Mat3::IDENTITY, 0.4);
        let mut activation = RecordingActivation::default();
        let mut updater = RecordingForceUpdater::default();
        let settings = StubMotionSettings::default();
        let mut collidable = StubCollidable {
            group: settings.default_dynamic_group(),
            ..Default::default()
        };

        body.become_kinematic(dummy_handle(), &mut activation, &mut updater, &mut collidable, &settings);

        assert_eq!(collidable.collision_group(), settings.default_kinematic_group());
    }

    #[test]
    fn become_kinematic_on_already_kinematic_body_does_not_activate() {
        let mut body = RigidBody::new_kinematic();
        let mut activation = RecordingActivation::default();
        let mut updater = RecordingForceUpdater::default();
        let mut collidable = StubCollidable::default();
        let settings = StubMotionSettings::default();

        body.become_kinematic(dummy_handle(), &mut activation, &mut updater, &mut collidable, &settings);

        assert!(!activation.activated);
        assert_eq!(updater.became_kinematic_count, 0);
    }

    #[test]
    fn set_mass_on_kinematic_body_preserves_velocity_and_derives_tensor() {
        let mut body = RigidBody::new_kinematic()
            .with_linear_velocity(crate::math::vector::Vec3::new(1.0, 2.0, 3.0));
        let mut activation = RecordingActivation::default();
        let mut updater = RecordingForceUpdater::default();
        let mut collidable = StubCollidable::default();
        let settings = StubMotionSettings::default();

        body.set_mass(
            dummy_handle(),
            4.0,
            Mat3::IDENTITY,
            0.4,
            &mut activation,
            &mut updater,
            &mut collidable,
            &settings,
        );

        assert!(body.is_dynamic());
        assert_relative_eq!(body.inverse_mass(), 0.25);
        assert_eq!(
            body.linear_velocity(),
            crate::math::vector::Vec3::new(1.0, 2.0, 3.0)
        );
        assert_eq!(body.local_inertia_tensor(), Mat3::IDENTITY * 1.6);
        assert!(activation.activated);
    }

    #[test]
    fn set_mass_on_dynamic_body_rescales_existing_tensor() {
        let mut body = RigidBody::new_dynamic(2.0, Mat3::IDENTITY, 0.4);
        let mut activation = RecordingActivation::default();
        let mut updater = RecordingForceUpdater::default();
        let mut collidable = StubCollidable::default();
        let settings = StubMotionSettings::default();

        body.set_mass(
            dummy_handle(),
            4.0,
            Mat3::IDENTITY,
            0.4,
            &mut activation,
            &mut updater,
            &mut collidable,
            &settings,
        );

        // old tensor = I * 0.8; new tensor = old * (4/2) = I * 1.6
        assert_eq!(body.local_inertia_tensor(), Mat3::IDENTITY * 1.6);
        assert_eq!(updater.became_dynamic_count, 0);
    }

    #[test]
    fn set_mass_zero_demotes_to_kinematic() {
        let mut body = RigidBody::new_dynamic(2.0, Mat3::IDENTITY, 0.4);
        let mut activation = RecordingActivation::default();
        let mut updater = RecordingForceUpdater::default();
        let mut collidable = StubCollidable::default();
        let settings = StubMotionSettings::default();

        body.set_mass(
            dummy_handle(),
            0.0,
            Mat3::IDENTITY,
            0.4,
            &mut activation,
            &mut updater,
            &mut collidable,
            &settings,
        );

        assert!(body.is_kinematic());
        assert_eq!(updater.became_kinematic_count, 1);
        assert!(activation.activated);
    }
}
