//! Impulse application (spec.md §4.1, §4.4, §9). `apply_impulse` is
//! the general path used by gameplay code and the CCD sweep (notifies
//! activation); `apply_linear_impulse`/`apply_angular_impulse` are the
//! solver fast path used inside a constraint iteration loop — no
//! activation handle, since the solver only ever touches already-awake
//! islands and these must be safe to call while the body's
//! [`crate::spin_lock::SpinLock`] is held.

use crate::{collaborators::ActivationHandle, math::vector::Vec3};

use super::RigidBody;

impl RigidBody {
    /// Applies `impulse` at world-space `location`, splitting it into
    /// linear and angular contributions about the centre of mass. A
    /// true no-op on kinematic bodies (spec.md §4.1): velocities are
    /// left untouched (their coefficients are already zero) and the
    /// body is not activated.
    pub fn apply_impulse(&mut self, location: Vec3, impulse: Vec3, activation: &mut dyn ActivationHandle) {
        if !self.is_dynamic {
            return;
        }

        let from_center_of_mass = location - self.position;
        self.apply_linear_impulse(impulse);
        self.apply_angular_impulse(from_center_of_mass.cross(impulse));
        activation.activate();
    }

    /// Solver fast path: applies a linear impulse without touching
    /// activation state.
    pub fn apply_linear_impulse(&mut self, impulse: Vec3) {
        self.linear_velocity += impulse * self.inverse_mass;
    }

    /// Solver fast path: applies an angular impulse (already expressed
    /// about the centre of mass) without touching activation state.
    pub fn apply_angular_impulse(&mut self, angular_impulse: Vec3) {
        self.angular_velocity += self.world_inertia_tensor_inverse.transform(angular_impulse);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::tests::RecordingActivation;
    use crate::math::matrix::Mat3;
    use approx::assert_relative_eq;

    #[test]
    fn impulse_at_center_of_mass_only_changes_linear_velocity() {
        let mut body = RigidBody::new_dynamic(2.0, Mat3::IDENTITY, 0.4);
        body.refresh_world_inertia();
        let mut activation = RecordingActivation::default();

        body.apply_impulse(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), &mut activation);

        assert_relative_eq!(body.linear_velocity().x, 5.0);
        assert_eq!(body.angular_velocity(), Vec3::ZERO);
        assert!(activation.activated);
    }

    #[test]
    fn off_axis_impulse_produces_angular_velocity() {
        let mut body = RigidBody::new_dynamic(1.0, Mat3::IDENTITY, 1.0);
        body.refresh_world_inertia();
        let mut activation = RecordingActivation::default();

        // J=(0,10,0) applied at location=(1,0,0): linear=(0,10,0),
        // angular = I^-1 . ((1,0,0) x (0,10,0)) = (0,0,10).
        body.apply_impulse(Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 10.0, 0.0), &mut activation);

        assert_relative_eq!(body.linear_velocity().y, 5.0);
        assert_relative_eq!(body.angular_velocity().z, 10.0, epsilon = 1e-6);
    }

    #[test]
    fn zero_impulse_is_identity_on_velocities() {
        let mut body = RigidBody::new_dynamic(1.0, Mat3::IDENTITY, 0.4)
            .with_linear_velocity(Vec3::new(1.0, 2.0, 3.0));
        body.refresh_world_inertia();
        let mut activation = RecordingActivation::default();

        body.apply_impulse(Vec3::new(5.0, 0.0, 0.0), Vec3::ZERO, &mut activation);

        assert_eq!(body.linear_velocity(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn opposite_impulses_at_center_restore_linear_velocity_exactly() {
        let mut body = RigidBody::new_dynamic(1.0, Mat3::IDENTITY, 0.4);
        body.refresh_world_inertia();
        let mut activation = RecordingActivation::default();
        let force = Vec3::new(3.0, -4.0, 5.0);

        body.apply_impulse(Vec3::ZERO, force, &mut activation);
        body.apply_impulse(Vec3::ZERO, -force, &mut activation);

        assert_eq!(body.linear_velocity(), Vec3::ZERO);
        assert_eq!(body.angular_velocity(), Vec3::ZERO);
    }

    #[test]
    fn fast_path_impulse_is_a_noop_on_kinematic_bodies() {
        let mut body = RigidBody::new_kinematic();
        body.apply_linear_impulse(Vec3::new(10.0, 0.0, 0.0));
        assert_eq!(body.linear_velocity(), Vec3::ZERO);
    }

    #[test]
    fn apply_impulse_is_a_noop_on_kinematic_bodies_and_does_not_activate() {
        let mut body = RigidBody::new_kinematic();
        let mut activation = RecordingActivation::default();

        body.apply_impulse(Vec3::new(1.0, 0.0, 0.0), Vec3::new(10.0, 0.0, 0.0), &mut activation);

        assert_eq!(body.linear_velocity(), Vec3::ZERO);
        assert_eq!(body.angular_velocity(), Vec3::ZERO);
        assert!(!activation.activated);
    }
}
