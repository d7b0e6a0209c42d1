//! Advances a dynamic body's velocity under gravity, low-velocity
//! stabilization, and damping, then refreshes its world-space inertia
//! tensors (spec.md §4.2). Kinematic bodies are driven externally and
//! are never touched here.

use crate::{
    collaborators::ActivationHandle,
    precision::Real,
    rigid_body::RigidBody,
};

pub struct Integrator;

impl Integrator {
    /// Runs the five-step algorithm of spec.md §4.2 for one body.
    /// `gravity_dt` is the collaborator-supplied `gravityAccel * dt`.
    pub fn integrate(body: &mut RigidBody, dt: Real, activation: &dyn ActivationHandle, gravity_dt: crate::math::vector::Vec3) {
        if !body.is_dynamic() {
            return;
        }

        if body.gravity_affected() {
            body.linear_velocity += gravity_dt;
        }

        Self::apply_stabilization_boost(body, activation);
        Self::apply_damping(body, dt);
        body.reset_damping_boosts();
        body.refresh_world_inertia();
    }

    fn apply_stabilization_boost(body: &mut RigidBody, activation: &dyn ActivationHandle) {
        let manager = activation.deactivation_manager();
        let eligible = manager.use_stabilization()
            && activation.allow_stabilization()
            && (activation.is_slowing()
                || activation.velocity_time_below_limit() > manager.low_velocity_time_minimum());

        if !eligible {
            return;
        }

        let energy = body.linear_velocity().squared_magnitude() + body.angular_velocity().squared_magnitude();
        let limit_squared = manager.velocity_lower_limit_squared();
        if energy >= limit_squared {
            return;
        }

        let limit = manager.velocity_lower_limit();
        if limit <= 0.0 {
            return;
        }
        let boost = 1.0 - energy.sqrt() / (2.0 * limit);
        body.modify_linear_damping(boost);
        body.modify_angular_damping(boost);
    }

    fn apply_damping(body: &mut RigidBody, dt: Real) {
        let total_linear = body.total_linear_damping();
        if total_linear > 0.0 {
            let factor = (1.0 - total_linear).clamp(0.0, 1.0).powf(dt);
            body.linear_velocity *= factor;
        }

        let total_angular = body.total_angular_damping();
        if total_angular > 0.0 {
            let factor = (1.0 - total_angular).clamp(0.0, 1.0).powf(dt);
            body.angular_velocity *= factor;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{collaborators::DeactivationManager, math::{matrix::Mat3, vector::Vec3}, rigid_body::RigidBodyHandle};

    struct StubDeactivation {
        use_stabilization: bool,
    }

    impl DeactivationManager for StubDeactivation {
        fn use_stabilization(&self) -> bool {
            self.use_stabilization
        }
        fn velocity_lower_limit(&self) -> Real {
            0.1
        }
        fn velocity_lower_limit_squared(&self) -> Real {
            0.01
        }
        fn low_velocity_time_minimum(&self) -> Real {
            0.5
        }
        fn add_island(&mut self, _body: RigidBodyHandle) {}
        fn remove_island(&mut self, _body: RigidBodyHandle) {}
    }

    struct StubActivation {
        deactivation: StubDeactivation,
    }

    impl ActivationHandle for StubActivation {
        fn activate(&mut self) {}
        fn is_active(&self) -> bool {
            true
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
            &self.deactivation
        }
    }

    #[test]
    fn free_fall_one_tick_matches_worked_example() {
        let mut body = RigidBody::new_dynamic(1.0, Mat3::IDENTITY, 0.4).with_position(Vec3::new(0.0, 10.0, 0.0));
        body.set_linear_damping(0.0);
        let activation = StubActivation { deactivation: StubDeactivation { use_stabilization: false } };

        Integrator::integrate(&mut body, 1.0, &activation, Vec3::new(0.0, -10.0, 0.0));

        assert_eq!(body.linear_velocity(), Vec3::new(0.0, -10.0, 0.0));
    }

    #[test]
    fn kinematic_bodies_are_not_integrated() {
        let mut body = RigidBody::new_kinematic().with_linear_velocity(Vec3::new(1.0, 0.0, 0.0));
        let activation = StubActivation { deactivation: StubDeactivation { use_stabilization: false } };

        Integrator::integrate(&mut body, 1.0, &activation, Vec3::new(0.0, -10.0, 0.0));

        assert_eq!(body.linear_velocity(), Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn damping_boosts_reset_after_integration() {
        let mut body = RigidBody::new_dynamic(1.0, Mat3::IDENTITY, 0.4);
        body.modify_linear_damping(0.5);
        let activation = StubActivation { deactivation: StubDeactivation { use_stabilization: false } };

        Integrator::integrate(&mut body, 1.0, &activation, Vec3::ZERO);

        assert_eq!(body.linear_damping_boost(), 0.0);
    }

    #[test]
    fn gravity_is_skipped_when_body_is_not_gravity_affected() {
        let mut body = RigidBody::new_dynamic(1.0, Mat3::IDENTITY, 0.4).with_gravity_affected(false);
        body.set_linear_damping(0.0);
        let activation = StubActivation { deactivation: StubDeactivation { use_stabilization: false } };

        Integrator::integrate(&mut body, 1.0, &activation, Vec3::new(0.0, -10.0, 0.0));

        assert_eq!(body.linear_velocity(), Vec3::ZERO);
    }
}
