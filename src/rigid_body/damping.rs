//! Damping (spec.md §4.2, §3): every body has a base linear/angular
//! damping factor plus a transient, non-negative "boost" that a
//! stabilization pass can add for a tick and that the integrator
//! resets to zero once it has been applied.

use crate::precision::Real;

use super::RigidBody;

impl RigidBody {
    pub fn set_linear_damping(&mut self, damping: Real) {
        self.linear_damping = damping.clamp(0.0, 1.0);
    }

    pub fn set_angular_damping(&mut self, damping: Real) {
        self.angular_damping = damping.clamp(0.0, 1.0);
    }

    /// Adds `delta * (1 - (base + currentBoost))` to the transient
    /// linear boost, clamped so `base + boost` stays within `[0, 1]`
    /// (spec.md §4.1 `modifyLinearDamping`).
    pub fn modify_linear_damping(&mut self, delta: Real) {
        self.linear_damping_boost =
            modified_boost(self.linear_damping, self.linear_damping_boost, delta);
    }

    pub fn modify_angular_damping(&mut self, delta: Real) {
        self.angular_damping_boost =
            modified_boost(self.angular_damping, self.angular_damping_boost, delta);
    }

    /// The integrator's read of `base + boost`, already clamped to
    /// `[0, 1]` so a caller can feed it straight into `powf(dt)`.
    pub fn total_linear_damping(&self) -> Real {
        (self.linear_damping + self.linear_damping_boost).clamp(0.0, 1.0)
    }

    pub fn total_angular_damping(&self) -> Real {
        (self.angular_damping + self.angular_damping_boost).clamp(0.0, 1.0)
    }

    /// Resets both boosts to zero, as the integrator does at the end
    /// of every force-integration step (spec.md §3 invariant, §4.2
    /// step 4).
    pub(crate) fn reset_damping_boosts(&mut self) {
        self.linear_damping_boost = 0.0;
        self.angular_damping_boost = 0.0;
    }
}

fn modified_boost(base: Real, boost: Real, delta: Real) -> Real {
    let current_total = (base + boost).clamp(0.0, 1.0);
    let updated = boost + delta * (1.0 - current_total);
    updated.clamp(0.0, (1.0 - base).max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::matrix::Mat3;
    use approx::assert_relative_eq;

    #[test]
    fn modify_damping_adds_scaled_delta() {
        let mut body = RigidBody::new_dynamic(1.0, Mat3::IDENTITY, 0.4);
        body.set_linear_damping(0.5);
        body.modify_linear_damping(0.2);

        // delta * (1 - total) = 0.2 * (1 - 0.5) = 0.1
        assert_relative_eq!(body.linear_damping_boost, 0.1, epsilon = 1e-6);
        assert_relative_eq!(body.total_linear_damping(), 0.6, epsilon = 1e-6);
    }

    #[test]
    fn boost_never_pushes_total_past_one() {
        let mut body = RigidBody::new_dynamic(1.0, Mat3::IDENTITY, 0.4);
        body.set_linear_damping(0.9);
        body.modify_linear_damping(5.0);

        assert_relative_eq!(body.total_linear_damping(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn reset_clears_both_boosts() {
        let mut body = RigidBody::new_dynamic(1.0, Mat3::IDENTITY, 0.4);
        body.modify_linear_damping(0.3);
        body.modify_angular_damping(0.3);
        body.reset_damping_boosts();

        assert_eq!(body.linear_damping_boost(), 0.0);
        assert_eq!(body.angular_damping_boost(), 0.0);
    }
}
