//! The central simulation entity (spec.md §3, §4.1).
//!
//! A [`RigidBody`] owns its pose, velocities, and inertia tensors
//! exclusively. It does *not* own its [`crate::collaborators::ActivationHandle`],
//! [`crate::collaborators::CollidableHandle`], or
//! [`crate::collaborators::MaterialHandle`] — those are external
//! collaborators the simulation layer threads through each mutating
//! call, which sidesteps the `Rc<RefCell<dyn Trait>>` cycle the
//! arena-and-back-pointer design in spec.md §9 would otherwise need.

mod damping;
mod impulse;
mod mass;
mod set;

pub use set::{RigidBodyHandle, RigidBodySet};

use crate::{
    collaborators::ActivationHandle,
    debug_assert_finite,
    math::{matrix::Mat3, quat::Quat, vector::Vec3},
    motion_state::MotionState,
    position_updater::PositionUpdateMode,
    precision::Real,
};

use downcast_rs::{impl_downcast, DowncastSync};

/// An opaque, user-attached tag. Implement this (and nothing else —
/// `downcast_rs` provides the rest) on any `Send + Sync + 'static` type
/// to stash it on a body and recover it later with `downcast_ref`.
pub trait UserTag: DowncastSync {}
impl_downcast!(sync UserTag);

/// The central simulation entity: pose, velocities, inertia, mass
/// mode, damping, and identity (spec.md §3).
#[derive(Debug, Clone)]
pub struct RigidBody {
    pub(crate) position: Vec3,
    pub(crate) orientation: Quat,
    pub(crate) orientation_matrix: Mat3,

    pub(crate) linear_velocity: Vec3,
    pub(crate) angular_velocity: Vec3,

    pub(crate) mass: Real,
    pub(crate) inverse_mass: Real,
    pub(crate) local_inertia_tensor: Mat3,
    pub(crate) local_inertia_tensor_inverse: Mat3,
    pub(crate) world_inertia_tensor: Mat3,
    pub(crate) world_inertia_tensor_inverse: Mat3,

    pub(crate) is_dynamic: bool,
    pub(crate) gravity_affected: bool,

    pub(crate) linear_damping: Real,
    pub(crate) angular_damping: Real,
    pub(crate) linear_damping_boost: Real,
    pub(crate) angular_damping_boost: Real,

    pub(crate) position_update_mode: PositionUpdateMode,
    pub(crate) ignore_shape_changes: bool,

    user_tag: Option<Box<dyn UserTag>>,
}

impl RigidBody {
    /// Builds a kinematic body at the origin with identity orientation
    /// and zero velocities.
    pub fn new_kinematic() -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            orientation_matrix: Mat3::IDENTITY,
            linear_velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            mass: 0.0,
            inverse_mass: 0.0,
            local_inertia_tensor: Mat3::ZERO,
            local_inertia_tensor_inverse: Mat3::ZERO,
            world_inertia_tensor: Mat3::ZERO,
            world_inertia_tensor_inverse: Mat3::ZERO,
            is_dynamic: false,
            gravity_affected: true,
            linear_damping: 0.99,
            angular_damping: 0.99,
            linear_damping_boost: 0.0,
            angular_damping_boost: 0.0,
            position_update_mode: PositionUpdateMode::Discrete,
            ignore_shape_changes: false,
            user_tag: None,
        }
    }

    /// Builds a dynamic body. `volume_distribution` is the shape's
    /// `CollidableHandle::volume_distribution()`; the local inertia
    /// tensor is `volume_distribution * (mass * inertia_tensor_scale)`,
    /// mirroring `becomeDynamic` (spec.md §4.1). Panics on a
    /// non-finite or non-positive mass — there's no activation handle
    /// to notify of a rejected transition at construction time, so the
    /// fallible path only exists on an already-live body.
    pub fn new_dynamic(mass: Real, volume_distribution: Mat3, inertia_tensor_scale: Real) -> Self {
        assert!(
            mass.is_finite() && mass > 0.0,
            "dynamic rigid bodies need a finite, positive mass, got {mass}"
        );

        let mut body = Self::new_kinematic();
        let local_inertia_tensor = volume_distribution * (mass * inertia_tensor_scale);
        body.enter_dynamic(mass, local_inertia_tensor);
        body
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_orientation(mut self, orientation: Quat) -> Self {
        self.orientation = orientation.normalized();
        self.refresh_orientation_matrix();
        self
    }

    pub fn with_linear_velocity(mut self, velocity: Vec3) -> Self {
        self.linear_velocity = velocity;
        self
    }

    pub fn with_angular_velocity(mut self, velocity: Vec3) -> Self {
        self.angular_velocity = velocity;
        self
    }

    pub fn with_gravity_affected(mut self, gravity_affected: bool) -> Self {
        self.gravity_affected = gravity_affected;
        self
    }

    pub fn with_position_update_mode(mut self, mode: PositionUpdateMode) -> Self {
        self.position_update_mode = mode;
        self
    }

    // -- simple accessors -------------------------------------------------

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    pub fn orientation_matrix(&self) -> Mat3 {
        self.orientation_matrix
    }

    pub fn linear_velocity(&self) -> Vec3 {
        self.linear_velocity
    }

    pub fn angular_velocity(&self) -> Vec3 {
        self.angular_velocity
    }

    pub fn mass(&self) -> Real {
        self.mass
    }

    pub fn inverse_mass(&self) -> Real {
        self.inverse_mass
    }

    pub fn local_inertia_tensor(&self) -> Mat3 {
        self.local_inertia_tensor
    }

    pub fn local_inertia_tensor_inverse(&self) -> Mat3 {
        self.local_inertia_tensor_inverse
    }

    pub fn world_inertia_tensor(&self) -> Mat3 {
        self.world_inertia_tensor
    }

    pub fn world_inertia_tensor_inverse(&self) -> Mat3 {
        self.world_inertia_tensor_inverse
    }

    pub fn is_dynamic(&self) -> bool {
        self.is_dynamic
    }

    pub fn is_kinematic(&self) -> bool {
        !self.is_dynamic
    }

    pub fn gravity_affected(&self) -> bool {
        self.gravity_affected
    }

    pub fn set_gravity_affected(&mut self, gravity_affected: bool) {
        self.gravity_affected = gravity_affected;
    }

    pub fn linear_damping(&self) -> Real {
        self.linear_damping
    }

    pub fn angular_damping(&self) -> Real {
        self.angular_damping
    }

    pub fn linear_damping_boost(&self) -> Real {
        self.linear_damping_boost
    }

    pub fn angular_damping_boost(&self) -> Real {
        self.angular_damping_boost
    }

    pub fn position_update_mode(&self) -> PositionUpdateMode {
        self.position_update_mode
    }

    pub fn ignore_shape_changes(&self) -> bool {
        self.ignore_shape_changes
    }

    pub fn set_ignore_shape_changes(&mut self, ignore: bool) {
        self.ignore_shape_changes = ignore;
    }

    pub fn user_tag(&self) -> Option<&dyn UserTag> {
        self.user_tag.as_deref()
    }

    pub fn set_user_tag(&mut self, tag: Option<Box<dyn UserTag>>) {
        self.user_tag = tag;
    }

    // -- mutators that activate the body (spec.md §4.1) -------------------

    pub fn set_position(&mut self, position: Vec3, activation: &mut dyn ActivationHandle) {
        debug_assert_finite!(position, "RigidBody::set_position");
        self.position = position;
        activation.activate();
    }

    pub fn set_orientation(&mut self, orientation: Quat, activation: &mut dyn ActivationHandle) {
        debug_assert_finite!(orientation, "RigidBody::set_orientation");
        self.orientation = orientation.normalized();
        self.refresh_orientation_matrix();
        activation.activate();
    }

    pub fn set_linear_velocity(&mut self, velocity: Vec3, activation: &mut dyn ActivationHandle) {
        debug_assert_finite!(velocity, "RigidBody::set_linear_velocity");
        self.linear_velocity = velocity;
        activation.activate();
    }

    pub fn set_angular_velocity(&mut self, velocity: Vec3, activation: &mut dyn ActivationHandle) {
        debug_assert_finite!(velocity, "RigidBody::set_angular_velocity");
        self.angular_velocity = velocity;
        activation.activate();
    }

    /// Round-trips the pose+velocity quadruple (spec.md §4.1). Routes
    /// through the individual setters, so orientation is renormalized
    /// just like a direct `set_orientation` call.
    pub fn motion_state(&self) -> MotionState {
        MotionState::new(
            self.position,
            self.orientation,
            self.linear_velocity,
            self.angular_velocity,
        )
    }

    pub fn set_motion_state(&mut self, state: MotionState, activation: &mut dyn ActivationHandle) {
        self.set_position(state.position, activation);
        self.set_orientation(state.orientation, activation);
        self.set_linear_velocity(state.linear_velocity, activation);
        self.set_angular_velocity(state.angular_velocity, activation);
    }

    /// `worldInertiaTensor · angularVelocity`, derived on read.
    pub fn angular_momentum(&self) -> Vec3 {
        self.world_inertia_tensor.transform(self.angular_velocity)
    }

    pub fn set_angular_momentum(&mut self, momentum: Vec3, activation: &mut dyn ActivationHandle) {
        debug_assert_finite!(momentum, "RigidBody::set_angular_momentum");
        self.angular_velocity = self.world_inertia_tensor_inverse.transform(momentum);
        activation.activate();
    }

    // -- internal helpers shared by mass.rs / damping.rs / the integrator --

    pub(crate) fn refresh_orientation_matrix(&mut self) {
        self.orientation_matrix = Mat3::from(self.orientation);
    }

    /// `worldInertiaTensor = R · localInertiaTensor · Rᵀ`, and the same
    /// for the inverse (spec.md §3, §4.2 step 5).
    pub(crate) fn refresh_world_inertia(&mut self) {
        let r = self.orientation_matrix;
        let r_t = r.transpose();
        self.world_inertia_tensor = r.mul_mat3(self.local_inertia_tensor).mul_mat3(r_t);
        self.world_inertia_tensor_inverse =
            r.mul_mat3(self.local_inertia_tensor_inverse).mul_mat3(r_t);
    }

    /// Shared tail of `becomeDynamic`/`setMass`: assumes `mass` has
    /// already been validated positive and finite.
    pub(crate) fn enter_dynamic(&mut self, mass: Real, local_inertia_tensor: Mat3) {
        self.mass = mass;
        self.inverse_mass = mass.recip();
        self.local_inertia_tensor = local_inertia_tensor;
        self.local_inertia_tensor_inverse = local_inertia_tensor.adaptive_invert();
        self.is_dynamic = true;
        self.refresh_world_inertia();
    }

    pub(crate) fn enter_kinematic(&mut self) {
        self.mass = 0.0;
        self.inverse_mass = 0.0;
        self.local_inertia_tensor = Mat3::ZERO;
        self.local_inertia_tensor_inverse = Mat3::ZERO;
        self.is_dynamic = false;
        self.refresh_world_inertia();
    }
}
