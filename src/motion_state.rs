//! Plain pose+velocity snapshot (spec.md §3), used for buffered or
//! interpolated reads of a [`crate::rigid_body::RigidBody`] without
//! holding a reference to the body itself.

use crate::{math::quat::Quat, math::vector::Vec3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionState {
    pub position: Vec3,
    pub orientation: Quat,
    pub linear_velocity: Vec3,
    pub angular_velocity: Vec3,
}

impl MotionState {
    pub fn new(
        position: Vec3,
        orientation: Quat,
        linear_velocity: Vec3,
        angular_velocity: Vec3,
    ) -> Self {
        Self {
            position,
            orientation,
            linear_velocity,
            angular_velocity,
        }
    }
}
