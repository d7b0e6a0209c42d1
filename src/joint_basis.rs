//! Orthonormal reference frames used by constraints to project forces
//! onto meaningful axes (spec.md §4.5). `JointBasis3D` and
//! `JointBasis2D` share one generic implementation — the axis count is
//! the only thing that differs between them.

use crate::{
    consts::BIG_EPSILON,
    error::{Error, Result},
    math::{matrix::Mat3, vector::Vec3},
};

/// An orthonormal frame of `N` local axes, a world-space rotation
/// matrix, and the `N` axes that rotation carries the local ones to.
///
/// Axis order for a 3-axis frame is `[right, up, backward]`, matching
/// the constructed-default convention in spec.md §4.5 (primary axis +Z
/// "backward", x +X "right", y +Y "up"). A 2-axis frame drops the
/// third axis and keeps `[right, up]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrthonormalFrame<const N: usize> {
    local_axes: [Vec3; N],
    world_rotation: Mat3,
    world_axes: [Vec3; N],
}

impl<const N: usize> OrthonormalFrame<N> {
    fn with_axes(axes: [Vec3; N]) -> Self {
        Self {
            local_axes: axes,
            world_rotation: Mat3::IDENTITY,
            world_axes: axes,
        }
    }

    pub fn local_axes(&self) -> &[Vec3; N] {
        &self.local_axes
    }

    pub fn world_axes(&self) -> &[Vec3; N] {
        &self.world_axes
    }

    pub fn world_rotation(&self) -> Mat3 {
        self.world_rotation
    }

    /// Validates orthogonality, normalizes, and stores `axes` as the
    /// local frame; recomputes the world axes from the current
    /// rotation matrix.
    pub fn set_local_axes(&mut self, axes: [Vec3; N]) -> Result<()> {
        let normalized = normalize_all(axes);
        validate_orthogonal(&normalized)?;
        self.local_axes = normalized;
        self.recompute_world_axes();
        Ok(())
    }

    /// Validates orthogonality, normalizes, and stores `axes` as the
    /// world-space frame; projects each axis into local space by
    /// multiplying by the transpose of the current rotation matrix
    /// (spec.md §4.5).
    pub fn set_world_axes(&mut self, axes: [Vec3; N]) -> Result<()> {
        let normalized = normalize_all(axes);
        validate_orthogonal(&normalized)?;
        self.world_axes = normalized;

        let local_rotation = self.world_rotation.transpose();
        for i in 0..N {
            self.local_axes[i] = local_rotation.transform(self.world_axes[i]);
        }
        Ok(())
    }

    /// Assigns the world-rotation matrix and recomputes the world axes
    /// (spec.md §4.5: "recomputation of the world axes occurs whenever
    /// the rotation matrix is assigned").
    pub fn set_world_rotation(&mut self, rotation: Mat3) {
        self.world_rotation = rotation;
        self.recompute_world_axes();
    }

    fn recompute_world_axes(&mut self) {
        for i in 0..N {
            self.world_axes[i] = self.world_rotation.transform(self.local_axes[i]);
        }
    }
}

fn normalize_all<const N: usize>(mut axes: [Vec3; N]) -> [Vec3; N] {
    for axis in &mut axes {
        *axis = axis.normalized();
    }
    axes
}

fn validate_orthogonal<const N: usize>(axes: &[Vec3; N]) -> Result<()> {
    let mut max_abs_dot: crate::precision::Real = 0.0;
    for i in 0..N {
        for j in (i + 1)..N {
            max_abs_dot = max_abs_dot.max(axes[i].dot(axes[j]).abs());
        }
    }

    if max_abs_dot > BIG_EPSILON {
        return Err(Error::NonOrthogonalBasis(max_abs_dot));
    }

    Ok(())
}

/// A 3-axis constraint frame (right, up, backward).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointBasis3D(OrthonormalFrame<3>);

impl JointBasis3D {
    pub fn new() -> Self {
        Self(OrthonormalFrame::with_axes([Vec3::X, Vec3::Y, Vec3::Z]))
    }

    pub fn right(&self) -> Vec3 {
        self.0.local_axes()[0]
    }

    pub fn up(&self) -> Vec3 {
        self.0.local_axes()[1]
    }

    pub fn backward(&self) -> Vec3 {
        self.0.local_axes()[2]
    }

    pub fn world_right(&self) -> Vec3 {
        self.0.world_axes()[0]
    }

    pub fn world_up(&self) -> Vec3 {
        self.0.world_axes()[1]
    }

    pub fn world_backward(&self) -> Vec3 {
        self.0.world_axes()[2]
    }

    pub fn world_rotation(&self) -> Mat3 {
        self.0.world_rotation()
    }

    pub fn set_local_axes(&mut self, right: Vec3, up: Vec3, backward: Vec3) -> Result<()> {
        self.0.set_local_axes([right, up, backward])
    }

    pub fn set_world_axes(&mut self, right: Vec3, up: Vec3, backward: Vec3) -> Result<()> {
        self.0.set_world_axes([right, up, backward])
    }

    pub fn set_world_rotation(&mut self, rotation: Mat3) {
        self.0.set_world_rotation(rotation)
    }
}

impl Default for JointBasis3D {
    fn default() -> Self {
        Self::new()
    }
}

/// A 2-axis constraint frame (right, up) for joints that only need to
/// restrict a single rotational degree of freedom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointBasis2D(OrthonormalFrame<2>);

impl JointBasis2D {
    pub fn new() -> Self {
        Self(OrthonormalFrame::with_axes([Vec3::X, Vec3::Y]))
    }

    pub fn right(&self) -> Vec3 {
        self.0.local_axes()[0]
    }

    pub fn up(&self) -> Vec3 {
        self.0.local_axes()[1]
    }

    pub fn world_right(&self) -> Vec3 {
        self.0.world_axes()[0]
    }

    pub fn world_up(&self) -> Vec3 {
        self.0.world_axes()[1]
    }

    pub fn world_rotation(&self) -> Mat3 {
        self.0.world_rotation()
    }

    pub fn set_local_axes(&mut self, right: Vec3, up: Vec3) -> Result<()> {
        self.0.set_local_axes([right, up])
    }

    pub fn set_world_axes(&mut self, right: Vec3, up: Vec3) -> Result<()> {
        self.0.set_world_axes([right, up])
    }

    pub fn set_world_rotation(&mut self, rotation: Mat3) {
        self.0.set_world_rotation(rotation)
    }
}

impl Default for JointBasis2D {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn default_frame_is_identity() {
        let basis = JointBasis3D::new();
        assert_eq!(basis.right(), Vec3::X);
        assert_eq!(basis.up(), Vec3::Y);
        assert_eq!(basis.backward(), Vec3::Z);
        assert_eq!(basis.world_rotation(), Mat3::IDENTITY);
    }

    #[test]
    fn rejects_non_orthogonal_axes() {
        let mut basis = JointBasis3D::new();
        let err = basis
            .set_local_axes(Vec3::X, Vec3::new(1.0, 1.0, 0.0), Vec3::Z)
            .unwrap_err();
        assert!(matches!(err, Error::NonOrthogonalBasis(_)));
    }

    #[test]
    fn world_axes_follow_rotation_matrix() {
        let mut basis = JointBasis3D::new();
        // 90 degree rotation about Z: X -> Y, Y -> -X, Z -> Z.
        let rotation = Mat3::new([0.0, -1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0]);
        basis.set_world_rotation(rotation);

        assert_relative_eq!(basis.world_right().x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(basis.world_right().y, 1.0, epsilon = 1e-6);
        assert_relative_eq!(basis.world_up().x, -1.0, epsilon = 1e-6);
        assert_relative_eq!(basis.world_up().y, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn set_world_axes_projects_into_local_space() {
        let mut basis = JointBasis3D::new();
        let rotation = Mat3::new([0.0, -1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0]);
        basis.set_world_rotation(rotation);

        basis
            .set_world_axes(Vec3::X, Vec3::Y, Vec3::Z)
            .expect("orthogonal axes");

        // Local axes should be rotation^T applied to the given world axes.
        assert_relative_eq!(basis.right().x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(basis.right().y, -1.0, epsilon = 1e-6);
    }
}
