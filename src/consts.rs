use crate::{math::vector::Vec3, precision::Real};

pub const GRAVITY: Vec3 = Vec3::new(0.0, -9.81, 0.0);
pub const HIGH_GRAVITY: Vec3 = Vec3::new(0.0, -19.62, 0.0);

/// Tolerance used to test orthogonality of [`crate::joint_basis`] axes
/// and unit-length of orientation quaternions.
pub const BIG_EPSILON: Real = 1e-5;

/// Default `InertiaHelper.inertiaTensorScale` (spec.md §6): the
/// shape-family constant `setMass`/`becomeDynamic` multiply the mass by
/// before scaling the shape's volume distribution into a local inertia
/// tensor. A real simulation supplies a shape-specific value through
/// its `CollidableHandle`; this default matches a solid sphere
/// (`2/5 == 0.4`) and exists so a body can be constructed without one.
pub const DEFAULT_INERTIA_TENSOR_SCALE: Real = 0.4;
