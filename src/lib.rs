pub mod collaborators;
pub mod consts;
pub mod error;
pub mod events;
pub mod integrator;
pub mod joint_basis;
pub mod math;
pub mod motion_state;
pub mod position_updater;
pub mod precision;
pub mod rigid_body;
pub mod spin_lock;
mod validate;

pub use error::{Error, Result};
pub use math::matrix::{Mat3, Mat4};
pub use math::quat::Quat;
pub use math::vector::Vec3;
pub use motion_state::MotionState;
pub use rigid_body::{RigidBody, RigidBodyHandle, RigidBodySet};
