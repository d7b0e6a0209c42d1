//! Advances a body's pose once its velocity has been integrated
//! (spec.md §4.3). Two position-update strategies exist per body:
//! *Discrete* finalizes the pose every tick; *Continuous* defers the
//! translation step until the minimum pair time-of-impact is known,
//! modeled on the teacher's `RigidBodyPipeline`/`ParticlePipeline`
//! `start_frame`/`step` two-phase shape, generalized to the four
//! ordered phases of spec.md §5.

use crate::{
    collaborators::{CollidableHandle, MotionSettings},
    events::{PositionUpdated, Subscribers},
    precision::Real,
    rigid_body::{RigidBody, RigidBodyHandle},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PositionUpdateMode {
    Discrete,
    Continuous,
}

/// Notified when a body's [`PositionUpdateMode`] changes, so it can
/// move the body between whatever "discrete" / "continuous" buckets it
/// keeps internally (spec.md §4.3).
pub trait ContinuousScheduler {
    fn position_update_mode_changed(&mut self, body: RigidBodyHandle, mode: PositionUpdateMode);
}

/// Stateless driver over a single body; all state it needs lives on
/// the body and its collaborators.
pub struct PositionUpdater;

impl PositionUpdater {
    /// Changes a body's update mode, notifying the scheduler only on
    /// an actual transition.
    pub fn set_mode(
        body: &mut RigidBody,
        handle: RigidBodyHandle,
        mode: PositionUpdateMode,
        scheduler: &mut dyn ContinuousScheduler,
    ) {
        if body.position_update_mode() != mode {
            body.position_update_mode = mode;
            scheduler.position_update_mode_changed(handle, mode);
        }
    }

    /// Runs for every updateable body regardless of mode (spec.md §4.3
    /// pre-update):
    /// 1. Half-step the orientation via the quaternion derivative.
    /// 2. Refresh the orientation matrix.
    /// 3. For a Discrete body, finalize the translation and emit
    ///    `PositionUpdated`.
    pub fn pre_update(
        handle: RigidBodyHandle,
        body: &mut RigidBody,
        dt: Real,
        collidable: &mut dyn CollidableHandle,
        events: &mut Subscribers<PositionUpdated>,
    ) {
        body.orientation = body
            .orientation
            .add_scaled_vector(body.angular_velocity, dt)
            .normalized();
        body.refresh_orientation_matrix();

        if body.position_update_mode == PositionUpdateMode::Discrete {
            body.position += body.linear_velocity * dt;
            collidable.update_world_transform(body.position, body.orientation);
            events.notify(&PositionUpdated { body: handle });
        }
    }

    /// Runs only for Continuous-mode bodies, after TOI computation
    /// (spec.md §4.3 continuous-update).
    pub fn continuous_update(
        handle: RigidBodyHandle,
        body: &mut RigidBody,
        dt: Real,
        collidable: &mut dyn CollidableHandle,
        events: &mut Subscribers<PositionUpdated>,
    ) {
        if body.position_update_mode != PositionUpdateMode::Continuous {
            return;
        }

        let toi_min = collidable.min_time_of_impact();
        body.position += body.linear_velocity * dt * toi_min;
        collidable.update_world_transform(body.position, body.orientation);
        events.notify(&PositionUpdated { body: handle });
    }

    /// For each CCD-eligible pair on `collidable`, delegates TOI
    /// computation to the pair itself. Safe to call concurrently across
    /// bodies: each pair only ever updates its own TOI slot.
    pub fn update_times_of_impact(
        handle: RigidBodyHandle,
        collidable: &mut dyn CollidableHandle,
        dt: Real,
        settings: &dyn MotionSettings,
    ) {
        collidable.for_each_pair_mut(&mut |pair| {
            if settings.pair_allows_ccd(handle, pair) {
                pair.update_time_of_impact(handle, dt);
            }
        });
    }

    /// Sets every tracked pair's `timeOfImpact` back to 1.
    pub fn reset_times_of_impact(collidable: &mut dyn CollidableHandle) {
        collidable.for_each_pair_mut(&mut |pair| pair.set_time_of_impact(1.0));
    }
}
