//! Camera-relative movement and blend-parameter driving.
//!
//! The driver itself ([`drive_archer`]) is a plain function over the frame's
//! inputs, a [`MotionActuator`] and an [`AnimationSink`]. The Bevy system at
//! the bottom gathers those from the world and writes the result into
//! Rapier's character controller.

use bevy::log::warn_once;
use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::animation::{AnimationSink, ArcherAnimator, BlendParam};
use super::camera::ArcherCamera;
use super::components::*;
use super::config::{AnimationConfig, ArcherConfig, MovementConfig};
use crate::combat::AttackState;
use crate::core::FrameInput;

/// Anything that can displace the archer by a per-frame offset.
pub trait MotionActuator {
    fn move_by(&mut self, displacement: Vec3);
}

/// Accumulates this frame's displacement so it can be handed to the
/// character controller in one piece.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct FrameMotion {
    pub displacement: Vec3,
}

impl MotionActuator for FrameMotion {
    fn move_by(&mut self, displacement: Vec3) {
        self.displacement += displacement;
    }
}

/// Project onto the ground plane and normalize.
pub fn flatten(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z).normalize_or_zero()
}

/// Map input axes through the camera's flattened basis.
///
/// The result is re-normalized so diagonals are no faster than straight
/// lines. Zero input (or a camera looking straight down) gives zero.
pub fn camera_relative_direction(camera_forward: Vec3, camera_right: Vec3, axes: Vec2) -> Vec3 {
    let forward = flatten(camera_forward);
    let right = flatten(camera_right);
    (forward * axes.y + right * axes.x).normalize_or_zero()
}

/// Yaw-only rotation whose forward (-Z) points along `direction`.
pub fn heading_towards(direction: Vec3) -> Option<Quat> {
    let flat = Vec3::new(direction.x, 0.0, direction.z);
    if flat.length_squared() < 1e-8 {
        return None;
    }
    Some(Quat::from_rotation_y(f32::atan2(-flat.x, -flat.z)))
}

/// Squared 2-D length of the input axes.
pub fn input_magnitude(axes: Vec2) -> f32 {
    axes.length_squared()
}

/// Update vertical velocity and return this frame's vertical displacement.
pub fn vertical_step(state: &mut MovementState, grounded: bool, gravity: f32, dt: f32) -> f32 {
    state.is_grounded = grounded;
    if grounded {
        state.vertical_velocity = 0.0;
    } else {
        state.vertical_velocity -= gravity * dt;
    }
    state.vertical_velocity * dt
}

/// Everything the driver reads for one frame.
#[derive(Debug, Clone, Copy)]
pub struct DriveInput {
    pub axes: Vec2,
    pub camera_forward: Vec3,
    pub camera_right: Vec3,
    pub rotation: Quat,
    pub grounded: bool,
    pub dt: f32,
}

/// Run one frame of movement. Returns the archer's new rotation.
///
/// Above the input threshold the archer turns toward the camera-relative
/// direction and moves at `velocity`; otherwise it holds its heading and the
/// magnitude blend decays with the stop smoothing time.
pub fn drive_archer(
    input: DriveInput,
    state: &mut MovementState,
    movement: &MovementConfig,
    animation: &AnimationConfig,
    actuator: &mut impl MotionActuator,
    animator: &mut impl AnimationSink,
) -> Quat {
    let DriveInput { axes, dt, .. } = input;

    animator.set_float(BlendParam::InputZ, axes.y, animation.vertical_smooth_time, dt);
    animator.set_float(BlendParam::InputX, axes.x, animation.horizontal_smooth_time, dt);

    let magnitude = input_magnitude(axes);
    let mut rotation = input.rotation;

    if magnitude > movement.allow_rotation_threshold {
        animator.set_float(BlendParam::InputMagnitude, magnitude, animation.start_smooth_time, dt);

        let direction = camera_relative_direction(input.camera_forward, input.camera_right, axes);
        if let Some(heading) = heading_towards(direction) {
            rotation = rotation.slerp(heading, movement.desired_rotation_speed);
            actuator.move_by(direction * movement.velocity * dt);
        }
    } else {
        animator.set_float(BlendParam::InputMagnitude, magnitude, animation.stop_smooth_time, dt);
    }

    let vertical = vertical_step(state, input.grounded, movement.gravity, dt);
    actuator.move_by(Vec3::Y * vertical);

    rotation
}

/// Short downward ray from just above the capsule bottom.
fn probe_ground(
    context: &RapierContext,
    archer: Entity,
    position: Vec3,
    movement: &MovementConfig,
) -> bool {
    let bottom = movement.capsule_half_height + movement.capsule_radius;
    let ray_origin = position - Vec3::Y * (bottom - 0.05);
    let max_dist = 0.15;

    context
        .cast_ray(
            ray_origin,
            Vec3::NEG_Y,
            max_dist,
            true,
            QueryFilter::default().exclude_collider(archer),
        )
        .is_some()
}

/// Drive the archer from the frame input.
///
/// Skipped entirely while an attack holds the movement lock.
pub fn archer_movement(
    time: Res<Time>,
    frame: Res<FrameInput>,
    config: Res<ArcherConfig>,
    rapier_context: Query<&RapierContext>,
    camera_query: Query<&GlobalTransform, With<ArcherCamera>>,
    mut archer_query: Query<
        (
            Entity,
            &mut Transform,
            &mut MovementState,
            &mut KinematicCharacterController,
            &mut ArcherAnimator,
            &AttackState,
        ),
        With<Archer>,
    >,
) {
    let Ok((archer, mut transform, mut state, mut controller, mut animator, attack)) =
        archer_query.get_single_mut()
    else {
        return;
    };

    if attack.movement_locked() {
        controller.translation = None;
        return;
    }

    let Ok(camera) = camera_query.get_single() else {
        warn_once!("Archer movement needs exactly one ArcherCamera");
        return;
    };

    let grounded = match rapier_context.get_single() {
        Ok(context) => probe_ground(context, archer, transform.translation, &config.movement),
        // No physics context: treat as grounded so the archer doesn't sink
        Err(_) => true,
    };

    let input = DriveInput {
        axes: frame.axes,
        camera_forward: camera.forward().as_vec3(),
        camera_right: camera.right().as_vec3(),
        rotation: transform.rotation,
        grounded,
        dt: time.delta_secs(),
    };

    let mut motion = FrameMotion::default();
    transform.rotation = drive_archer(
        input,
        &mut *state,
        &config.movement,
        &config.animation,
        &mut motion,
        &mut *animator,
    );
    controller.translation = Some(motion.displacement);
}
