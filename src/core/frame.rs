//! Per-frame input context.
//!
//! Raw devices are read exactly once per frame into [`FrameInput`]; every
//! other archer system reads that resource instead of polling devices.

use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;

use crate::archer::ArcherConfig;

/// Snapshot of the player's intent for the current frame.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct FrameInput {
    /// Smoothed movement axes: x = strafe (right positive), y = forward.
    pub axes: Vec2,
    /// Fire was pressed this frame.
    pub fire: bool,
    /// Accumulated mouse motion this frame, in pixels.
    pub look_delta: Vec2,
}

/// Raw digital axis value from a negative/positive key pair.
pub fn raw_axis(negative: bool, positive: bool) -> f32 {
    match (negative, positive) {
        (true, false) => -1.0,
        (false, true) => 1.0,
        _ => 0.0,
    }
}

/// Ease a smoothed axis toward its raw value.
///
/// Ramps toward a held key at `sensitivity` units/s and falls back to rest
/// at `gravity` units/s. Reversing direction snaps through zero first, so
/// the axis never lingers on the wrong side.
pub fn smooth_axis(current: f32, raw: f32, sensitivity: f32, gravity: f32, dt: f32) -> f32 {
    if raw == 0.0 {
        let step = gravity * dt;
        return if current.abs() <= step {
            0.0
        } else {
            current - step * current.signum()
        };
    }

    let start = if current * raw < 0.0 { 0.0 } else { current };
    let step = sensitivity * dt;
    let delta = raw - start;
    if delta.abs() <= step {
        raw
    } else {
        start + step * delta.signum()
    }
}

/// Read keyboard and mouse into the frame context.
pub fn read_frame_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    time: Res<Time>,
    config: Res<ArcherConfig>,
    mut frame: ResMut<FrameInput>,
) {
    let dt = time.delta_secs();
    let input = &config.input;

    let raw_x = raw_axis(
        keyboard.any_pressed([KeyCode::KeyA, KeyCode::ArrowLeft]),
        keyboard.any_pressed([KeyCode::KeyD, KeyCode::ArrowRight]),
    );
    let raw_z = raw_axis(
        keyboard.any_pressed([KeyCode::KeyS, KeyCode::ArrowDown]),
        keyboard.any_pressed([KeyCode::KeyW, KeyCode::ArrowUp]),
    );

    frame.axes = Vec2::new(
        smooth_axis(frame.axes.x, raw_x, input.axis_sensitivity, input.axis_gravity, dt),
        smooth_axis(frame.axes.y, raw_z, input.axis_sensitivity, input.axis_gravity, dt),
    );
    frame.fire = mouse.just_pressed(MouseButton::Left);
    frame.look_delta = mouse_motion.read().map(|event| event.delta).sum();
}
