//! Third-person orbit camera that follows the archer.

use bevy::prelude::*;
use bevy::window::{CursorGrabMode, PrimaryWindow};

use super::components::Archer;
use super::config::{ArcherConfig, CameraConfig};
use crate::core::{FrameInput, SmoothTransform};

/// The camera that frames the archer. Also the projection used for aiming.
#[derive(Component, Debug, Default)]
pub struct ArcherCamera {
    /// Orbit angle around the archer, radians
    pub yaw: f32,
    /// Positive looks down on the archer
    pub pitch: f32,
}

/// Apply a frame of mouse motion to the orbit angles.
pub fn apply_look(camera: &mut ArcherCamera, look_delta: Vec2, config: &CameraConfig) {
    let sensitivity = config.sensitivity * 0.001;
    let y_invert = if config.invert_y { -1.0 } else { 1.0 };

    camera.yaw -= look_delta.x * sensitivity;
    camera.pitch += look_delta.y * sensitivity * y_invert;
    camera.pitch = camera.pitch.clamp(config.pitch_min, config.pitch_max);
}

/// Where the camera should sit and how it should face for the given orbit.
pub fn orbit_pose(focus: Vec3, camera: &ArcherCamera, config: &CameraConfig) -> Transform {
    let orbit = Quat::from_euler(EulerRot::YXZ, camera.yaw, -camera.pitch, 0.0);
    let position = focus + orbit * Vec3::new(0.0, 0.0, config.distance);
    Transform::from_translation(position).looking_at(focus, Vec3::Y)
}

/// Spawn the follow camera behind the archer's starting position.
pub fn spawn_archer_camera(commands: &mut Commands, archer_position: Vec3, config: &CameraConfig) -> Entity {
    let camera = ArcherCamera {
        yaw: 0.0,
        pitch: 0.3,
    };
    let focus = archer_position + Vec3::Y * config.height;
    let pose = orbit_pose(focus, &camera, config);

    commands
        .spawn((
            Camera3d::default(),
            camera,
            pose,
            SmoothTransform::new(config.follow_sharpness, config.follow_sharpness),
        ))
        .id()
}

/// Orbit with the mouse and ease toward the follow pose.
pub fn follow_camera(
    frame: Res<FrameInput>,
    config: Res<ArcherConfig>,
    archer_query: Query<&Transform, With<Archer>>,
    mut camera_query: Query<(&mut ArcherCamera, &mut SmoothTransform), Without<Archer>>,
) {
    let Ok(archer_transform) = archer_query.get_single() else {
        return;
    };
    let Ok((mut camera, mut smooth)) = camera_query.get_single_mut() else {
        return;
    };

    apply_look(&mut camera, frame.look_delta, &config.camera);

    let focus = archer_transform.translation + Vec3::Y * config.camera.height;
    let pose = orbit_pose(focus, &camera, &config.camera);
    smooth.target_translation = Some(pose.translation);
    smooth.target_rotation = Some(pose.rotation);
}

/// Grab and hide cursor when entering gameplay.
pub fn grab_cursor(mut window_query: Query<&mut Window, With<PrimaryWindow>>) {
    if let Ok(mut window) = window_query.get_single_mut() {
        window.cursor_options.grab_mode = CursorGrabMode::Locked;
        window.cursor_options.visible = false;
    }
}

/// Release cursor when leaving gameplay.
pub fn release_cursor(mut window_query: Query<&mut Window, With<PrimaryWindow>>) {
    if let Ok(mut window) = window_query.get_single_mut() {
        window.cursor_options.grab_mode = CursorGrabMode::None;
        window.cursor_options.visible = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pitch_is_clamped() {
        let config = CameraConfig::default();
        let mut camera = ArcherCamera::default();
        apply_look(&mut camera, Vec2::new(0.0, 1.0e6), &config);
        assert_eq!(camera.pitch, config.pitch_max);
        apply_look(&mut camera, Vec2::new(0.0, -1.0e6), &config);
        assert_eq!(camera.pitch, config.pitch_min);
    }

    #[test]
    fn default_orbit_sits_behind_and_looks_forward() {
        let config = CameraConfig::default();
        let pose = orbit_pose(Vec3::ZERO, &ArcherCamera::default(), &config);
        assert!((pose.translation - Vec3::new(0.0, 0.0, config.distance)).length() < 1e-4);
        assert!(pose.forward().as_vec3().abs_diff_eq(Vec3::NEG_Z, 1e-4));
    }

    #[test]
    fn positive_pitch_raises_the_camera() {
        let config = CameraConfig::default();
        let camera = ArcherCamera { yaw: 0.0, pitch: 0.5 };
        let pose = orbit_pose(Vec3::ZERO, &camera, &config);
        assert!(pose.translation.y > 0.0);
        assert!(pose.forward().y < 0.0);
    }
}
