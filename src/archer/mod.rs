//! Archer module - the controlled character, its movement, and camera.

mod animation;
mod camera;
mod components;
pub mod config;
mod movement;
mod plugin;
mod spawn;

pub use animation::{
    smooth_damp, AnimTrigger, AnimationSink, ArcherAnimator, BlendParam, DampedFloat, DrawPose,
};
pub use camera::{apply_look, orbit_pose, spawn_archer_camera, ArcherCamera};
pub use components::*;
pub use config::{ArcherConfig, CastEffect};
pub use movement::{
    archer_movement, camera_relative_direction, drive_archer, heading_towards, input_magnitude,
    vertical_step, DriveInput, FrameMotion, MotionActuator,
};
pub use plugin::ArcherPlugin;
pub use spawn::{spawn_archer, FIRE_POINT_OFFSET};
