//! Archer Controller - Entry Point
//!
//! A third-person archer in a small arena of drifting target dummies.
//!
//! Controls:
//! - WASD / Arrows: Move
//! - Mouse: Orbit camera
//! - Left click: Fire at the reticle's target
//! - Escape: Pause/Unpause

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

fn main() {
    App::new()
        // Bevy default plugins
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Archer Controller".to_string(),
                resolution: (1280.0, 720.0).into(),
                ..default()
            }),
            ..default()
        }))

        // Physics
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())

        // Our game plugin
        .add_plugins(archer_controller::ArcherGamePlugin)

        .run();
}
