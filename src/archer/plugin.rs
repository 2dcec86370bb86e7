//! Archer plugin - config, movement, animation, and camera systems.

use bevy::prelude::*;

use super::animation;
use super::camera;
use super::config::load_archer_config;
use super::movement;
use crate::core::{ArcherSet, GameState};

/// Archer plugin - handles config loading, movement, and the follow camera.
pub struct ArcherPlugin;

impl Plugin for ArcherPlugin {
    fn build(&self, app: &mut App) {
        app
            .add_systems(Startup, load_archer_config)
            .add_systems(OnEnter(GameState::InGame), camera::grab_cursor)
            .add_systems(OnExit(GameState::InGame), camera::release_cursor)
            .add_systems(Update, movement::archer_movement.in_set(ArcherSet::Motion))
            .add_systems(
                Update,
                (camera::follow_camera, animation::animate_archer_body)
                    .in_set(ArcherSet::Presentation),
            );
    }
}
