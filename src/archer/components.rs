//! Archer-related components.

use bevy::prelude::*;

/// Marker component for the archer entity.
#[derive(Component)]
pub struct Archer;

/// Marker for the archer's visible body mesh (child of the archer).
#[derive(Component)]
pub struct ArcherBody;

/// Launch point for projectiles (child of the archer).
#[derive(Component)]
pub struct FirePoint;

/// Tracks archer movement state for physics.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct MovementState {
    pub is_grounded: bool,
    pub vertical_velocity: f32,
}

impl Default for MovementState {
    fn default() -> Self {
        Self {
            is_grounded: true,
            vertical_velocity: 0.0,
        }
    }
}
