//! Archer entity construction.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::animation::{ArcherAnimator, DrawPose};
use super::components::*;
use super::config::MovementConfig;
use crate::combat::AttackState;
use crate::world::{ARCHER_GROUP, SCENERY_GROUP, TARGET_GROUP};

/// Launch point relative to the archer: right hand, chest height, slightly forward.
pub const FIRE_POINT_OFFSET: Vec3 = Vec3::new(0.25, 0.35, -0.5);

/// Spawn the archer with its body mesh and fire point.
pub fn spawn_archer(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    position: Vec3,
    movement: &MovementConfig,
) -> Entity {
    let body_mesh = meshes.add(Capsule3d::new(
        movement.capsule_radius,
        movement.capsule_half_height * 2.0,
    ));
    let body_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.25, 0.45, 0.3),
        perceptual_roughness: 0.8,
        ..default()
    });
    let bow_mesh = meshes.add(Cuboid::new(0.05, 0.6, 0.05));
    let bow_material = materials.add(Color::srgb(0.45, 0.3, 0.15));

    commands
        .spawn((
            Archer,
            MovementState::default(),
            ArcherAnimator::default(),
            DrawPose::default(),
            AttackState::default(),
            Transform::from_translation(position),
            Visibility::default(),
            // Rapier physics components
            RigidBody::KinematicPositionBased,
            Collider::capsule_y(movement.capsule_half_height, movement.capsule_radius),
            CollisionGroups::new(ARCHER_GROUP, SCENERY_GROUP | TARGET_GROUP),
            KinematicCharacterController {
                offset: CharacterLength::Absolute(0.01),
                autostep: Some(CharacterAutostep {
                    max_height: CharacterLength::Absolute(0.3),
                    min_width: CharacterLength::Absolute(0.2),
                    include_dynamic_bodies: false,
                }),
                max_slope_climb_angle: 45_f32.to_radians(),
                min_slope_slide_angle: 30_f32.to_radians(),
                snap_to_ground: Some(CharacterLength::Absolute(0.3)),
                ..default()
            },
        ))
        .with_children(|parent| {
            parent.spawn((
                ArcherBody,
                Mesh3d(body_mesh),
                MeshMaterial3d(body_material),
                Transform::default(),
            ));
            parent.spawn((
                FirePoint,
                Mesh3d(bow_mesh),
                MeshMaterial3d(bow_material),
                Transform::from_translation(FIRE_POINT_OFFSET),
            ));
        })
        .id()
}
