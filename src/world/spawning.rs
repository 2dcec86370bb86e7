//! Entity spawning functions for the demo arena.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::layers::{SCENERY_GROUP, TARGET_GROUP};
use super::wander::Drifting;
use crate::targeting::ScreenTarget;

/// Marker for everything the arena spawns.
#[derive(Component)]
pub struct ArenaGeometry;

/// Height of the dummy body; its origin sits at its feet.
pub const DUMMY_HEIGHT: f32 = 1.8;

/// Spawn a point light.
pub fn spawn_light(commands: &mut Commands, position: Vec3, intensity: f32, color: (f32, f32, f32), range: f32) {
    commands.spawn((
        PointLight {
            color: Color::srgb(color.0, color.1, color.2),
            intensity,
            range,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_translation(position),
        ArenaGeometry,
    ));
}

/// Spawn the ground slab, top face at y = 0.
pub fn spawn_ground(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    material: Handle<StandardMaterial>,
    half_size: f32,
) {
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(half_size * 2.0, 0.2, half_size * 2.0))),
        MeshMaterial3d(material),
        Transform::from_xyz(0.0, -0.1, 0.0),
        Collider::cuboid(half_size, 0.1, half_size),
        CollisionGroups::new(SCENERY_GROUP, Group::ALL),
        ArenaGeometry,
    ));
}

/// Spawn a pillar standing on the ground. Pillars block line of sight.
pub fn spawn_pillar(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    material: Handle<StandardMaterial>,
    position: Vec3,
    radius: f32,
    height: f32,
) {
    commands.spawn((
        Mesh3d(meshes.add(Cylinder::new(radius, height))),
        MeshMaterial3d(material),
        Transform::from_translation(position + Vec3::Y * height * 0.5),
        Collider::cylinder(height * 0.5, radius),
        CollisionGroups::new(SCENERY_GROUP, Group::ALL),
        ArenaGeometry,
    ));
}

/// Spawn a drifting target dummy and return its entity.
pub fn spawn_dummy(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    material: Handle<StandardMaterial>,
    position: Vec3,
) -> Entity {
    let body = meshes.add(Capsule3d::new(0.35, DUMMY_HEIGHT - 0.7));

    commands
        .spawn((
            ScreenTarget,
            Drifting::new(position, 2.5, 1.2),
            Transform::from_translation(position),
            Visibility::default(),
            RigidBody::KinematicPositionBased,
            ArenaGeometry,
        ))
        .with_children(|parent| {
            parent.spawn((
                Mesh3d(body),
                MeshMaterial3d(material),
                Transform::from_xyz(0.0, DUMMY_HEIGHT * 0.5, 0.0),
                Collider::capsule_y((DUMMY_HEIGHT - 0.7) * 0.5, 0.35),
                CollisionGroups::new(TARGET_GROUP, Group::ALL),
            ));
        })
        .id()
}
