//! Homing projectiles.
//!
//! Projectiles fly from the fire point toward their target's position plus
//! the aim offset, turning every frame to follow a moving target.

use bevy::prelude::*;

use crate::core::ProjectileHit;
use crate::targeting::ScreenTarget;

/// Projectiles closer than this to their aim point count as hits.
pub const HIT_DISTANCE: f32 = 0.3;

/// Seconds before an unfinished projectile is removed.
pub const PROJECTILE_LIFETIME: f32 = 5.0;

/// A projectile homing on a target.
#[derive(Component, Debug, Clone, Copy)]
pub struct TargetProjectile {
    pub target: Entity,
    /// Added to the target position to get the aim point
    pub offset: Vec3,
    /// Units per second
    pub speed: f32,
    /// Seconds left before expiry
    pub lifetime: f32,
}

/// Spawns projectiles.
pub trait ProjectileFactory {
    fn launch(&mut self, origin: Transform, target: Entity, offset: Vec3, speed: f32) -> Entity;
}

/// Projectile factory backed by `Commands`. Visuals are attached later by
/// [`attach_projectile_visuals`].
pub struct ProjectileCommands<'a, 'w, 's> {
    pub commands: &'a mut Commands<'w, 's>,
}

impl ProjectileFactory for ProjectileCommands<'_, '_, '_> {
    fn launch(&mut self, origin: Transform, target: Entity, offset: Vec3, speed: f32) -> Entity {
        self.commands
            .spawn((
                TargetProjectile {
                    target,
                    offset,
                    speed,
                    lifetime: PROJECTILE_LIFETIME,
                },
                origin,
                Visibility::default(),
            ))
            .id()
    }
}

/// Result of one homing step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HomingStep {
    /// Still flying; new position and travel direction.
    Flying { position: Vec3, direction: Vec3 },
    /// Reached the aim point this frame.
    Arrived,
}

/// Move `position` toward `aim_point` by `speed * dt`.
pub fn home_toward(position: Vec3, aim_point: Vec3, speed: f32, dt: f32) -> HomingStep {
    let to_aim = aim_point - position;
    let distance = to_aim.length();
    let step = speed * dt;

    if distance <= HIT_DISTANCE || distance <= step {
        return HomingStep::Arrived;
    }

    let direction = to_aim / distance;
    HomingStep::Flying {
        position: position + direction * step,
        direction,
    }
}

/// Steer projectiles toward their targets and resolve hits.
pub fn steer_projectiles(
    mut commands: Commands,
    time: Res<Time>,
    mut projectile_query: Query<(Entity, &mut Transform, &mut TargetProjectile)>,
    target_query: Query<&Transform, (With<ScreenTarget>, Without<TargetProjectile>)>,
    mut hit_events: EventWriter<ProjectileHit>,
) {
    let dt = time.delta_secs();

    for (entity, mut transform, mut projectile) in projectile_query.iter_mut() {
        projectile.lifetime -= dt;

        let Ok(target_transform) = target_query.get(projectile.target) else {
            // Target is gone
            commands.entity(entity).despawn_recursive();
            continue;
        };

        if projectile.lifetime <= 0.0 {
            debug!("Projectile {:?} expired", entity);
            commands.entity(entity).despawn_recursive();
            continue;
        }

        let aim_point = target_transform.translation + projectile.offset;
        match home_toward(transform.translation, aim_point, projectile.speed, dt) {
            HomingStep::Flying { position, direction } => {
                transform.translation = position;
                transform.look_to(direction, Vec3::Y);
            }
            HomingStep::Arrived => {
                hit_events.send(ProjectileHit {
                    projectile: entity,
                    target: projectile.target,
                    position: aim_point,
                });
                commands.entity(entity).despawn_recursive();
            }
        }
    }
}

/// Give newly launched projectiles an arrow mesh.
pub fn attach_projectile_visuals(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    new_projectiles: Query<Entity, (Added<TargetProjectile>, Without<Mesh3d>)>,
) {
    for entity in new_projectiles.iter() {
        let mesh = meshes.add(Cuboid::new(0.04, 0.04, 0.7));
        let material = materials.add(StandardMaterial {
            base_color: Color::srgb(0.9, 0.85, 0.6),
            emissive: LinearRgba::rgb(1.5, 1.2, 0.4),
            ..default()
        });

        commands.entity(entity).insert((Mesh3d(mesh), MeshMaterial3d(material)));
    }
}
