//! Homing projectile integration tests
//!
//! Runs `steer_projectiles` headless and checks hits, lost targets, and
//! expiry.

use std::time::Duration;

use archer_controller::combat::{steer_projectiles, TargetProjectile, PROJECTILE_LIFETIME};
use archer_controller::core::ProjectileHit;
use archer_controller::targeting::ScreenTarget;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;

const FRAME: f32 = 1.0 / 64.0;

/// Hits seen so far, collected every frame.
#[derive(Resource, Default)]
struct Hits(Vec<ProjectileHit>);

fn collect_hits(mut events: EventReader<ProjectileHit>, mut hits: ResMut<Hits>) {
    hits.0.extend(events.read().copied());
}

fn create_projectile_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f32(FRAME)))
        .init_resource::<Hits>()
        .add_event::<ProjectileHit>()
        .add_systems(Update, (steer_projectiles, collect_hits).chain());
    app
}

fn spawn_projectile(app: &mut App, target: Entity, speed: f32) -> Entity {
    app.world_mut()
        .spawn((
            TargetProjectile {
                target,
                offset: Vec3::Y,
                speed,
                lifetime: PROJECTILE_LIFETIME,
            },
            Transform::default(),
        ))
        .id()
}

#[test]
fn test_projectile_hits_moving_target() {
    let mut app = create_projectile_app();
    let target = app
        .world_mut()
        .spawn((ScreenTarget, Transform::from_xyz(0.0, 0.0, -10.0)))
        .id();
    let projectile = spawn_projectile(&mut app, target, 30.0);

    for _ in 0..120 {
        // Target sidesteps while the projectile is in flight
        if let Some(mut transform) = app.world_mut().get_mut::<Transform>(target) {
            transform.translation.x += 0.05;
        }
        app.update();
        if !app.world().resource::<Hits>().0.is_empty() {
            break;
        }
    }

    let hits = &app.world().resource::<Hits>().0;
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].projectile, projectile);
    assert_eq!(hits[0].target, target);
    assert!(!app.world().entities().contains(projectile), "projectile should despawn on hit");
}

#[test]
fn test_projectile_faces_travel_direction() {
    let mut app = create_projectile_app();
    let target = app
        .world_mut()
        .spawn((ScreenTarget, Transform::from_xyz(20.0, -1.0, 0.0)))
        .id();
    let projectile = spawn_projectile(&mut app, target, 10.0);

    app.update();
    app.update();

    let forward = app
        .world()
        .get::<Transform>(projectile)
        .map(|transform| transform.forward().as_vec3())
        .unwrap_or_default();
    assert!(forward.abs_diff_eq(Vec3::X, 1e-4), "forward was {:?}", forward);
}

#[test]
fn test_projectile_despawns_when_target_vanishes() {
    let mut app = create_projectile_app();
    let target = app
        .world_mut()
        .spawn((ScreenTarget, Transform::from_xyz(0.0, 0.0, -50.0)))
        .id();
    let projectile = spawn_projectile(&mut app, target, 5.0);

    app.update();
    assert!(app.world().entities().contains(projectile));

    app.world_mut().despawn(target);
    app.update();

    assert!(!app.world().entities().contains(projectile));
    assert!(app.world().resource::<Hits>().0.is_empty());
}

#[test]
fn test_projectile_expires() {
    let mut app = create_projectile_app();
    let target = app
        .world_mut()
        .spawn((ScreenTarget, Transform::from_xyz(0.0, 0.0, -1000.0)))
        .id();
    let projectile = spawn_projectile(&mut app, target, 1.0);

    // Lifetime plus a few frames of slack
    let frames = (PROJECTILE_LIFETIME / FRAME) as usize + 4;
    for _ in 0..frames {
        app.update();
    }

    assert!(!app.world().entities().contains(projectile));
    assert!(app.world().resource::<Hits>().0.is_empty());
}
