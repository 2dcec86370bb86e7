//! World plugin - the demo arena and its drifting targets.

use bevy::prelude::*;

use super::spawning::{spawn_dummy, spawn_ground, spawn_light, spawn_pillar, ArenaGeometry};
use super::wander::drift_targets;
use crate::archer::{spawn_archer, spawn_archer_camera, ArcherConfig};
use crate::core::{ArcherSet, GameState};
use crate::targeting::ScreenTargets;

const ARCHER_START: Vec3 = Vec3::new(0.0, 1.0, 8.0);

const DUMMY_POSITIONS: [Vec3; 3] = [
    Vec3::new(-6.0, 0.0, -6.0),
    Vec3::new(0.0, 0.0, -10.0),
    Vec3::new(6.0, 0.0, -6.0),
];

const PILLAR_POSITIONS: [Vec3; 4] = [
    Vec3::new(-3.0, 0.0, -2.0),
    Vec3::new(3.0, 0.0, -2.0),
    Vec3::new(-8.0, 0.0, 2.0),
    Vec3::new(8.0, 0.0, 2.0),
];

/// World plugin - builds the arena when gameplay starts.
pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::InGame), setup_arena)
            .add_systems(Update, drift_targets.in_set(ArcherSet::Motion));
    }
}

/// Build the arena, archer, and camera.
///
/// InGame is re-entered after every pause, so this only builds once.
pub fn setup_arena(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<ArcherConfig>,
    mut targets: ResMut<ScreenTargets>,
    existing: Query<(), With<ArenaGeometry>>,
) {
    if !existing.is_empty() {
        return;
    }

    info!("Building arena");

    let stone = materials.add(StandardMaterial {
        base_color: Color::srgb(0.32, 0.30, 0.28),
        perceptual_roughness: 0.8,
        ..default()
    });
    let ground = materials.add(StandardMaterial {
        base_color: Color::srgb(0.28, 0.27, 0.26),
        perceptual_roughness: 0.9,
        ..default()
    });
    let straw = materials.add(StandardMaterial {
        base_color: Color::srgb(0.75, 0.62, 0.35),
        perceptual_roughness: 0.9,
        ..default()
    });

    commands.insert_resource(AmbientLight {
        color: Color::srgb(0.8, 0.85, 1.0),
        brightness: 200.0,
    });
    spawn_light(&mut commands, Vec3::new(0.0, 8.0, 0.0), 2_000_000.0, (1.0, 0.95, 0.85), 40.0);
    spawn_light(&mut commands, Vec3::new(0.0, 6.0, -10.0), 800_000.0, (1.0, 0.8, 0.6), 25.0);

    spawn_ground(&mut commands, &mut meshes, ground, 20.0);
    for position in PILLAR_POSITIONS {
        spawn_pillar(&mut commands, &mut meshes, stone.clone(), position, 0.6, 4.0);
    }

    for position in DUMMY_POSITIONS {
        let dummy = spawn_dummy(&mut commands, &mut meshes, straw.clone(), position);
        targets.push(dummy);
    }
    info!("Spawned {} target dummies", targets.len());

    spawn_archer(&mut commands, &mut meshes, &mut materials, ARCHER_START, &config.movement);
    spawn_archer_camera(&mut commands, ARCHER_START, &config.camera);
}
