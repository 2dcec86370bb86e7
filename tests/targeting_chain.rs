//! Targeting chain integration tests
//!
//! Runs the prune/select/gate systems headless. No renderer sizes the camera
//! here, so every candidate lands on the same screen point and selection
//! falls back to the last candidate in scan order.

use std::time::Duration;

use archer_controller::archer::{Archer, ArcherCamera, ArcherConfig};
use archer_controller::core::AimChanged;
use archer_controller::targeting::{
    aim_gate, prune_despawned_targets, select_screen_target, AimState, ScreenTarget, ScreenTargets,
    SelectedTarget, TargetSelection,
};
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;

const FRAME: f32 = 1.0 / 64.0;

/// Aim changes seen so far, collected every frame.
#[derive(Resource, Default)]
struct AimLog(Vec<AimChanged>);

fn collect_aim_changes(mut events: EventReader<AimChanged>, mut log: ResMut<AimLog>) {
    log.0.extend(events.read().copied());
}

/// Helper: headless app with targeting resources, a camera and an archer
fn create_targeting_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f32(FRAME)))
        .insert_resource(ArcherConfig::default())
        .init_resource::<ScreenTargets>()
        .init_resource::<SelectedTarget>()
        .init_resource::<AimState>()
        .init_resource::<AimLog>()
        .add_event::<AimChanged>();

    app.world_mut().spawn((
        Camera::default(),
        GlobalTransform::default(),
        ArcherCamera::default(),
    ));
    app.world_mut().spawn((Archer, Transform::default()));
    app
}

fn spawn_targets(app: &mut App, count: usize) -> Vec<Entity> {
    let targets: Vec<Entity> = (0..count)
        .map(|i| {
            app.world_mut()
                .spawn((ScreenTarget, Transform::from_xyz(i as f32 * 2.0, 0.0, -10.0)))
                .id()
        })
        .collect();
    app.insert_resource(ScreenTargets(targets.clone()));
    targets
}

fn selection(app: &App) -> Option<TargetSelection> {
    app.world().resource::<SelectedTarget>().0
}

#[test]
fn test_despawned_candidate_is_pruned_before_selection() {
    let mut app = create_targeting_app();
    app.add_systems(Update, (prune_despawned_targets, select_screen_target).chain());
    let targets = spawn_targets(&mut app, 3);

    app.update();
    assert_eq!(selection(&app), Some(TargetSelection { index: 2, entity: targets[2] }));

    app.world_mut().despawn(targets[2]);
    app.update();

    assert_eq!(app.world().resource::<ScreenTargets>().0, targets[..2].to_vec());
    assert_eq!(selection(&app), Some(TargetSelection { index: 1, entity: targets[1] }));
}

#[test]
fn test_no_candidates_clears_selection() {
    let mut app = create_targeting_app();
    app.add_systems(Update, (prune_despawned_targets, select_screen_target).chain());
    let targets = spawn_targets(&mut app, 1);

    app.update();
    assert!(selection(&app).is_some());

    app.world_mut().despawn(targets[0]);
    app.update();

    assert!(app.world().resource::<ScreenTargets>().is_empty());
    assert_eq!(selection(&app), None);
}

#[test]
fn test_stale_selection_drops_aim_and_announces_it() {
    let mut app = create_targeting_app();
    app.add_systems(Update, (aim_gate, collect_aim_changes).chain());
    let targets = spawn_targets(&mut app, 1);
    app.insert_resource(SelectedTarget(Some(TargetSelection { index: 0, entity: targets[0] })));
    app.insert_resource(AimState {
        active: true,
        reticle: None,
    });

    app.world_mut().despawn(targets[0]);
    app.update();

    assert!(!app.world().resource::<AimState>().active);
    assert_eq!(
        app.world().resource::<AimLog>().0,
        vec![AimChanged { target: targets[0], active: false }]
    );

    // Still stale, but the flag no longer flips
    app.update();
    assert_eq!(app.world().resource::<AimLog>().0.len(), 1);
}

#[test]
fn test_unsized_viewport_is_never_aimable() {
    let mut app = create_targeting_app();
    app.add_systems(Update, (aim_gate, collect_aim_changes).chain());
    let targets = spawn_targets(&mut app, 1);
    app.insert_resource(SelectedTarget(Some(TargetSelection { index: 0, entity: targets[0] })));

    for _ in 0..5 {
        app.update();
    }

    let aim = *app.world().resource::<AimState>();
    assert!(!aim.active);
    assert!(aim.reticle.is_some());
    assert!(app.world().resource::<AimLog>().0.is_empty());
}
