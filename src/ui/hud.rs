//! In-game HUD - the aim reticle.

use bevy::prelude::*;

use crate::core::{AimChanged, ArcherSet, GameState};
use crate::targeting::AimState;

/// Reticle edge length in logical pixels.
pub const RETICLE_SIZE: f32 = 28.0;

const ACTIVE_COLOR: Color = Color::srgb(1.0, 0.35, 0.25);
const IDLE_COLOR: Color = Color::srgba(1.0, 1.0, 1.0, 0.6);

/// Marker for HUD root entity.
#[derive(Component)]
pub struct HudRoot;

/// Marker for the aim reticle node.
#[derive(Component)]
pub struct AimReticle;

/// Brief grow of the reticle when it locks onto a target.
#[derive(Component)]
pub struct ReticlePulse {
    pub timer: Timer,
}

impl Default for ReticlePulse {
    fn default() -> Self {
        Self {
            timer: Timer::from_seconds(0.25, TimerMode::Once),
        }
    }
}

impl ReticlePulse {
    /// Edge length for the current point in the pulse.
    pub fn size(&self) -> f32 {
        RETICLE_SIZE * (1.0 + 0.5 * (1.0 - self.timer.fraction()))
    }
}

/// Setup HUD systems.
pub fn setup_hud_systems(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_hud)
        .add_systems(OnExit(GameState::InGame), cleanup_hud)
        .add_systems(
            Update,
            (pulse_on_lock, tick_reticle_pulse, sync_reticle)
                .chain()
                .in_set(ArcherSet::Presentation),
        );
}

/// Top-left corner of a `size` reticle node centered on `reticle`.
pub fn reticle_corner(reticle: Vec2, size: f32) -> Vec2 {
    reticle - Vec2::splat(size * 0.5)
}

pub fn reticle_color(active: bool) -> Color {
    if active {
        ACTIVE_COLOR
    } else {
        IDLE_COLOR
    }
}

/// Spawn the HUD UI.
fn spawn_hud(mut commands: Commands) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                ..default()
            },
            HudRoot,
        ))
        .with_children(|parent| {
            // Hidden until the aim gate has placed it
            parent.spawn((
                Node {
                    width: Val::Px(RETICLE_SIZE),
                    height: Val::Px(RETICLE_SIZE),
                    position_type: PositionType::Absolute,
                    border: UiRect::all(Val::Px(2.0)),
                    ..default()
                },
                BorderColor(IDLE_COLOR),
                BorderRadius::MAX,
                Visibility::Hidden,
                AimReticle,
            ));
        });
}

/// Start a pulse whenever the gate locks on.
fn pulse_on_lock(
    mut commands: Commands,
    mut aim_events: EventReader<AimChanged>,
    reticle_query: Query<Entity, With<AimReticle>>,
) {
    let locked = aim_events.read().filter(|event| event.active).count() > 0;
    if !locked {
        return;
    }
    for reticle in reticle_query.iter() {
        commands.entity(reticle).insert(ReticlePulse::default());
    }
}

fn tick_reticle_pulse(
    mut commands: Commands,
    time: Res<Time>,
    mut pulse_query: Query<(Entity, &mut ReticlePulse)>,
) {
    for (entity, mut pulse) in pulse_query.iter_mut() {
        pulse.timer.tick(time.delta());
        if pulse.timer.finished() {
            commands.entity(entity).remove::<ReticlePulse>();
        }
    }
}

/// Move, size and tint the reticle from the aim state.
fn sync_reticle(
    aim: Res<AimState>,
    mut reticle_query: Query<
        (&mut Node, &mut BorderColor, &mut Visibility, Option<&ReticlePulse>),
        With<AimReticle>,
    >,
) {
    let Ok((mut node, mut border, mut visibility, pulse)) = reticle_query.get_single_mut() else {
        return;
    };
    let Some(reticle) = aim.reticle else {
        return;
    };

    let size = pulse.map_or(RETICLE_SIZE, ReticlePulse::size);
    let corner = reticle_corner(reticle, size);
    node.left = Val::Px(corner.x);
    node.top = Val::Px(corner.y);
    node.width = Val::Px(size);
    node.height = Val::Px(size);
    border.0 = reticle_color(aim.active);
    *visibility = Visibility::Inherited;
}

/// Clean up HUD entities.
fn cleanup_hud(mut commands: Commands, query: Query<Entity, With<HudRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}
