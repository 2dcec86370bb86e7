//! Aim/visibility gate and reticle motion.
//!
//! Each frame the selected target (plus the aim offset) is projected to the
//! screen. It is aimable when it sits inside the central third of the screen,
//! in front of the camera, and nothing on the occlusion layers blocks the
//! line from the archer. The reticle then slides toward the target or back to
//! screen center at a fixed pixel speed.

use bevy::log::warn_once;
use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::capabilities::*;
use super::components::*;
use crate::archer::{Archer, ArcherCamera, ArcherConfig};
use crate::core::{AimChanged, TargetingError};

/// Screen-space half of the aimability test.
///
/// The point must be within a third of the half-screen of center on both
/// axes, with positive coordinates and positive depth.
pub fn in_aim_window(screen: ScreenPoint, center: Vec2) -> bool {
    let offset = (screen.position - center).abs();
    offset.x < center.x / 3.0
        && offset.y < center.y / 3.0
        && screen.position.x > 0.0
        && screen.position.y > 0.0
        && screen.depth > 0.0
}

/// Result of evaluating the gate for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AimReading {
    pub screen: Option<ScreenPoint>,
    pub aimable: bool,
}

/// Evaluate the full aimability predicate.
///
/// The line-of-sight segment runs from `archer + offset` to
/// `target + 2 * offset`, and is only tested once the screen conditions hold.
pub fn evaluate_aim(
    projection: &impl ProjectionSource,
    occlusion: &impl OcclusionTester,
    archer: Vec3,
    target: Vec3,
    offset: Vec3,
) -> AimReading {
    let screen = projection.world_to_screen(target + offset);
    let center = projection.screen_center();

    let aimable = match screen {
        Some(point) => {
            in_aim_window(point, center) && !occlusion.is_blocked(archer + offset, target + offset * 2.0)
        }
        None => false,
    };

    AimReading { screen, aimable }
}

/// Step from `current` toward `target` by at most `max_delta`.
///
/// Lands exactly on `target` when it is within one step; never overshoots.
pub fn move_towards(current: Vec2, target: Vec2, max_delta: f32) -> Vec2 {
    let delta = target - current;
    let distance = delta.length();
    if distance <= max_delta || distance <= f32::EPSILON {
        target
    } else {
        current + delta / distance * max_delta
    }
}

/// Apply a reading to the aim state. Returns true when the flag flipped.
pub fn update_aim_state(
    state: &mut AimState,
    reading: AimReading,
    center: Vec2,
    reticle_speed: f32,
    dt: f32,
) -> bool {
    let attractor = match (reading.aimable, reading.screen) {
        (true, Some(point)) => point.position,
        _ => center,
    };

    let current = state.reticle.unwrap_or(center);
    state.reticle = Some(move_towards(current, attractor, reticle_speed * dt));

    let flipped = state.active != reading.aimable;
    state.active = reading.aimable;
    flipped
}

/// Run the aim gate for the selected target.
pub fn aim_gate(
    time: Res<Time>,
    config: Res<ArcherConfig>,
    selected: Res<SelectedTarget>,
    rapier_context: Query<&RapierContext>,
    camera_query: Query<(&Camera, &GlobalTransform), With<ArcherCamera>>,
    archer_query: Query<(Entity, &Transform), With<Archer>>,
    target_query: Query<&Transform, (With<ScreenTarget>, Without<Archer>)>,
    mut aim: ResMut<AimState>,
    mut aim_events: EventWriter<AimChanged>,
) {
    let Ok((camera, camera_transform)) = camera_query.get_single() else {
        return;
    };
    let Ok((archer, archer_transform)) = archer_query.get_single() else {
        warn_once!("Aim gate needs exactly one Archer");
        return;
    };

    let projection = CameraProjection::from_camera(camera, camera_transform);
    let center = projection.screen_center();
    let offset = config.aim.offset();

    let target = selected.entity();
    let target_position = target.and_then(|entity| match target_query.get(entity) {
        Ok(transform) => Some(transform.translation),
        Err(_) => {
            warn!("{}", TargetingError::StaleTarget(entity));
            None
        }
    });

    let reading = match target_position {
        Some(position) => match rapier_context.get_single() {
            Ok(context) => {
                let occlusion = RapierOcclusion::new(context, config.aim.occlusion_mask, archer);
                evaluate_aim(&projection, &occlusion, archer_transform.translation, position, offset)
            }
            Err(_) => evaluate_aim(&projection, &ClearSight, archer_transform.translation, position, offset),
        },
        None => AimReading {
            screen: None,
            aimable: false,
        },
    };

    let flipped = update_aim_state(&mut aim, reading, center, config.aim.reticle_speed, time.delta_secs());

    if let Some(event) = aim_change(flipped, target, &aim) {
        debug!("Aim on {:?}: {}", event.target, event.active);
        aim_events.send(event);
    }
}

/// The event to announce after a gate update, if the flag flipped while a
/// target was selected.
pub fn aim_change(flipped: bool, target: Option<Entity>, aim: &AimState) -> Option<AimChanged> {
    match (flipped, target) {
        (true, Some(target)) => Some(AimChanged {
            target,
            active: aim.active,
        }),
        _ => None,
    }
}
