//! Target selection: the candidate nearest the screen center.

use bevy::log::warn_once;
use bevy::prelude::*;

use super::capabilities::{CameraProjection, ProjectionSource};
use super::components::*;
use crate::archer::ArcherCamera;
use crate::core::TargetingError;

/// Index of the projection nearest `center`.
///
/// Scans in order and keeps the last candidate among equals. Points that
/// could not be projected count as infinitely far.
pub fn select_target<I>(projections: I, center: Vec2) -> Result<usize, TargetingError>
where
    I: IntoIterator<Item = Option<Vec2>>,
{
    let mut best: Option<(usize, f32)> = None;

    for (index, projection) in projections.into_iter().enumerate() {
        let distance = projection
            .map(|point| point.distance(center))
            .filter(|distance| !distance.is_nan())
            .unwrap_or(f32::INFINITY);

        match best {
            Some((_, best_distance)) if distance > best_distance => {}
            _ => best = Some((index, distance)),
        }
    }

    best.map(|(index, _)| index).ok_or(TargetingError::NoCandidates)
}

/// Project every candidate and pick the one nearest screen center.
pub fn select_from(
    candidates: &[Entity],
    positions: impl Fn(Entity) -> Option<Vec3>,
    projection: &impl ProjectionSource,
) -> Result<TargetSelection, TargetingError> {
    let center = projection.screen_center();
    let index = select_target(
        candidates.iter().map(|&entity| {
            positions(entity)
                .and_then(|world| projection.world_to_screen(world))
                .map(|screen| screen.position)
        }),
        center,
    )?;

    Ok(TargetSelection {
        index,
        entity: candidates[index],
    })
}

/// Recompute [`SelectedTarget`] for this frame.
pub fn select_screen_target(
    targets: Res<ScreenTargets>,
    target_query: Query<&Transform, With<ScreenTarget>>,
    camera_query: Query<(&Camera, &GlobalTransform), With<ArcherCamera>>,
    mut selected: ResMut<SelectedTarget>,
) {
    let Ok((camera, camera_transform)) = camera_query.get_single() else {
        warn_once!("Target selection needs exactly one ArcherCamera");
        return;
    };

    let projection = CameraProjection::from_camera(camera, camera_transform);

    let result = select_from(
        &targets.0,
        |entity| target_query.get(entity).ok().map(|transform| transform.translation),
        &projection,
    );

    match result {
        Ok(selection) => {
            if selected.0 != Some(selection) {
                debug!("Selected target {:?} (index {})", selection.entity, selection.index);
            }
            selected.0 = Some(selection);
        }
        Err(e) => {
            warn_once!("{}", e);
            selected.0 = None;
        }
    }
}

/// Drop despawned candidates from the scan list, keeping the order of the rest.
pub fn prune_despawned_targets(
    mut removed: RemovedComponents<ScreenTarget>,
    mut targets: ResMut<ScreenTargets>,
) {
    let gone: Vec<Entity> = removed.read().collect();
    if gone.is_empty() {
        return;
    }
    targets.0.retain(|entity| !gone.contains(entity));
    if targets.is_empty() {
        info!("Removed {} target(s), none remain", gone.len());
    } else {
        info!("Removed {} target(s), {} remain", gone.len(), targets.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::targeting::ScreenPoint;

    const CENTER: Vec2 = Vec2::new(400.0, 300.0);

    fn at_distance(distance: f32) -> Option<Vec2> {
        Some(CENTER + Vec2::new(distance, 0.0))
    }

    #[test]
    fn picks_nearest_to_center() {
        let projections = [at_distance(50.0), at_distance(10.0), at_distance(30.0)];
        assert_eq!(select_target(projections, CENTER), Ok(1));
    }

    #[test]
    fn ties_go_to_the_last_candidate() {
        let projections = [
            at_distance(20.0),
            Some(CENTER - Vec2::new(0.0, 20.0)),
            at_distance(40.0),
            Some(CENTER + Vec2::new(0.0, 20.0)),
        ];
        assert_eq!(select_target(projections, CENTER), Ok(3));
    }

    #[test]
    fn empty_list_fails_fast() {
        let projections: [Option<Vec2>; 0] = [];
        assert_eq!(select_target(projections, CENTER), Err(TargetingError::NoCandidates));
    }

    #[test]
    fn unprojectable_candidates_lose_to_any_visible_one() {
        let projections = [None, at_distance(500.0), None];
        assert_eq!(select_target(projections, CENTER), Ok(1));
    }

    #[test]
    fn all_unprojectable_still_selects_last() {
        let projections = [None, None, None];
        assert_eq!(select_target(projections, CENTER), Ok(2));
    }

    struct Flat;

    impl ProjectionSource for Flat {
        // Orthographic stand-in: world x/y map straight to pixels.
        fn world_to_screen(&self, world: Vec3) -> Option<ScreenPoint> {
            Some(ScreenPoint {
                position: world.truncate(),
                depth: 1.0,
            })
        }

        fn viewport_size(&self) -> Vec2 {
            CENTER * 2.0
        }
    }

    #[test]
    fn select_from_maps_index_to_entity() {
        let entities = [Entity::from_raw(10), Entity::from_raw(11), Entity::from_raw(12)];
        let positions = |entity: Entity| match entity.index() {
            10 => Some(Vec3::new(450.0, 300.0, 0.0)),
            11 => Some(Vec3::new(410.0, 300.0, 0.0)),
            12 => Some(Vec3::new(430.0, 300.0, 0.0)),
            _ => None,
        };

        let selection = select_from(&entities, positions, &Flat).unwrap();
        assert_eq!(selection.index, 1);
        assert_eq!(selection.entity, entities[1]);
    }

    #[test]
    fn select_from_skips_missing_transforms() {
        let entities = [Entity::from_raw(1), Entity::from_raw(2)];
        let positions = |entity: Entity| (entity.index() == 2).then(|| Vec3::new(900.0, 900.0, 0.0));

        let selection = select_from(&entities, positions, &Flat).unwrap();
        assert_eq!(selection.entity, entities[1]);
    }
}
