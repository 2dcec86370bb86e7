//! Targeting components and resources.

use bevy::prelude::*;

/// Marker for entities the archer can aim at.
#[derive(Component)]
pub struct ScreenTarget;

/// Candidate targets in scan order.
///
/// Order matters: when two candidates are equally close to screen center the
/// later one wins.
#[derive(Resource, Debug, Default, Clone)]
pub struct ScreenTargets(pub Vec<Entity>);

impl ScreenTargets {
    pub fn push(&mut self, entity: Entity) {
        self.0.push(entity);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// A chosen candidate: its position in [`ScreenTargets`] and its entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetSelection {
    pub index: usize,
    pub entity: Entity,
}

/// The candidate closest to screen center this frame.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct SelectedTarget(pub Option<TargetSelection>);

impl SelectedTarget {
    pub fn entity(&self) -> Option<Entity> {
        self.0.map(|selection| selection.entity)
    }
}

/// Aim gate output. Written only by the aim gate.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct AimState {
    /// The selected target is on screen, near center, and unobstructed.
    pub active: bool,
    /// Reticle position in logical pixels (None until the first frame).
    pub reticle: Option<Vec2>,
}
