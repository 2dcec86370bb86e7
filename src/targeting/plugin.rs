//! Targeting plugin - selection and aim gate, in that order every frame.

use bevy::prelude::*;

use super::components::*;
use super::gate;
use super::selector;
use crate::core::ArcherSet;

/// Targeting plugin - picks the target nearest screen center and gates aiming.
pub struct TargetingPlugin;

impl Plugin for TargetingPlugin {
    fn build(&self, app: &mut App) {
        app
            .init_resource::<ScreenTargets>()
            .init_resource::<SelectedTarget>()
            .init_resource::<AimState>()
            .add_systems(
                Update,
                (selector::prune_despawned_targets, selector::select_screen_target)
                    .chain()
                    .in_set(ArcherSet::Targeting),
            )
            .add_systems(Update, gate::aim_gate.in_set(ArcherSet::Aim));
    }
}
