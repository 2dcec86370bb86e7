//! Combat plugin - attack sequencing, projectiles, and combat feedback.

use bevy::prelude::*;

use super::components::ShotTally;
use super::projectile;
use super::systems;
use crate::core::ArcherSet;

/// Combat plugin - turns fire input into rotate, cast, and release.
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ShotTally>()
            // Fire is handled before the rotation and attack ticks so an
            // accepted fire starts turning on the same frame
            .add_systems(
                Update,
                (
                    systems::handle_fire,
                    systems::rotate_to_target,
                    systems::tick_attack,
                )
                    .chain()
                    .in_set(ArcherSet::Action),
            )
            .add_systems(Update, projectile::steer_projectiles.in_set(ArcherSet::Motion))
            .add_systems(
                Update,
                (
                    projectile::attach_projectile_visuals,
                    systems::spawn_cast_glow,
                    systems::fade_cast_glow,
                    systems::flash_hit_targets,
                    systems::update_hit_flash,
                    systems::tally_shots,
                )
                    .in_set(ArcherSet::Presentation),
            );
    }
}
