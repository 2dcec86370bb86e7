//! Archer Controller - a third-person archer with screen-space targeting in Bevy.
//!
//! The archer walks relative to the camera, auto-selects the target nearest
//! the screen center, and fires homing projectiles once that target is
//! visible and unobstructed.
//!
//! # Architecture
//!
//! The game is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: Game states, frame input, global events, system ordering
//! - **Archer**: Config, movement, animation blend values, follow camera
//! - **Targeting**: Target selection and the aim/visibility gate
//! - **Combat**: Attack sequencing, rotate-to-target, homing projectiles
//! - **World**: Demo arena with occluding pillars and drifting dummies
//! - **UI**: Aim reticle and pause overlay
//!
//! Every frame runs `Input -> Targeting -> Aim -> Action -> Motion ->
//! Presentation` (see [`core::ArcherSet`]).

pub mod archer;
pub mod combat;
pub mod core;
pub mod targeting;
pub mod ui;
pub mod world;

use bevy::prelude::*;

/// Main game plugin that adds all sub-plugins.
///
/// Physics is left to the caller so tests can run without Rapier.
pub struct ArcherGamePlugin;

impl Plugin for ArcherGamePlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)

            // Archer systems
            .add_plugins(archer::ArcherPlugin)

            // Targeting systems
            .add_plugins(targeting::TargetingPlugin)

            // Combat systems
            .add_plugins(combat::CombatPlugin)

            // World systems
            .add_plugins(world::WorldPlugin)

            // UI systems
            .add_plugins(ui::UiPlugin);
    }
}
