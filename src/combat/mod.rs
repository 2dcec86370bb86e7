//! Combat module - attack sequencing, rotation, and homing projectiles.

mod components;
mod plugin;
mod projectile;
mod sequencer;
mod systems;

pub use components::*;
pub use plugin::CombatPlugin;
pub use projectile::{
    home_toward, steer_projectiles, HomingStep, ProjectileCommands, ProjectileFactory,
    TargetProjectile, HIT_DISTANCE, PROJECTILE_LIFETIME,
};
pub use sequencer::{AttackPhase, AttackSignal, AttackState, RotateToTarget};
pub use systems::{handle_fire, rotate_to_target, tally_shots, tick_attack, PRIMARY_EFFECT};
