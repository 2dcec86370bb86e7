//! World module - the demo arena, collision groups, and target dummies.

mod layers;
mod plugin;
mod spawning;
mod wander;

pub use layers::{ARCHER_GROUP, SCENERY_GROUP, TARGET_GROUP};
pub use plugin::{setup_arena, WorldPlugin};
pub use spawning::{spawn_dummy, spawn_ground, spawn_light, spawn_pillar, ArenaGeometry, DUMMY_HEIGHT};
pub use wander::{drift_targets, Drifting};
