//! Targeting module - target selection, aim gate, and engine capabilities.

mod capabilities;
mod components;
mod gate;
mod plugin;
mod selector;

pub use capabilities::*;
pub use components::*;
pub use gate::{
    aim_change, aim_gate, evaluate_aim, in_aim_window, move_towards, update_aim_state, AimReading,
};
pub use plugin::TargetingPlugin;
pub use selector::{prune_despawned_targets, select_from, select_screen_target, select_target};
