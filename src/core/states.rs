//! Game state definitions that control the overall flow of the demo.
//!
//! Archer systems only run in `InGame`; `Paused` freezes them but keeps the
//! arena visible.

use bevy::prelude::*;

/// Main game states.
///
/// - Start in `Loading` while the controller tuning file is read
/// - Move to `InGame` once the config resource exists
/// - `Paused` toggles with Escape
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    /// Reading data files
    #[default]
    Loading,
    /// Active gameplay
    InGame,
    /// Gameplay frozen
    Paused,
}
