//! UI plugin - reticle HUD and pause panel.

use bevy::prelude::*;

use super::{hud, pause};

/// UI plugin - handles all user interface.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        hud::setup_hud_systems(app);
        pause::setup_pause_systems(app);
    }
}
