//! UI module - aim reticle HUD and pause panel.

mod hud;
mod pause;
mod plugin;

pub use hud::{reticle_color, reticle_corner, AimReticle, HudRoot, ReticlePulse, RETICLE_SIZE};
pub use pause::{resume_border, tally_line, PauseOverlay, ResumeButton};
pub use plugin::UiPlugin;
