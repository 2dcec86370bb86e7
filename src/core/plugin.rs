//! Core plugin that sets up game states, events, frame input, and ordering.

use bevy::prelude::*;

use super::events::*;
use super::frame::*;
use super::states::*;
use super::tween::*;
use crate::archer::ArcherConfig;

/// Per-frame ordering for every archer system.
///
/// Target selection always precedes the aim gate, which always precedes
/// attack and movement processing.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum ArcherSet {
    Input,
    Targeting,
    Aim,
    Action,
    Motion,
    Presentation,
}

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin sets up:
/// - Game states (Loading, InGame, Paused)
/// - Global events (CastStarted, ProjectileLaunched, ...)
/// - The frame input context and the `ArcherSet` ordering
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app
            .init_state::<GameState>()
            .init_resource::<FrameInput>()

            .add_event::<CastStarted>()
            .add_event::<ProjectileLaunched>()
            .add_event::<ProjectileHit>()
            .add_event::<AimChanged>()

            .configure_sets(
                Update,
                (
                    ArcherSet::Input,
                    ArcherSet::Targeting,
                    ArcherSet::Aim,
                    ArcherSet::Action,
                    ArcherSet::Motion,
                    ArcherSet::Presentation,
                )
                    .chain()
                    .run_if(in_state(GameState::InGame)),
            )

            .add_systems(Update, finish_loading.run_if(in_state(GameState::Loading)))
            .add_systems(
                Update,
                handle_pause_input.run_if(in_state(GameState::InGame).or(in_state(GameState::Paused))),
            )
            .add_systems(Update, read_frame_input.in_set(ArcherSet::Input))

            // Camera easing runs in every state so pausing doesn't freeze it mid-swing
            .add_systems(Update, update_smooth_transforms);
    }
}

/// Enter gameplay once the controller config is available.
fn finish_loading(
    config: Option<Res<ArcherConfig>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if config.is_some() {
        info!("Controller config ready, entering game");
        next_state.set(GameState::InGame);
    }
}

/// Handle Escape key to pause/unpause the game.
fn handle_pause_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    current_state: Res<State<GameState>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        match current_state.get() {
            GameState::InGame => next_state.set(GameState::Paused),
            GameState::Paused => next_state.set(GameState::InGame),
            _ => {}
        }
    }
}
