//! Pause panel - session tally and a resume button.

use bevy::prelude::*;

use crate::combat::ShotTally;
use crate::core::GameState;
use crate::targeting::ScreenTargets;

const PANEL_COLOR: Color = Color::srgba(0.05, 0.06, 0.08, 0.9);
const TEXT_COLOR: Color = Color::srgb(0.85, 0.85, 0.9);
const ACCENT_COLOR: Color = Color::srgb(1.0, 0.35, 0.25);

/// Root of the pause panel.
#[derive(Component)]
pub struct PauseOverlay;

/// The panel's resume button.
#[derive(Component)]
pub struct ResumeButton;

/// Register the pause panel's systems.
pub fn setup_pause_systems(app: &mut App) {
    app.add_systems(OnEnter(GameState::Paused), spawn_pause_overlay)
        .add_systems(Update, resume_button.run_if(in_state(GameState::Paused)))
        .add_systems(OnExit(GameState::Paused), despawn_pause_overlay);
}

/// One-line session summary shown while paused.
pub fn tally_line(tally: &ShotTally, targets: usize) -> String {
    let accuracy = tally
        .accuracy()
        .map_or_else(|| "-".to_string(), |accuracy| format!("{:.0}%", accuracy * 100.0));
    format!(
        "Shots {}  Hits {}  Accuracy {}  Targets {}",
        tally.shots, tally.hits, accuracy, targets
    )
}

/// Border of the resume button for its interaction state.
pub fn resume_border(interaction: Interaction) -> Color {
    match interaction {
        Interaction::Pressed | Interaction::Hovered => ACCENT_COLOR,
        Interaction::None => TEXT_COLOR.with_alpha(0.3),
    }
}

fn label(text: impl Into<String>, size: f32) -> impl Bundle {
    (
        Text::new(text),
        TextFont {
            font_size: size,
            ..default()
        },
        TextColor(TEXT_COLOR),
    )
}

/// Panel pinned to the top of the screen; the game stays visible below it.
fn spawn_pause_overlay(
    mut commands: Commands,
    tally: Res<ShotTally>,
    targets: Res<ScreenTargets>,
) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(32.0),
                width: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                ..default()
            },
            PauseOverlay,
        ))
        .with_children(|root| {
            root.spawn((
                Node {
                    flex_direction: FlexDirection::Column,
                    align_items: AlignItems::Center,
                    row_gap: Val::Px(10.0),
                    padding: UiRect::axes(Val::Px(28.0), Val::Px(16.0)),
                    border: UiRect::bottom(Val::Px(3.0)),
                    ..default()
                },
                BackgroundColor(PANEL_COLOR),
                BorderColor(ACCENT_COLOR),
                BorderRadius::all(Val::Px(6.0)),
            ))
            .with_children(|panel| {
                panel.spawn(label("PAUSED", 36.0));
                panel.spawn(label(tally_line(&tally, targets.len()), 18.0));
                panel
                    .spawn((
                        Button,
                        Node {
                            padding: UiRect::axes(Val::Px(20.0), Val::Px(6.0)),
                            border: UiRect::all(Val::Px(2.0)),
                            ..default()
                        },
                        BorderColor(resume_border(Interaction::None)),
                        BorderRadius::all(Val::Px(4.0)),
                        ResumeButton,
                    ))
                    .with_children(|button| {
                        button.spawn(label("Resume (Esc)", 20.0));
                    });
            });
        });
}

fn resume_button(
    mut button_query: Query<
        (&Interaction, &mut BorderColor),
        (Changed<Interaction>, With<ResumeButton>),
    >,
    mut next_state: ResMut<NextState<GameState>>,
) {
    for (interaction, mut border) in button_query.iter_mut() {
        border.0 = resume_border(*interaction);
        if *interaction == Interaction::Pressed {
            next_state.set(GameState::InGame);
        }
    }
}

fn despawn_pause_overlay(mut commands: Commands, query: Query<Entity, With<PauseOverlay>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::state::app::StatesPlugin;

    fn paused_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin))
            .init_state::<GameState>()
            .insert_resource(ShotTally { shots: 4, hits: 3 })
            .insert_resource(ScreenTargets(vec![Entity::PLACEHOLDER; 2]));
        setup_pause_systems(&mut app);

        app.world_mut()
            .resource_mut::<NextState<GameState>>()
            .set(GameState::Paused);
        app.update();
        app
    }

    fn overlay_count(app: &mut App) -> usize {
        app.world_mut()
            .query_filtered::<Entity, With<PauseOverlay>>()
            .iter(app.world())
            .count()
    }

    #[test]
    fn tally_line_reports_accuracy() {
        let line = tally_line(&ShotTally { shots: 4, hits: 3 }, 2);
        assert_eq!(line, "Shots 4  Hits 3  Accuracy 75%  Targets 2");
        assert!(tally_line(&ShotTally::default(), 0).contains("Accuracy -"));
    }

    #[test]
    fn pausing_shows_the_panel_and_resuming_removes_it() {
        let mut app = paused_app();
        assert_eq!(overlay_count(&mut app), 1);

        app.world_mut()
            .resource_mut::<NextState<GameState>>()
            .set(GameState::InGame);
        app.update();
        assert_eq!(overlay_count(&mut app), 0);
    }

    #[test]
    fn pressing_resume_returns_to_the_game() {
        let mut app = paused_app();
        let button = app
            .world_mut()
            .query_filtered::<Entity, With<ResumeButton>>()
            .single(app.world());

        if let Some(mut interaction) = app.world_mut().get_mut::<Interaction>(button) {
            *interaction = Interaction::Pressed;
        }
        app.update();
        app.update();

        assert_eq!(app.world().resource::<State<GameState>>().get(), &GameState::InGame);
        assert_eq!(overlay_count(&mut app), 0);
    }
}
