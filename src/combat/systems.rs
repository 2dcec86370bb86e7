//! Combat systems - fire handling, attack sequencing, and feedback.

use bevy::prelude::*;

use super::components::*;
use super::projectile::{ProjectileCommands, ProjectileFactory};
use super::sequencer::{AttackSignal, AttackState, RotateToTarget};
use crate::archer::{AnimTrigger, AnimationSink, Archer, ArcherAnimator, ArcherConfig, FirePoint};
use crate::core::{AttackError, CastStarted, FrameInput, ProjectileHit, ProjectileLaunched};
use crate::targeting::{AimState, ScreenTarget, SelectedTarget};

/// Effect used by the fire button.
pub const PRIMARY_EFFECT: usize = 0;

const CAST_GLOW_INTENSITY: f32 = 40_000.0;

/// Start an attack when fire is pressed.
///
/// Accepted only while the aim gate reports an active target and the archer
/// is not already attacking. Rejections are expected during normal play and
/// only logged at debug level.
pub fn handle_fire(
    mut commands: Commands,
    frame: Res<FrameInput>,
    aim: Res<AimState>,
    selected: Res<SelectedTarget>,
    config: Res<ArcherConfig>,
    mut archer_query: Query<
        (Entity, &Transform, &mut AttackState, &mut ArcherAnimator, Has<RotateToTarget>),
        With<Archer>,
    >,
    target_query: Query<&Transform, (With<ScreenTarget>, Without<Archer>)>,
    mut cast_events: EventWriter<CastStarted>,
) {
    if !frame.fire {
        return;
    }

    let Ok((archer, transform, mut attack, mut animator, rotating)) = archer_query.get_single_mut()
    else {
        return;
    };

    let target = selected.entity();
    let result = attack.begin(
        aim.active,
        target,
        PRIMARY_EFFECT,
        &config.attack.effects,
        config.attack.post_fire_delay,
    );

    match result {
        Ok(()) => {}
        Err(e @ (AttackError::AlreadyAttacking | AttackError::NoActiveTarget)) => {
            debug!("Fire ignored: {}", e);
            return;
        }
        Err(e) => {
            error!("Fire rejected: {}", e);
            return;
        }
    }

    animator.reset();
    animator.trigger(AnimTrigger::Attack);
    cast_events.send(CastStarted {
        archer,
        effect: PRIMARY_EFFECT,
    });
    debug!("Archer {:?} casting at {:?}", archer, target);

    if rotating {
        return;
    }
    let Some(target_transform) = target.and_then(|entity| target_query.get(entity).ok()) else {
        return;
    };
    if let Some(rotate) = RotateToTarget::toward(
        transform.translation,
        target_transform.translation,
        config.attack.rotation_budget,
    ) {
        commands.entity(archer).insert(rotate);
    }
}

/// Turn archers toward their target until the rotation finishes.
pub fn rotate_to_target(
    mut commands: Commands,
    time: Res<Time>,
    config: Res<ArcherConfig>,
    mut query: Query<(Entity, &mut Transform, &mut RotateToTarget), With<Archer>>,
) {
    let dt = time.delta_secs();
    let tolerance = config.attack.rotation_tolerance_degrees.to_radians();

    for (entity, mut transform, mut rotate) in query.iter_mut() {
        let (rotation, done) = rotate.step(transform.rotation, dt, config.attack.rotation_rate, tolerance);
        transform.rotation = rotation;
        if done {
            commands.entity(entity).remove::<RotateToTarget>();
        }
    }
}

/// Tick attack sequences, releasing projectiles and clearing the lock.
pub fn tick_attack(
    mut commands: Commands,
    time: Res<Time>,
    config: Res<ArcherConfig>,
    mut archer_query: Query<(Entity, &mut AttackState, Option<&Children>), With<Archer>>,
    fire_point_query: Query<&GlobalTransform, With<FirePoint>>,
    mut launch_events: EventWriter<ProjectileLaunched>,
) {
    let dt = time.delta_secs();

    for (archer, mut attack, children) in archer_query.iter_mut() {
        // Captured before ticking; unlocking clears the target
        let target = attack.target;
        let effect = attack.effect;

        for signal in attack.tick(dt) {
            match signal {
                AttackSignal::ReleaseProjectile => {
                    let Some(target) = target else {
                        continue;
                    };
                    let fire_point = children.and_then(|children| {
                        children
                            .iter()
                            .find_map(|child| fire_point_query.get(*child).ok())
                    });
                    let Some(fire_point) = fire_point else {
                        error!("Archer {:?} has no FirePoint, projectile not launched", archer);
                        continue;
                    };
                    let Some(cast) = config.attack.effects.get(effect) else {
                        error!("{}", AttackError::UnknownEffect {
                            index: effect,
                            available: config.attack.effects.len(),
                        });
                        continue;
                    };

                    let mut factory = ProjectileCommands {
                        commands: &mut commands,
                    };
                    let projectile = factory.launch(
                        fire_point.compute_transform(),
                        target,
                        config.aim.offset(),
                        cast.projectile_speed,
                    );

                    debug!("{} released at {:?}", cast.name, target);
                    launch_events.send(ProjectileLaunched {
                        archer,
                        projectile,
                        target,
                    });
                }
                AttackSignal::Unlock => {
                    debug!("Archer {:?} unlocked", archer);
                }
            }
        }
    }
}

/// Light a glow on the archer for the length of the cast.
pub fn spawn_cast_glow(
    mut commands: Commands,
    config: Res<ArcherConfig>,
    mut cast_events: EventReader<CastStarted>,
) {
    for event in cast_events.read() {
        let duration = config
            .attack
            .effects
            .get(event.effect)
            .map_or(0.5, |effect| effect.cast_delay);

        let Some(mut archer) = commands.get_entity(event.archer) else {
            continue;
        };
        archer.with_children(|parent| {
            parent.spawn((
                CastGlow::new(duration),
                PointLight {
                    color: Color::srgb(1.0, 0.8, 0.4),
                    intensity: CAST_GLOW_INTENSITY,
                    range: 4.0,
                    shadows_enabled: false,
                    ..default()
                },
                Transform::from_xyz(0.0, 0.4, -0.4),
            ));
        });
    }
}

/// Fade cast glows and remove them once finished.
pub fn fade_cast_glow(
    mut commands: Commands,
    time: Res<Time>,
    mut glow_query: Query<(Entity, &mut CastGlow, &mut PointLight)>,
) {
    for (entity, mut glow, mut light) in glow_query.iter_mut() {
        glow.timer.tick(time.delta());
        light.intensity = CAST_GLOW_INTENSITY * glow.strength();
        if glow.timer.finished() {
            commands.entity(entity).despawn_recursive();
        }
    }
}

/// Start a hit flash on targets struck this frame.
pub fn flash_hit_targets(mut commands: Commands, mut hit_events: EventReader<ProjectileHit>) {
    for event in hit_events.read() {
        info!("Projectile hit {:?} at {:?}", event.target, event.position);
        if let Some(mut target) = commands.get_entity(event.target) {
            target.try_insert(HitFlash::default());
        }
    }
}

/// Animate hit flashes and restore the target's scale when done.
pub fn update_hit_flash(
    mut commands: Commands,
    time: Res<Time>,
    mut flash_query: Query<(Entity, &mut Transform, &mut HitFlash)>,
) {
    for (entity, mut transform, mut flash) in flash_query.iter_mut() {
        flash.timer.tick(time.delta());
        transform.scale = Vec3::splat(flash.scale());
        if flash.timer.finished() {
            transform.scale = Vec3::ONE;
            commands.entity(entity).remove::<HitFlash>();
        }
    }
}

/// Count released shots and landed hits.
pub fn tally_shots(
    mut tally: ResMut<ShotTally>,
    mut launch_events: EventReader<ProjectileLaunched>,
    mut hit_events: EventReader<ProjectileHit>,
) {
    for event in launch_events.read() {
        tally.shots += 1;
        debug!("Shot {} by {:?} at {:?}", tally.shots, event.archer, event.target);
    }
    tally.hits += hit_events.read().count() as u32;
}
