//! Attack and rotation sequences as explicit state machines.
//!
//! Both are ticked once per frame with the frame's delta time. Neither ever
//! sleeps or runs off the main schedule; a sequence only ends by running to
//! completion or by its entity despawning.

use bevy::prelude::*;

use crate::archer::{heading_towards, CastEffect};
use crate::core::AttackError;

/// Where the attack sequence currently is.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum AttackPhase {
    #[default]
    Idle,
    /// Waiting for the cast delay before the projectile leaves the bow.
    Casting { remaining: f32, post_delay: f32 },
    /// Projectile released, waiting out the post-fire delay.
    Recovering { remaining: f32 },
}

/// Side effects the boundary must carry out after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackSignal {
    ReleaseProjectile,
    Unlock,
}

impl AttackPhase {
    pub fn is_idle(self) -> bool {
        matches!(self, AttackPhase::Idle)
    }

    /// Idle -> Casting. Rejected if a sequence is already running.
    pub fn begin(self, cast_delay: f32, post_delay: f32) -> Result<Self, AttackError> {
        if !self.is_idle() {
            return Err(AttackError::AlreadyAttacking);
        }
        Ok(AttackPhase::Casting {
            remaining: cast_delay,
            post_delay,
        })
    }

    /// Advance by `dt`, carrying leftover time across phase boundaries.
    ///
    /// A phase ends on the first tick where its accumulated time reaches its
    /// delay, so one long frame can release and unlock together.
    pub fn advance(self, dt: f32) -> (Self, Vec<AttackSignal>) {
        let mut phase = self;
        let mut budget = dt.max(0.0);
        let mut signals = Vec::new();

        loop {
            match phase {
                AttackPhase::Idle => break,
                AttackPhase::Casting { remaining, post_delay } => {
                    if budget < remaining {
                        phase = AttackPhase::Casting {
                            remaining: remaining - budget,
                            post_delay,
                        };
                        break;
                    }
                    budget -= remaining;
                    signals.push(AttackSignal::ReleaseProjectile);
                    phase = AttackPhase::Recovering { remaining: post_delay };
                }
                AttackPhase::Recovering { remaining } => {
                    if budget < remaining {
                        phase = AttackPhase::Recovering {
                            remaining: remaining - budget,
                        };
                        break;
                    }
                    budget -= remaining;
                    signals.push(AttackSignal::Unlock);
                    phase = AttackPhase::Idle;
                }
            }
        }

        (phase, signals)
    }
}

/// Attack sequence state for an archer.
///
/// Movement is locked for as long as the phase is not `Idle`.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq)]
pub struct AttackState {
    pub phase: AttackPhase,
    /// Cast effect used by the running sequence
    pub effect: usize,
    /// Target captured when the sequence started
    pub target: Option<Entity>,
}

impl AttackState {
    pub fn movement_locked(&self) -> bool {
        !self.phase.is_idle()
    }

    /// Accept a fire command.
    ///
    /// Requires an active target, an unlocked archer, and a configured
    /// effect. On success the archer is locked and the target captured.
    pub fn begin(
        &mut self,
        aim_active: bool,
        target: Option<Entity>,
        effect: usize,
        effects: &[CastEffect],
        post_delay: f32,
    ) -> Result<(), AttackError> {
        if self.movement_locked() {
            return Err(AttackError::AlreadyAttacking);
        }
        let target = match (aim_active, target) {
            (true, Some(target)) => target,
            _ => return Err(AttackError::NoActiveTarget),
        };
        let cast = effects.get(effect).ok_or(AttackError::UnknownEffect {
            index: effect,
            available: effects.len(),
        })?;

        self.phase = self.phase.begin(cast.cast_delay, post_delay)?;
        self.effect = effect;
        self.target = Some(target);
        Ok(())
    }

    /// Tick the sequence and report what the boundary must do.
    pub fn tick(&mut self, dt: f32) -> Vec<AttackSignal> {
        let (phase, signals) = self.phase.advance(dt);
        self.phase = phase;
        if phase.is_idle() && signals.contains(&AttackSignal::Unlock) {
            self.target = None;
        }
        signals
    }
}

/// Turn-to-face sequence started by a fire command.
///
/// Present on the archer only while turning; its presence keeps a second
/// rotation from starting.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct RotateToTarget {
    /// Time left in the rotation budget
    pub remaining: f32,
    /// Yaw-only heading toward the target
    pub heading: Quat,
}

impl RotateToTarget {
    /// Heading toward `target` on the ground plane. `None` if the target is
    /// straight above or below the archer.
    pub fn toward(archer: Vec3, target: Vec3, budget: f32) -> Option<Self> {
        heading_towards(target - archer).map(|heading| Self {
            remaining: budget,
            heading,
        })
    }

    /// One frame of turning. Returns the new rotation and whether the
    /// sequence has finished.
    ///
    /// Finishes without turning once the budget runs out or the heading is
    /// within `tolerance` radians; otherwise blends toward the heading by
    /// `dt * rate`.
    pub fn step(&mut self, rotation: Quat, dt: f32, rate: f32, tolerance: f32) -> (Quat, bool) {
        self.remaining -= dt;
        if self.remaining <= 0.0 || rotation.angle_between(self.heading) <= tolerance {
            return (rotation, true);
        }
        let t = (dt * rate).clamp(0.0, 1.0);
        (rotation.lerp(self.heading, t), false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: f32 = 1.0 / 60.0;

    fn effects() -> Vec<CastEffect> {
        vec![CastEffect {
            name: "Arrow".to_string(),
            cast_delay: 0.5,
            projectile_speed: 20.0,
        }]
    }

    fn target() -> Option<Entity> {
        Some(Entity::from_raw(7))
    }

    #[test]
    fn fire_locks_and_captures_target() {
        let mut state = AttackState::default();
        state.begin(true, target(), 0, &effects(), 0.2).unwrap();
        assert!(state.movement_locked());
        assert_eq!(state.target, target());
    }

    #[test]
    fn fire_while_locked_is_rejected() {
        let mut state = AttackState::default();
        state.begin(true, target(), 0, &effects(), 0.2).unwrap();
        let before = state;

        let err = state.begin(true, target(), 0, &effects(), 0.2).unwrap_err();
        assert_eq!(err, AttackError::AlreadyAttacking);
        assert_eq!(state, before);
    }

    #[test]
    fn fire_without_active_target_is_rejected() {
        let mut state = AttackState::default();
        assert_eq!(
            state.begin(false, target(), 0, &effects(), 0.2),
            Err(AttackError::NoActiveTarget)
        );
        assert_eq!(state.begin(true, None, 0, &effects(), 0.2), Err(AttackError::NoActiveTarget));
        assert!(!state.movement_locked());
    }

    #[test]
    fn unknown_effect_is_rejected() {
        let mut state = AttackState::default();
        assert_eq!(
            state.begin(true, target(), 3, &effects(), 0.2),
            Err(AttackError::UnknownEffect { index: 3, available: 1 })
        );
        assert!(!state.movement_locked());
    }

    #[test]
    fn release_then_unlock_exactly_once() {
        let mut state = AttackState::default();
        state.begin(true, target(), 0, &effects(), 0.2).unwrap();

        let mut elapsed = 0.0;
        let mut released_at = None;
        let mut unlocked_at = None;
        let mut releases = 0;
        let mut unlocks = 0;

        for _ in 0..120 {
            elapsed += FRAME;
            for signal in state.tick(FRAME) {
                match signal {
                    AttackSignal::ReleaseProjectile => {
                        releases += 1;
                        released_at = Some(elapsed);
                    }
                    AttackSignal::Unlock => {
                        unlocks += 1;
                        unlocked_at = Some(elapsed);
                    }
                }
            }
        }

        assert_eq!(releases, 1);
        assert_eq!(unlocks, 1);
        let released_at = released_at.unwrap();
        let unlocked_at = unlocked_at.unwrap();
        assert!(released_at >= 0.5 - 1e-4 && released_at < 0.5 + FRAME + 1e-4);
        assert!(unlocked_at >= 0.7 - 1e-4 && unlocked_at < 0.7 + FRAME + 1e-4);
        assert!(!state.movement_locked());
        assert_eq!(state.target, None);
    }

    #[test]
    fn long_frame_carries_time_across_phases() {
        let (phase, signals) = AttackPhase::Idle.begin(0.5, 0.2).unwrap().advance(1.0);
        assert_eq!(phase, AttackPhase::Idle);
        assert_eq!(signals, vec![AttackSignal::ReleaseProjectile, AttackSignal::Unlock]);
    }

    #[test]
    fn idle_advance_does_nothing() {
        let (phase, signals) = AttackPhase::Idle.advance(10.0);
        assert!(phase.is_idle());
        assert!(signals.is_empty());
    }

    #[test]
    fn rotation_ignores_target_height() {
        let rotate = RotateToTarget::toward(Vec3::ZERO, Vec3::new(5.0, 20.0, 0.0), 0.1).unwrap();
        let facing = rotate.heading * Vec3::NEG_Z;
        assert!(facing.abs_diff_eq(Vec3::X, 1e-5));
    }

    #[test]
    fn rotation_turns_toward_heading_within_budget() {
        let mut rotate = RotateToTarget::toward(Vec3::ZERO, Vec3::X, 0.1).unwrap();
        let start = Quat::IDENTITY;

        let (next, done) = rotate.step(start, FRAME, 20.0, 0.01);
        assert!(!done);
        assert!(next.angle_between(rotate.heading) < start.angle_between(rotate.heading));
    }

    #[test]
    fn rotation_stops_when_budget_runs_out() {
        let mut rotate = RotateToTarget::toward(Vec3::ZERO, Vec3::X, 0.1).unwrap();
        let mut rotation = Quat::IDENTITY;
        let mut frames = 0;
        loop {
            let (next, done) = rotate.step(rotation, FRAME, 20.0, 0.0);
            frames += 1;
            if done {
                assert_eq!(next, rotation);
                break;
            }
            rotation = next;
            assert!(frames < 100);
        }
        // 0.1s budget at 60 fps
        assert!(frames <= 7);
    }

    #[test]
    fn rotation_stops_within_tolerance() {
        let mut rotate = RotateToTarget::toward(Vec3::ZERO, Vec3::X, 10.0).unwrap();
        let almost = rotate.heading * Quat::from_rotation_y(0.001);
        let (next, done) = rotate.step(almost, FRAME, 20.0, 0.01);
        assert!(done);
        assert_eq!(next, almost);
    }
}
