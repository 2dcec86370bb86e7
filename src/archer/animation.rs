//! Animation blend parameters.
//!
//! The movement driver writes three damped blend values (strafe, forward,
//! overall magnitude) and one-shot triggers through [`AnimationSink`]. The
//! archer's [`ArcherAnimator`] is the sink; the body-lean system below turns
//! those values into something visible on the placeholder mesh.

use bevy::prelude::*;

use super::components::{Archer, ArcherBody};

/// Named blend parameters driven by the movement driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlendParam {
    /// Strafe axis (left negative)
    InputX,
    /// Forward axis (back negative)
    InputZ,
    /// Squared input magnitude
    InputMagnitude,
}

impl BlendParam {
    /// Valid range for the parameter's value.
    pub fn range(self) -> (f32, f32) {
        match self {
            BlendParam::InputX | BlendParam::InputZ => (-1.0, 1.0),
            BlendParam::InputMagnitude => (0.0, 1.0),
        }
    }
}

/// One-shot animation triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimTrigger {
    Attack,
}

/// Anything that accepts animation parameters.
pub trait AnimationSink {
    /// Move `param` toward `value`, settling over roughly `damp_time` seconds.
    fn set_float(&mut self, param: BlendParam, value: f32, damp_time: f32, dt: f32);

    /// Snap every blend value to rest.
    fn reset(&mut self);

    fn trigger(&mut self, trigger: AnimTrigger);
}

/// Critically damped spring toward `target`.
///
/// Returns the new value and writes the new velocity. Never overshoots the
/// target when approaching it.
pub fn smooth_damp(current: f32, target: f32, velocity: &mut f32, smooth_time: f32, dt: f32) -> f32 {
    if dt <= 0.0 {
        return current;
    }
    let smooth_time = smooth_time.max(0.0001);
    let omega = 2.0 / smooth_time;
    let x = omega * dt;
    let decay = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let change = current - target;
    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * decay;
    let mut output = target + (change + temp) * decay;

    if (target - current > 0.0) == (output > target) {
        output = target;
        *velocity = 0.0;
    }
    output
}

/// A blend value with its spring velocity.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DampedFloat {
    pub value: f32,
    pub velocity: f32,
}

impl DampedFloat {
    pub fn damp_toward(&mut self, target: f32, smooth_time: f32, dt: f32, range: (f32, f32)) {
        self.value = smooth_damp(self.value, target, &mut self.velocity, smooth_time, dt)
            .clamp(range.0, range.1);
    }
}

/// Blend values and pending triggers for the archer.
#[derive(Component, Debug, Default, Clone)]
pub struct ArcherAnimator {
    pub input_x: DampedFloat,
    pub input_z: DampedFloat,
    pub input_magnitude: DampedFloat,
    pending: Vec<AnimTrigger>,
}

impl ArcherAnimator {
    pub fn get(&self, param: BlendParam) -> f32 {
        match param {
            BlendParam::InputX => self.input_x.value,
            BlendParam::InputZ => self.input_z.value,
            BlendParam::InputMagnitude => self.input_magnitude.value,
        }
    }

    /// Take the triggers fired since the last call.
    pub fn drain_triggers(&mut self) -> Vec<AnimTrigger> {
        std::mem::take(&mut self.pending)
    }
}

impl AnimationSink for ArcherAnimator {
    fn set_float(&mut self, param: BlendParam, value: f32, damp_time: f32, dt: f32) {
        let slot = match param {
            BlendParam::InputX => &mut self.input_x,
            BlendParam::InputZ => &mut self.input_z,
            BlendParam::InputMagnitude => &mut self.input_magnitude,
        };
        slot.damp_toward(value, damp_time, dt, param.range());
    }

    fn reset(&mut self) {
        self.input_x = DampedFloat::default();
        self.input_z = DampedFloat::default();
        self.input_magnitude = DampedFloat::default();
    }

    fn trigger(&mut self, trigger: AnimTrigger) {
        self.pending.push(trigger);
    }
}

/// Draw-back pose timer started by the attack trigger.
#[derive(Component, Default)]
pub struct DrawPose {
    pub remaining: f32,
}

const DRAW_POSE_SECS: f32 = 0.4;

/// Lean the body with the blend values and pulse it on attack.
pub fn animate_archer_body(
    time: Res<Time>,
    mut archer_query: Query<(&mut ArcherAnimator, &mut DrawPose, &Children), With<Archer>>,
    mut body_query: Query<&mut Transform, With<ArcherBody>>,
) {
    let dt = time.delta_secs();

    for (mut animator, mut pose, children) in archer_query.iter_mut() {
        if animator.drain_triggers().contains(&AnimTrigger::Attack) {
            pose.remaining = DRAW_POSE_SECS;
        }
        pose.remaining = (pose.remaining - dt).max(0.0);

        let forward_lean = animator.input_z.value * animator.input_magnitude.value * 0.25;
        let side_lean = -animator.input_x.value * animator.input_magnitude.value * 0.15;
        let draw = pose.remaining / DRAW_POSE_SECS;

        for child in children.iter() {
            let Ok(mut body) = body_query.get_mut(*child) else {
                continue;
            };
            body.rotation = Quat::from_euler(EulerRot::XYZ, -forward_lean, 0.0, side_lean);
            body.scale = Vec3::new(1.0 + draw * 0.1, 1.0 - draw * 0.05, 1.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smooth_damp_approaches_without_overshoot() {
        let mut velocity = 0.0;
        let mut value = 0.0;
        let mut previous = value;
        for _ in 0..200 {
            value = smooth_damp(value, 1.0, &mut velocity, 0.2, 1.0 / 60.0);
            assert!(value >= previous);
            assert!(value <= 1.0);
            previous = value;
        }
        assert!((value - 1.0).abs() < 1e-3);
    }

    #[test]
    fn shorter_smooth_time_settles_faster() {
        let mut fast_velocity = 0.0;
        let mut slow_velocity = 0.0;
        let fast = smooth_damp(0.0, 1.0, &mut fast_velocity, 0.15, 0.05);
        let slow = smooth_damp(0.0, 1.0, &mut slow_velocity, 0.3, 0.05);
        assert!(fast > slow);
    }

    #[test]
    fn set_float_clamps_to_parameter_range() {
        let mut animator = ArcherAnimator::default();
        for _ in 0..100 {
            animator.set_float(BlendParam::InputMagnitude, 2.0, 0.01, 0.1);
            animator.set_float(BlendParam::InputX, -3.0, 0.01, 0.1);
        }
        assert_eq!(animator.get(BlendParam::InputMagnitude), 1.0);
        assert_eq!(animator.get(BlendParam::InputX), -1.0);
    }

    #[test]
    fn reset_and_triggers() {
        let mut animator = ArcherAnimator::default();
        animator.set_float(BlendParam::InputZ, 1.0, 0.1, 0.1);
        animator.trigger(AnimTrigger::Attack);
        animator.reset();

        assert_eq!(animator.get(BlendParam::InputZ), 0.0);
        assert_eq!(animator.input_z.velocity, 0.0);
        assert_eq!(animator.drain_triggers(), vec![AnimTrigger::Attack]);
        assert!(animator.drain_triggers().is_empty());
    }
}
