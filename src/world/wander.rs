//! Slow random drift for target dummies.

use bevy::prelude::*;
use rand::Rng;

/// Wander inside a circle around `anchor`, picking a new goal on arrival.
#[derive(Component, Debug, Clone)]
pub struct Drifting {
    pub anchor: Vec3,
    pub radius: f32,
    pub speed: f32,
    pub goal: Vec3,
}

impl Drifting {
    pub fn new(anchor: Vec3, radius: f32, speed: f32) -> Self {
        Self {
            anchor,
            radius,
            speed,
            goal: anchor,
        }
    }

    /// Random point on the ground plane within `radius` of the anchor.
    pub fn pick_goal(&self, rng: &mut impl Rng) -> Vec3 {
        let angle = rng.gen_range(0.0..std::f32::consts::TAU);
        let distance = self.radius * rng.gen_range(0.0_f32..1.0).sqrt();
        self.anchor + Vec3::new(angle.cos() * distance, 0.0, angle.sin() * distance)
    }

    /// Move from `position` toward the goal. Returns the new position and
    /// whether the goal was reached.
    pub fn step(&self, position: Vec3, dt: f32) -> (Vec3, bool) {
        let to_goal = self.goal - position;
        let distance = to_goal.length();
        let max_step = self.speed * dt;
        if distance <= max_step {
            (self.goal, true)
        } else {
            (position + to_goal / distance * max_step, false)
        }
    }
}

/// Drift every dummy toward its goal.
pub fn drift_targets(time: Res<Time>, mut query: Query<(&mut Transform, &mut Drifting)>) {
    let dt = time.delta_secs();
    let mut rng = rand::thread_rng();

    for (mut transform, mut drifting) in query.iter_mut() {
        let (position, arrived) = drifting.step(transform.translation, dt);
        transform.translation = position;
        if arrived {
            drifting.goal = drifting.pick_goal(&mut rng);
        }
    }
}
