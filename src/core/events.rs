//! Global events used for cross-system communication.
//!
//! The attack sequencer and projectiles announce what happened through these
//! events, so presentation (cast glow, hit flashes, logging) stays decoupled
//! from the state machines that produce them.

use bevy::prelude::*;

/// Sent when a fire command is accepted and the cast begins.
#[derive(Event, Debug, Clone, Copy)]
pub struct CastStarted {
    /// The archer that started casting
    pub archer: Entity,
    /// Index into the configured cast effects
    pub effect: usize,
}

/// Sent when the cast delay elapses and a projectile leaves the fire point.
#[derive(Event, Debug, Clone, Copy)]
pub struct ProjectileLaunched {
    pub archer: Entity,
    pub projectile: Entity,
    pub target: Entity,
}

/// Sent when a homing projectile reaches its target.
#[derive(Event, Debug, Clone, Copy)]
pub struct ProjectileHit {
    pub projectile: Entity,
    pub target: Entity,
    /// World position of the impact
    pub position: Vec3,
}

/// Sent when the aim gate's active-target flag flips.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AimChanged {
    pub target: Entity,
    pub active: bool,
}
