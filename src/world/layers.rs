//! Collision groups shared by the arena, the archer, and the aim gate.

use bevy_rapier3d::prelude::Group;

/// Static level geometry. The default occlusion mask.
pub const SCENERY_GROUP: Group = Group::GROUP_1;

/// Aimable dummies.
pub const TARGET_GROUP: Group = Group::GROUP_2;

/// The archer's own collider.
pub const ARCHER_GROUP: Group = Group::GROUP_3;
