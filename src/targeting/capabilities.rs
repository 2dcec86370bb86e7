//! Engine capabilities the targeting logic depends on.
//!
//! Selector and gate only see these traits. The Bevy camera and the Rapier
//! query pipeline implement them at the boundary; tests implement them with
//! fixed values.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

/// A world point projected into screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    /// Logical pixels, origin at the top-left of the viewport
    pub position: Vec2,
    /// Distance in front of the camera along its view axis (negative = behind)
    pub depth: f32,
}

/// World-to-screen projection.
pub trait ProjectionSource {
    /// `None` when the point cannot be projected at all.
    fn world_to_screen(&self, world: Vec3) -> Option<ScreenPoint>;

    fn viewport_size(&self) -> Vec2;

    fn screen_center(&self) -> Vec2 {
        self.viewport_size() / 2.0
    }
}

/// Line-of-sight query against scene geometry.
pub trait OcclusionTester {
    /// True when something on the tested layers lies between the points.
    fn is_blocked(&self, from: Vec3, to: Vec3) -> bool;
}

/// Projection through a camera's view and clip matrices.
#[derive(Debug, Clone, Copy)]
pub struct CameraProjection {
    pub clip_from_view: Mat4,
    pub world_from_view: GlobalTransform,
    /// Logical pixels
    pub viewport: Vec2,
}

impl CameraProjection {
    /// Snapshot of a Bevy camera. Until a render target sizes the camera the
    /// viewport is zero and every point lands on the origin.
    pub fn from_camera(camera: &Camera, transform: &GlobalTransform) -> Self {
        Self {
            clip_from_view: camera.clip_from_view(),
            world_from_view: *transform,
            viewport: camera.logical_viewport_size().unwrap_or(Vec2::ZERO),
        }
    }
}

impl ProjectionSource for CameraProjection {
    fn world_to_screen(&self, world: Vec3) -> Option<ScreenPoint> {
        let clip_from_world = self.clip_from_view * self.world_from_view.compute_matrix().inverse();
        let ndc = clip_from_world.project_point3(world);
        if !ndc.x.is_finite() || !ndc.y.is_finite() {
            return None;
        }

        let depth = (world - self.world_from_view.translation()).dot(self.world_from_view.forward().as_vec3());
        let size = self.viewport;
        let position = Vec2::new((ndc.x + 1.0) * 0.5 * size.x, (1.0 - ndc.y) * 0.5 * size.y);
        Some(ScreenPoint { position, depth })
    }

    fn viewport_size(&self) -> Vec2 {
        self.viewport
    }
}

/// Segment cast through Rapier, restricted to a collision mask.
pub struct RapierOcclusion<'a> {
    pub context: &'a RapierContext,
    pub filter: QueryFilter<'a>,
}

impl<'a> RapierOcclusion<'a> {
    /// Only colliders whose memberships intersect `mask` can block; `ignore`
    /// (usually the archer) never blocks.
    pub fn new(context: &'a RapierContext, mask: u32, ignore: Entity) -> Self {
        let groups = CollisionGroups::new(Group::ALL, Group::from_bits_truncate(mask));
        Self {
            context,
            filter: QueryFilter::default().groups(groups).exclude_collider(ignore),
        }
    }
}

impl OcclusionTester for RapierOcclusion<'_> {
    fn is_blocked(&self, from: Vec3, to: Vec3) -> bool {
        let delta = to - from;
        let distance = delta.length();
        if distance <= f32::EPSILON {
            return false;
        }

        self.context
            .cast_ray(from, delta / distance, distance, true, self.filter)
            .is_some()
    }
}

/// Occlusion stand-in when no physics world exists: nothing blocks.
pub struct ClearSight;

impl OcclusionTester for ClearSight {
    fn is_blocked(&self, _from: Vec3, _to: Vec3) -> bool {
        false
    }
}
