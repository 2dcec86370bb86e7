//! Frame-rate independent transform smoothing.

use bevy::prelude::*;

/// Component that eases a transform toward a goal each frame.
///
/// Used by the follow camera: the camera system writes the goal, this
/// component does the easing.
#[derive(Component)]
pub struct SmoothTransform {
    /// Goal translation (None = leave translation alone)
    pub target_translation: Option<Vec3>,
    /// Goal rotation (None = leave rotation alone)
    pub target_rotation: Option<Quat>,
    /// Higher = snappier. Roughly the inverse of the settle time.
    pub translation_sharpness: f32,
    pub rotation_sharpness: f32,
}

impl Default for SmoothTransform {
    fn default() -> Self {
        Self {
            target_translation: None,
            target_rotation: None,
            translation_sharpness: 12.0,
            rotation_sharpness: 12.0,
        }
    }
}

impl SmoothTransform {
    pub fn new(translation_sharpness: f32, rotation_sharpness: f32) -> Self {
        Self {
            translation_sharpness,
            rotation_sharpness,
            ..default()
        }
    }
}

/// Fraction of the remaining distance to cover this frame.
///
/// `1 - e^(-sharpness * dt)` gives the same settle curve at any frame rate.
pub fn smoothing_factor(sharpness: f32, dt: f32) -> f32 {
    if sharpness <= 0.0 || dt <= 0.0 {
        return 0.0;
    }
    1.0 - (-sharpness * dt).exp()
}

/// System that eases transforms toward their goals.
pub fn update_smooth_transforms(
    time: Res<Time>,
    mut query: Query<(&mut Transform, &SmoothTransform)>,
) {
    let dt = time.delta_secs();

    for (mut transform, smooth) in query.iter_mut() {
        if let Some(goal) = smooth.target_translation {
            let t = smoothing_factor(smooth.translation_sharpness, dt);
            transform.translation = transform.translation.lerp(goal, t);
        }

        if let Some(goal) = smooth.target_rotation {
            let t = smoothing_factor(smooth.rotation_sharpness, dt);
            transform.rotation = transform.rotation.slerp(goal, t);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smoothing_factor_is_zero_without_time() {
        assert_eq!(smoothing_factor(10.0, 0.0), 0.0);
        assert_eq!(smoothing_factor(0.0, 0.016), 0.0);
    }

    #[test]
    fn smoothing_factor_is_frame_rate_independent() {
        // Two half steps cover the same ground as one full step.
        let full = smoothing_factor(8.0, 0.1);
        let half = smoothing_factor(8.0, 0.05);
        let two_halves = 1.0 - (1.0 - half) * (1.0 - half);
        assert!((full - two_halves).abs() < 1e-5);
    }

    #[test]
    fn smoothing_factor_stays_below_one() {
        let t = smoothing_factor(1000.0, 1.0);
        assert!(t <= 1.0 && t > 0.99);
    }
}
