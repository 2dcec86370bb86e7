//! Controller tuning loaded from an external RON file.
//!
//! Allows tweaking movement, aiming, and attack timing without recompilation.

use bevy::prelude::*;
use serde::Deserialize;
use std::fs;

use crate::core::ConfigError;

/// Default location of the tuning file.
pub const CONFIG_PATH: &str = "assets/data/archer/controller.ron";

/// Full controller configuration, loaded from [`CONFIG_PATH`].
#[derive(Resource, Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ArcherConfig {
    pub movement: MovementConfig,
    pub animation: AnimationConfig,
    pub aim: AimConfig,
    pub attack: AttackConfig,
    pub camera: CameraConfig,
    pub input: InputConfig,
}

/// Character movement tuning.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Horizontal speed in units per second
    pub velocity: f32,
    /// Fraction of the remaining turn covered each frame (0..1)
    pub desired_rotation_speed: f32,
    /// Squared input magnitude needed before the archer moves and turns
    pub allow_rotation_threshold: f32,
    /// Downward acceleration while airborne
    pub gravity: f32,
    /// Capsule half height and radius, used for the ground probe
    pub capsule_half_height: f32,
    pub capsule_radius: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            velocity: 9.0,
            desired_rotation_speed: 0.1,
            allow_rotation_threshold: 0.1,
            gravity: 9.81,
            capsule_half_height: 0.5,
            capsule_radius: 0.3,
        }
    }
}

/// Blend parameter smoothing times, in seconds.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub horizontal_smooth_time: f32,
    pub vertical_smooth_time: f32,
    /// Used for the magnitude blend while accelerating
    pub start_smooth_time: f32,
    /// Used for the magnitude blend while slowing down
    pub stop_smooth_time: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            horizontal_smooth_time: 0.2,
            vertical_smooth_time: 0.2,
            start_smooth_time: 0.3,
            stop_smooth_time: 0.15,
        }
    }
}

/// Aim gate and reticle tuning.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct AimConfig {
    /// Added to the target position before projection and line-of-sight checks
    pub offset: (f32, f32, f32),
    /// Reticle speed in pixels per second
    pub reticle_speed: f32,
    /// Collision group bits that block line of sight
    pub occlusion_mask: u32,
}

impl Default for AimConfig {
    fn default() -> Self {
        Self {
            offset: (0.0, 1.0, 0.0),
            reticle_speed: 3000.0,
            occlusion_mask: 0b0001,
        }
    }
}

impl AimConfig {
    pub fn offset(&self) -> Vec3 {
        Vec3::new(self.offset.0, self.offset.1, self.offset.2)
    }
}

/// One castable effect.
#[derive(Clone, Debug, Deserialize)]
pub struct CastEffect {
    pub name: String,
    /// Seconds from fire until the projectile leaves the fire point
    pub cast_delay: f32,
    /// Projectile speed in units per second
    pub projectile_speed: f32,
}

/// Attack sequence timing.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct AttackConfig {
    /// Maximum time spent turning toward the target
    pub rotation_budget: f32,
    /// Interpolation rate while turning (per second)
    pub rotation_rate: f32,
    /// Turning stops once the heading is within this angle of the target
    pub rotation_tolerance_degrees: f32,
    /// Extra lock time after the projectile is released
    pub post_fire_delay: f32,
    pub effects: Vec<CastEffect>,
}

impl Default for AttackConfig {
    fn default() -> Self {
        Self {
            rotation_budget: 0.1,
            rotation_rate: 20.0,
            rotation_tolerance_degrees: 0.5,
            post_fire_delay: 0.2,
            effects: vec![CastEffect {
                name: "Arrow".to_string(),
                cast_delay: 0.45,
                projectile_speed: 30.0,
            }],
        }
    }
}

/// Third-person follow camera.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub distance: f32,
    pub height: f32,
    /// Mouse sensitivity multiplier
    pub sensitivity: f32,
    pub invert_y: bool,
    /// Pitch limits in radians
    pub pitch_min: f32,
    pub pitch_max: f32,
    pub follow_sharpness: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            distance: 7.0,
            height: 1.6,
            sensitivity: 1.5,
            invert_y: false,
            pitch_min: -0.6,
            pitch_max: 0.9,
            follow_sharpness: 14.0,
        }
    }
}

/// Keyboard axis smoothing, in units per second.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub axis_sensitivity: f32,
    pub axis_gravity: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            axis_sensitivity: 3.0,
            axis_gravity: 3.0,
        }
    }
}

impl Default for ArcherConfig {
    fn default() -> Self {
        Self {
            movement: MovementConfig::default(),
            animation: AnimationConfig::default(),
            aim: AimConfig::default(),
            attack: AttackConfig::default(),
            camera: CameraConfig::default(),
            input: InputConfig::default(),
        }
    }
}

impl ArcherConfig {
    /// Parse and validate config from RON text.
    pub fn from_ron(path: &str, contents: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(contents).map_err(|e| ConfigError::Parse {
            path: path.to_string(),
            details: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a config file.
    pub fn load_from(path: &str) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_string(),
            details: e.to_string(),
        })?;
        Self::from_ron(path, &contents)
    }

    /// Load from [`CONFIG_PATH`], falling back to defaults on any error.
    pub fn load() -> Self {
        match Self::load_from(CONFIG_PATH) {
            Ok(config) => {
                info!("Loaded controller config from {}", CONFIG_PATH);
                config
            }
            Err(e @ ConfigError::Read { .. }) => {
                warn!("{}. Using defaults.", e);
                Self::default()
            }
            Err(e) => {
                error!("{}. Using defaults.", e);
                Self::default()
            }
        }
    }

    /// Reject values the controller cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let non_negative = [
            ("movement.velocity", self.movement.velocity),
            ("movement.gravity", self.movement.gravity),
            ("animation.horizontal_smooth_time", self.animation.horizontal_smooth_time),
            ("animation.vertical_smooth_time", self.animation.vertical_smooth_time),
            ("animation.start_smooth_time", self.animation.start_smooth_time),
            ("animation.stop_smooth_time", self.animation.stop_smooth_time),
            ("attack.rotation_budget", self.attack.rotation_budget),
            ("attack.rotation_tolerance_degrees", self.attack.rotation_tolerance_degrees),
            ("attack.post_fire_delay", self.attack.post_fire_delay),
        ];
        for (field, value) in non_negative {
            if !(value >= 0.0) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be non-negative, got {}", value),
                });
            }
        }

        if !(0.0..=1.0).contains(&self.movement.desired_rotation_speed) {
            return Err(ConfigError::Invalid {
                field: "movement.desired_rotation_speed",
                reason: format!("must be within 0..=1, got {}", self.movement.desired_rotation_speed),
            });
        }

        if self.aim.reticle_speed <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "aim.reticle_speed",
                reason: "must be positive".to_string(),
            });
        }

        if self.attack.effects.is_empty() {
            return Err(ConfigError::Invalid {
                field: "attack.effects",
                reason: "at least one cast effect is required".to_string(),
            });
        }

        for effect in &self.attack.effects {
            if effect.cast_delay < 0.0 || effect.projectile_speed <= 0.0 {
                return Err(ConfigError::Invalid {
                    field: "attack.effects",
                    reason: format!(
                        "effect '{}' needs a non-negative cast delay and positive speed",
                        effect.name
                    ),
                });
            }
        }

        Ok(())
    }
}

/// System to load the controller config at startup.
pub fn load_archer_config(mut commands: Commands) {
    let config = ArcherConfig::load();
    commands.insert_resource(config);
}
