//! Combat presentation components.

use bevy::prelude::*;

/// Glow shown around the archer while a cast is charging.
#[derive(Component)]
pub struct CastGlow {
    pub timer: Timer,
}

impl CastGlow {
    pub fn new(duration: f32) -> Self {
        Self {
            timer: Timer::from_seconds(duration.max(0.01), TimerMode::Once),
        }
    }

    /// 1.0 when just started, 0.0 when finished.
    pub fn strength(&self) -> f32 {
        1.0 - self.timer.fraction()
    }
}

/// Brief scale pop on a target that was just hit.
#[derive(Component)]
pub struct HitFlash {
    pub timer: Timer,
}

impl Default for HitFlash {
    fn default() -> Self {
        Self {
            timer: Timer::from_seconds(0.2, TimerMode::Once),
        }
    }
}

impl HitFlash {
    /// Scale multiplier for the current point in the flash.
    pub fn scale(&self) -> f32 {
        1.0 + 0.3 * (1.0 - self.timer.fraction())
    }
}

/// Shots released and hits landed this session.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ShotTally {
    pub shots: u32,
    pub hits: u32,
}

impl ShotTally {
    /// Hits per shot, `None` before the first shot.
    pub fn accuracy(&self) -> Option<f32> {
        (self.shots > 0).then(|| self.hits as f32 / self.shots as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn cast_glow_fades_out() {
        let mut glow = CastGlow::new(0.5);
        assert_eq!(glow.strength(), 1.0);
        glow.timer.tick(Duration::from_millis(250));
        assert!((glow.strength() - 0.5).abs() < 1e-4);
        glow.timer.tick(Duration::from_millis(500));
        assert_eq!(glow.strength(), 0.0);
        assert!(glow.timer.finished());
    }

    #[test]
    fn hit_flash_settles_back_to_unit_scale() {
        let mut flash = HitFlash::default();
        assert!(flash.scale() > 1.0);
        flash.timer.tick(Duration::from_secs(1));
        assert_eq!(flash.scale(), 1.0);
    }

    #[test]
    fn accuracy_waits_for_the_first_shot() {
        assert_eq!(ShotTally::default().accuracy(), None);
        let tally = ShotTally { shots: 4, hits: 3 };
        assert_eq!(tally.accuracy(), Some(0.75));
    }
}
