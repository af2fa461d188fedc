//! Rivah Dash - A river-dodging boat arcade game
//!
//! Core modules:
//! - `sim`: Deterministic gameplay core (spawning, movement, collisions, run state)
//! - `session`: Scene flow (menu, game, about) and the session registry
//! - `assets`: Texture lookup contract and placeholder fallbacks
//! - `platform`: Host-facing snapshots and the browser binding
//! - `tuning`: Data-driven game balance

pub mod assets;
pub mod platform;
pub mod session;
pub mod sim;
pub mod tuning;

pub use assets::{AssetCatalog, TextureSet};
pub use session::{Registry, Scene, Session};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Base resolution (portrait, scaled to fit by the host)
    pub const SCREEN_WIDTH: f32 = 480.0;
    pub const SCREEN_HEIGHT: f32 = 800.0;

    /// Player movement speed for directional input (px/s)
    pub const PLAYER_SPEED: f32 = 200.0;
    /// Vertical speed multiplier in top-down mode
    pub const PLAYER_VERTICAL_FACTOR: f32 = 0.6;
    /// Player distance from bottom edge
    pub const PLAYER_BOTTOM_OFFSET: f32 = 80.0;

    /// Cosmetic tilt (degrees) and its smoothing factor per tick
    pub const TILT_MAX_DEG: f32 = 8.0;
    pub const TILT_LERP: f32 = 0.15;
    /// Pointer displacement to velocity (assumes ~60 fps frames)
    pub const DRAG_VELOCITY_SCALE: f32 = 60.0;

    /// Obstacle speed at run start (px/s)
    pub const BASE_SPEED: f32 = 200.0;
    /// Additional px/s per elapsed second
    pub const SPEED_GROWTH: f32 = 5.0;

    /// Obstacle spawn cadence
    pub const BASE_SPAWN_INTERVAL_MS: f32 = 1200.0;
    pub const MIN_SPAWN_INTERVAL_MS: f32 = 400.0;
    pub const SPAWN_INTERVAL_DECAY_MS: f32 = 30.0;
    /// Power-up spawn cadence
    pub const POWERUP_INTERVAL_MS: f32 = 2500.0;

    /// Entities are culled once below the screen by this much
    pub const CULL_MARGIN: f32 = 100.0;
    /// Spawn line above the top edge
    pub const SPAWN_Y: f32 = -50.0;
    /// Side spawns start this far outside the screen
    pub const SIDE_SPAWN_OFFSET: f32 = 50.0;

    /// 0.01 points per ms => 10 points per second
    pub const SCORE_PER_MS: f64 = 0.01;
    /// Magic oyster invincibility window
    pub const INVINCIBILITY_MS: f64 = 5000.0;
}

/// Linear interpolation from `a` toward `b` by factor `t`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(0.0, 8.0, 0.0), 0.0);
        assert_eq!(lerp(0.0, 8.0, 1.0), 8.0);
        assert!((lerp(0.0, 8.0, 0.15) - 1.2).abs() < 1e-6);
    }
}
