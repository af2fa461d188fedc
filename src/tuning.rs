//! Data-driven game balance
//!
//! Every gameplay constant can be overridden from JSON. Missing fields fall
//! back to the defaults in [`crate::consts`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::{Category, EntityKind};

/// Errors raised while loading or validating a [`Tuning`]
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
    #[error("{0:?} roster has no kinds")]
    EmptyRoster(Category),
    #[error("{kind:?} cannot appear in the {expected:?} roster")]
    WrongCategory { kind: EntityKind, expected: Category },
    #[error("invalid spawn weights: {0}")]
    InvalidWeights(String),
}

/// How the player boat is steered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlScheme {
    /// Horizontal only, y locked near the bottom, cosmetic tilt
    #[default]
    Locked,
    /// Free movement on both axes
    TopDown,
}

/// A single weighted roster entry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KindWeight {
    pub kind: EntityKind,
    pub weight: f32,
}

/// Which obstacles can spawn and how often
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "variant")]
pub enum ObstacleRoster {
    /// Uniform over log, buoy, kayaker, geese, jetski
    Classic,
    /// All seven obstacles, kayaker reserved 20%
    #[default]
    Full,
    Custom { weights: Vec<KindWeight> },
}

/// Share of obstacle spawns reserved for kayakers in the full roster
pub const KAYAKER_SHARE: f32 = 0.2;

impl ObstacleRoster {
    /// Resolve the roster to explicit weights
    pub fn weights(&self) -> Vec<KindWeight> {
        use EntityKind::*;
        match self {
            ObstacleRoster::Classic => [Log, Buoy, Kayaker, Geese, Jetski]
                .into_iter()
                .map(|kind| KindWeight { kind, weight: 1.0 })
                .collect(),
            ObstacleRoster::Full => {
                let others = [Log, Buoy, Geese, Jetski, OspreyNest, Branch];
                let share = (1.0 - KAYAKER_SHARE) / others.len() as f32;
                std::iter::once(KindWeight {
                    kind: Kayaker,
                    weight: KAYAKER_SHARE,
                })
                .chain(others.into_iter().map(|kind| KindWeight { kind, weight: share }))
                .collect()
            }
            ObstacleRoster::Custom { weights } => weights.clone(),
        }
    }
}

/// Which power-ups can spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerUpRoster {
    /// Oyster, fireworks, sunglasses: score bonuses only
    Classic,
    /// Always the magic oyster
    #[default]
    MagicOyster,
}

impl PowerUpRoster {
    pub fn kinds(&self) -> &'static [EntityKind] {
        match self {
            PowerUpRoster::Classic => &[
                EntityKind::Oyster,
                EntityKind::Fireworks,
                EntityKind::Sunglasses,
            ],
            PowerUpRoster::MagicOyster => &[EntityKind::MagicOyster],
        }
    }
}

/// Game balance parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === World ===
    pub screen_width: f32,
    pub screen_height: f32,
    pub cull_margin: f32,

    // === Player ===
    pub control: ControlScheme,
    pub player_speed: f32,
    pub vertical_factor: f32,
    pub player_bottom_offset: f32,
    pub tilt_max_deg: f32,
    pub tilt_lerp: f32,

    // === Difficulty ===
    pub base_speed: f32,
    pub speed_growth: f32,
    pub base_spawn_interval_ms: f32,
    pub min_spawn_interval_ms: f32,
    pub spawn_interval_decay_ms: f32,
    pub powerup_interval_ms: f32,

    // === Spawning ===
    pub spawn_y: f32,
    pub side_spawn_offset: f32,
    pub obstacle_margin: f32,
    pub powerup_margin: f32,
    pub kayaker_speed: f32,
    pub geese_speed: f32,
    pub jetski_side_speed: f32,
    pub jetski_top_boost: f32,
    pub jetski_top_drift: f32,
    pub jetski_max_spin_deg: f32,
    pub obstacle_roster: ObstacleRoster,
    pub powerup_roster: PowerUpRoster,

    // === Scoring ===
    pub score_per_ms: f64,
    pub invincibility_ms: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            cull_margin: CULL_MARGIN,

            control: ControlScheme::Locked,
            player_speed: PLAYER_SPEED,
            vertical_factor: PLAYER_VERTICAL_FACTOR,
            player_bottom_offset: PLAYER_BOTTOM_OFFSET,
            tilt_max_deg: TILT_MAX_DEG,
            tilt_lerp: TILT_LERP,

            base_speed: BASE_SPEED,
            speed_growth: SPEED_GROWTH,
            base_spawn_interval_ms: BASE_SPAWN_INTERVAL_MS,
            min_spawn_interval_ms: MIN_SPAWN_INTERVAL_MS,
            spawn_interval_decay_ms: SPAWN_INTERVAL_DECAY_MS,
            powerup_interval_ms: POWERUP_INTERVAL_MS,

            spawn_y: SPAWN_Y,
            side_spawn_offset: SIDE_SPAWN_OFFSET,
            obstacle_margin: 40.0,
            powerup_margin: 20.0,
            kayaker_speed: 120.0,
            geese_speed: 120.0,
            jetski_side_speed: 250.0,
            jetski_top_boost: 50.0,
            jetski_top_drift: 150.0,
            jetski_max_spin_deg: 540.0,
            obstacle_roster: ObstacleRoster::Full,
            powerup_roster: PowerUpRoster::MagicOyster,

            score_per_ms: SCORE_PER_MS,
            invincibility_ms: INVINCIBILITY_MS,
        }
    }
}

impl Tuning {
    /// The earlier feature set: top-down steering, five obstacles, slow geese,
    /// classic score-only power-ups
    pub fn classic() -> Self {
        Self {
            control: ControlScheme::TopDown,
            geese_speed: 60.0,
            obstacle_roster: ObstacleRoster::Classic,
            powerup_roster: PowerUpRoster::Classic,
            ..Self::default()
        }
    }

    /// Parse and validate tuning from JSON
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        log::info!("Loaded tuning ({:?} obstacles)", tuning.obstacle_roster);
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check ranges and rosters
    pub fn validate(&self) -> Result<(), TuningError> {
        positive("screen_width", self.screen_width)?;
        positive("screen_height", self.screen_height)?;
        positive("player_speed", self.player_speed)?;
        positive("base_speed", self.base_speed)?;
        positive("base_spawn_interval_ms", self.base_spawn_interval_ms)?;
        positive("min_spawn_interval_ms", self.min_spawn_interval_ms)?;
        positive("powerup_interval_ms", self.powerup_interval_ms)?;
        positive("invincibility_ms", self.invincibility_ms as f32)?;
        non_negative("speed_growth", self.speed_growth)?;
        non_negative("spawn_interval_decay_ms", self.spawn_interval_decay_ms)?;
        non_negative("cull_margin", self.cull_margin)?;
        non_negative("score_per_ms", self.score_per_ms as f32)?;
        non_negative("kayaker_speed", self.kayaker_speed)?;
        non_negative("geese_speed", self.geese_speed)?;
        non_negative("jetski_side_speed", self.jetski_side_speed)?;
        non_negative("jetski_top_boost", self.jetski_top_boost)?;
        // Sampled as symmetric ranges at spawn
        non_negative("jetski_top_drift", self.jetski_top_drift)?;
        non_negative("jetski_max_spin_deg", self.jetski_max_spin_deg)?;

        if self.min_spawn_interval_ms > self.base_spawn_interval_ms {
            return Err(TuningError::Invalid {
                field: "min_spawn_interval_ms",
                reason: format!(
                    "{} exceeds base interval {}",
                    self.min_spawn_interval_ms, self.base_spawn_interval_ms
                ),
            });
        }
        if !(0.0..=1.0).contains(&self.tilt_lerp) {
            return Err(TuningError::Invalid {
                field: "tilt_lerp",
                reason: format!("{} is outside [0, 1]", self.tilt_lerp),
            });
        }
        if self.obstacle_margin * 2.0 >= self.screen_width {
            return Err(TuningError::Invalid {
                field: "obstacle_margin",
                reason: "margins leave no room to spawn".to_string(),
            });
        }
        if self.powerup_margin * 2.0 >= self.screen_width {
            return Err(TuningError::Invalid {
                field: "powerup_margin",
                reason: "margins leave no room to spawn".to_string(),
            });
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(TuningError::Invalid {
            field,
            reason: format!("{value} must be positive"),
        })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(TuningError::Invalid {
            field,
            reason: format!("{value} must not be negative"),
        })
    }
}
