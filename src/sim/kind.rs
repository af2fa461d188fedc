//! Entity kinds and their static behavior table
//!
//! Everything a spawner needs to know about a kind lives in one
//! [`KindProfile`], looked up by exhaustive match.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Obstacle or power-up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Obstacle,
    PowerUp,
}

/// Every spawnable entity type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    // Obstacles
    Log,
    Buoy,
    Kayaker,
    Geese,
    Jetski,
    OspreyNest,
    Branch,
    // Power-ups
    MagicOyster,
    Oyster,
    Fireworks,
    Sunglasses,
}

/// Sprite orientation relative to its texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    #[default]
    Normal,
    Flipped,
}

/// Horizontal direction of travel (or of a texture's artwork)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading {
    Left,
    Right,
}

impl Heading {
    /// Flip the sprite when travel opposes the artwork
    pub fn facing_for_travel(self, travel: Heading) -> Facing {
        if self == travel {
            Facing::Normal
        } else {
            Facing::Flipped
        }
    }

    pub fn sign(self) -> f32 {
        match self {
            Heading::Left => -1.0,
            Heading::Right => 1.0,
        }
    }
}

/// Initial kinematics rule for a kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnRule {
    /// Random x within margins, fall straight down at the current speed
    Fall,
    /// Enter from the left or right edge and cross toward the other
    Crossing,
    /// Enter from top, left or right with boosted speed
    Jetski,
}

/// Cosmetic motion the host may animate (no kinematic effect)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Flourish {
    None,
    /// Yoyo'd angular bob
    Bob,
    /// Continuous random spin
    Spin,
    /// Tint cycle plus wiggle
    Shimmer,
}

/// Static per-kind data
#[derive(Debug, Clone, Copy)]
pub struct KindProfile {
    pub category: Category,
    /// Texture key the host loads
    pub texture: &'static str,
    /// Unscaled texture size in pixels
    pub base_size: Vec2,
    pub scale: f32,
    pub rule: SpawnRule,
    /// Direction the artwork faces
    pub artwork: Heading,
    /// Score bonus when collected (power-ups only)
    pub bonus: f64,
    /// Grants invincibility and counts as an oyster
    pub magic: bool,
    pub flourish: Flourish,
}

impl KindProfile {
    /// Displayed (and collision) size
    pub fn display_size(&self) -> Vec2 {
        self.base_size * self.scale
    }
}

const fn obstacle(
    texture: &'static str,
    w: f32,
    h: f32,
    scale: f32,
    rule: SpawnRule,
    artwork: Heading,
    flourish: Flourish,
) -> KindProfile {
    KindProfile {
        category: Category::Obstacle,
        texture,
        base_size: Vec2::new(w, h),
        scale,
        rule,
        artwork,
        bonus: 0.0,
        magic: false,
        flourish,
    }
}

const fn power_up(
    texture: &'static str,
    w: f32,
    h: f32,
    bonus: f64,
    magic: bool,
    flourish: Flourish,
) -> KindProfile {
    KindProfile {
        category: Category::PowerUp,
        texture,
        base_size: Vec2::new(w, h),
        scale: 0.4,
        rule: SpawnRule::Fall,
        artwork: Heading::Right,
        bonus,
        magic,
        flourish,
    }
}

static LOG: KindProfile = obstacle("log", 120.0, 30.0, 1.0, SpawnRule::Fall, Heading::Right, Flourish::Bob);
static BUOY: KindProfile = obstacle("buoy", 60.0, 90.0, 0.45, SpawnRule::Fall, Heading::Right, Flourish::Bob);
static KAYAKER: KindProfile = obstacle("kayaker", 160.0, 60.0, 0.4, SpawnRule::Crossing, Heading::Right, Flourish::None);
static GEESE: KindProfile = obstacle("geese", 100.0, 50.0, 1.0, SpawnRule::Crossing, Heading::Left, Flourish::None);
static JETSKI: KindProfile = obstacle("jetski", 80.0, 30.0, 0.9, SpawnRule::Jetski, Heading::Right, Flourish::Spin);
static OSPREY_NEST: KindProfile = obstacle("ospreyNest", 100.0, 80.0, 0.5, SpawnRule::Fall, Heading::Right, Flourish::Bob);
static BRANCH: KindProfile = obstacle("branch", 110.0, 40.0, 0.5, SpawnRule::Fall, Heading::Right, Flourish::Bob);

// Power-ups render at the player scale
static MAGIC_OYSTER: KindProfile = power_up("magicOyster", 100.0, 100.0, 100.0, true, Flourish::Shimmer);
static OYSTER: KindProfile = power_up("oyster", 50.0, 50.0, 50.0, false, Flourish::None);
static FIREWORKS: KindProfile = power_up("fireworks", 62.5, 62.5, 100.0, false, Flourish::None);
static SUNGLASSES: KindProfile = power_up("sunglasses", 75.0, 37.5, 75.0, false, Flourish::None);

impl EntityKind {
    pub const OBSTACLES: [EntityKind; 7] = [
        EntityKind::Log,
        EntityKind::Buoy,
        EntityKind::Kayaker,
        EntityKind::Geese,
        EntityKind::Jetski,
        EntityKind::OspreyNest,
        EntityKind::Branch,
    ];

    pub const POWER_UPS: [EntityKind; 4] = [
        EntityKind::MagicOyster,
        EntityKind::Oyster,
        EntityKind::Fireworks,
        EntityKind::Sunglasses,
    ];

    pub fn profile(self) -> &'static KindProfile {
        match self {
            EntityKind::Log => &LOG,
            EntityKind::Buoy => &BUOY,
            EntityKind::Kayaker => &KAYAKER,
            EntityKind::Geese => &GEESE,
            EntityKind::Jetski => &JETSKI,
            EntityKind::OspreyNest => &OSPREY_NEST,
            EntityKind::Branch => &BRANCH,
            EntityKind::MagicOyster => &MAGIC_OYSTER,
            EntityKind::Oyster => &OYSTER,
            EntityKind::Fireworks => &FIREWORKS,
            EntityKind::Sunglasses => &SUNGLASSES,
        }
    }

    #[inline]
    pub fn category(self) -> Category {
        self.profile().category
    }

    #[inline]
    pub fn is_obstacle(self) -> bool {
        self.category() == Category::Obstacle
    }
}
