//! Run state and core simulation types
//!
//! One [`RunState`] exists per playthrough. It is built fresh when a run
//! starts and dropped when the run ends; nothing here is global.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::kind::{Category, EntityKind, Facing};
use super::spawn::Spawner;
use super::timer::SpawnTimers;
use crate::tuning::Tuning;

/// Stable entity identifier, unique within a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub u32);

/// Coarse run phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    /// Active gameplay
    Active,
    /// Run ended (terminal)
    GameOver,
}

/// Phase including the invincible sub-state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    Active,
    Invincible,
    GameOver,
}

/// Temporary shield granted by the magic oyster
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Invincibility {
    pub active: bool,
    /// Run clock time at which the shield drops
    pub ends_at_ms: f64,
}

impl Invincibility {
    /// Start (or restart) the shield window at `now_ms`
    pub fn activate(&mut self, now_ms: f64, duration_ms: f64) {
        self.active = true;
        self.ends_at_ms = now_ms + duration_ms;
    }

    /// Shielded for every query in `[start, ends_at)`
    pub fn is_active_at(&self, now_ms: f64) -> bool {
        self.active && now_ms < self.ends_at_ms
    }

    pub fn remaining_ms(&self, now_ms: f64) -> f64 {
        if self.is_active_at(now_ms) {
            self.ends_at_ms - now_ms
        } else {
            0.0
        }
    }

    /// Drop the shield once its time is up; true on the transition
    pub fn expire(&mut self, now_ms: f64) -> bool {
        if self.active && now_ms >= self.ends_at_ms {
            self.active = false;
            return true;
        }
        false
    }
}

/// Player vehicle, chosen in the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Vehicle {
    #[default]
    Powerboat,
    Sailboat,
}

impl Vehicle {
    pub const ALL: [Vehicle; 2] = [Vehicle::Powerboat, Vehicle::Sailboat];

    /// Texture key, also the value stored in the session registry
    pub fn texture_key(self) -> &'static str {
        match self {
            Vehicle::Powerboat => "player",
            Vehicle::Sailboat => "sailboat",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.texture_key() == key)
    }

    /// Collision/display size in world pixels
    pub fn display_size(self) -> Vec2 {
        match self {
            Vehicle::Powerboat => Vec2::new(120.0, 240.0) * 0.4,
            Vehicle::Sailboat => Vec2::new(70.0, 130.0) * 0.72,
        }
    }
}

/// The player's boat
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: EntityId,
    pub vehicle: Vehicle,
    /// Center position
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    /// Cosmetic tilt in degrees
    pub tilt_deg: f32,
    /// x at the end of the previous tick (for drag tilt)
    pub last_x: f32,
}

impl Player {
    pub fn new(id: EntityId, vehicle: Vehicle, tuning: &Tuning) -> Self {
        let pos = Vec2::new(
            tuning.screen_width / 2.0,
            tuning.screen_height - tuning.player_bottom_offset,
        );
        Self {
            id,
            vehicle,
            pos,
            vel: Vec2::ZERO,
            size: vehicle.display_size(),
            tilt_deg: 0.0,
            last_x: pos.x,
        }
    }

    #[inline]
    pub fn half_size(&self) -> Vec2 {
        self.size / 2.0
    }
}

/// A spawned obstacle or power-up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    /// Center position
    pub pos: Vec2,
    /// Fixed at spawn time
    pub vel: Vec2,
    pub scale: f32,
    pub facing: Facing,
    /// Visual rotation (degrees), not part of collision
    pub angle_deg: f32,
    pub spin_deg_per_sec: f32,
}

impl Entity {
    pub fn new(id: EntityId, kind: EntityKind, pos: Vec2, vel: Vec2) -> Self {
        Self {
            id,
            kind,
            pos,
            vel,
            scale: kind.profile().scale,
            facing: Facing::Normal,
            angle_deg: 0.0,
            spin_deg_per_sec: 0.0,
        }
    }

    #[inline]
    pub fn category(&self) -> Category {
        self.kind.category()
    }

    /// Displayed (and collision) size
    pub fn size(&self) -> Vec2 {
        self.kind.profile().base_size * self.scale
    }

    /// Integrate position and visual spin
    pub fn advance(&mut self, dt: f32) {
        self.pos += self.vel * dt;
        if self.spin_deg_per_sec != 0.0 {
            self.angle_deg = (self.angle_deg + self.spin_deg_per_sec * dt).rem_euclid(360.0);
        }
    }
}

/// Notable things that happened, drained by the host for audio/visual cues
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    RunStarted { run_id: u32, vehicle: Vehicle },
    Spawned { id: EntityId, kind: EntityKind },
    Collected { id: EntityId, kind: EntityKind, bonus: f64 },
    Smashed { id: EntityId, kind: EntityKind },
    InvincibilityStarted { ends_at_ms: f64 },
    InvincibilityEnded,
    GameOver { score: u64 },
}

/// Complete state of one run (deterministic for a given seed and inputs)
#[derive(Debug, Clone)]
pub struct RunState {
    /// Distinguishes this run from every earlier one in the session
    pub run_id: u32,
    pub seed: u64,
    pub(crate) rng: Pcg32,
    /// Fractional score; display with [`RunState::display_score`]
    pub score: f64,
    /// Run clock, advances only while active
    pub elapsed_ms: f64,
    pub phase: RunPhase,
    pub invincibility: Invincibility,
    pub oyster_count: u32,
    pub player: Player,
    /// Live obstacles (sorted by id)
    pub obstacles: Vec<Entity>,
    /// Live power-ups (sorted by id)
    pub power_ups: Vec<Entity>,
    pub timers: SpawnTimers,
    pub spawner: Spawner,
    pub tuning: Tuning,
    events: Vec<GameEvent>,
    next_id: u32,
}

impl RunState {
    /// Start a new run
    pub fn new(run_id: u32, seed: u64, vehicle: Vehicle, tuning: Tuning, spawner: Spawner) -> Self {
        let timers = SpawnTimers::new(
            run_id,
            tuning.base_spawn_interval_ms,
            tuning.powerup_interval_ms,
        );
        let player = Player::new(EntityId(1), vehicle, &tuning);
        let mut state = Self {
            run_id,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            score: 0.0,
            elapsed_ms: 0.0,
            phase: RunPhase::Active,
            invincibility: Invincibility::default(),
            oyster_count: 0,
            player,
            obstacles: Vec::new(),
            power_ups: Vec::new(),
            timers,
            spawner,
            tuning,
            events: Vec::new(),
            next_id: 2,
        };
        state.push_event(GameEvent::RunStarted { run_id, vehicle });
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    #[inline]
    pub fn elapsed_sec(&self) -> f32 {
        (self.elapsed_ms / 1000.0) as f32
    }

    /// Score as shown to the player
    pub fn display_score(&self) -> u64 {
        self.score.max(0.0).floor() as u64
    }

    pub fn is_invincible(&self) -> bool {
        self.phase == RunPhase::Active && self.invincibility.is_active_at(self.elapsed_ms)
    }

    pub fn status(&self) -> RunStatus {
        match self.phase {
            RunPhase::GameOver => RunStatus::GameOver,
            RunPhase::Active if self.is_invincible() => RunStatus::Invincible,
            RunPhase::Active => RunStatus::Active,
        }
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.obstacles
            .iter()
            .chain(self.power_ups.iter())
            .find(|e| e.id == id)
    }

    /// Remove an entity from whichever collection holds it
    pub fn remove_entity(&mut self, id: EntityId) -> Option<Entity> {
        if let Some(i) = self.obstacles.iter().position(|e| e.id == id) {
            return Some(self.obstacles.remove(i));
        }
        if let Some(i) = self.power_ups.iter().position(|e| e.id == id) {
            return Some(self.power_ups.remove(i));
        }
        None
    }

    pub fn entity_count(&self) -> usize {
        self.obstacles.len() + self.power_ups.len()
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Ensure entities are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.obstacles.sort_by_key(|e| e.id);
        self.power_ups.sort_by_key(|e| e.id);
    }
}
