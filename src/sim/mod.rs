//! Deterministic gameplay core
//!
//! All gameplay rules live here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod gameplay;
pub mod kind;
pub mod player;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod timer;

pub use collision::{Aabb, OverlapOutcome, find_overlaps, on_overlap};
pub use difficulty::{current_speed, obstacle_interval_ms};
pub use gameplay::GameplayCore;
pub use kind::{Category, EntityKind, Facing, Flourish, KindProfile, SpawnRule};
pub use spawn::{Spawner, on_obstacle_spawn_tick, on_powerup_spawn_tick};
pub use state::{
    Entity, EntityId, GameEvent, Invincibility, Player, RunPhase, RunState, RunStatus, Vehicle,
};
pub use tick::{TickInput, autopilot_input, cull_offscreen, tick};
pub use timer::{SpawnTimer, SpawnTimers, TimerHandle, TimerKind};
