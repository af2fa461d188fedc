//! Obstacle and power-up spawning
//!
//! A spawn picks a kind from the configured roster, then derives the
//! entity's position, velocity, scale and facing entirely from that kind's
//! [`SpawnRule`] and the current difficulty speed.

use glam::Vec2;
use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;

use super::difficulty::{current_speed, obstacle_interval_ms};
use super::kind::{Category, EntityKind, Heading, SpawnRule};
use super::state::{Entity, EntityId, GameEvent, RunPhase, RunState};
use super::timer::{TimerHandle, TimerKind};
use crate::tuning::{KindWeight, Tuning, TuningError};

/// Jetski entry edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum JetskiEdge {
    Top,
    Left,
    Right,
}

/// Kind selection tables for one run
#[derive(Debug, Clone)]
pub struct Spawner {
    obstacle_kinds: Vec<EntityKind>,
    obstacle_index: WeightedIndex<f32>,
    power_up_kinds: Vec<EntityKind>,
}

impl Spawner {
    pub fn from_tuning(tuning: &Tuning) -> Result<Self, TuningError> {
        Self::new(
            &tuning.obstacle_roster.weights(),
            tuning.powerup_roster.kinds(),
        )
    }

    pub fn new(obstacles: &[KindWeight], power_ups: &[EntityKind]) -> Result<Self, TuningError> {
        if obstacles.is_empty() {
            return Err(TuningError::EmptyRoster(Category::Obstacle));
        }
        if power_ups.is_empty() {
            return Err(TuningError::EmptyRoster(Category::PowerUp));
        }
        for entry in obstacles {
            if !entry.kind.is_obstacle() {
                return Err(TuningError::WrongCategory {
                    kind: entry.kind,
                    expected: Category::Obstacle,
                });
            }
        }
        if let Some(&kind) = power_ups.iter().find(|k| k.is_obstacle()) {
            return Err(TuningError::WrongCategory {
                kind,
                expected: Category::PowerUp,
            });
        }

        let obstacle_index = WeightedIndex::new(obstacles.iter().map(|w| w.weight))
            .map_err(|e| TuningError::InvalidWeights(e.to_string()))?;

        Ok(Self {
            obstacle_kinds: obstacles.iter().map(|w| w.kind).collect(),
            obstacle_index,
            power_up_kinds: power_ups.to_vec(),
        })
    }

    /// Weighted draw from the obstacle roster
    pub fn pick_obstacle<R: Rng + ?Sized>(&self, rng: &mut R) -> EntityKind {
        self.obstacle_kinds[self.obstacle_index.sample(rng)]
    }

    /// Uniform draw from the power-up roster
    pub fn pick_power_up<R: Rng + ?Sized>(&self, rng: &mut R) -> EntityKind {
        self.power_up_kinds[rng.random_range(0..self.power_up_kinds.len())]
    }
}

/// Obstacle timer callback. Returns the new entity, or `None` when the
/// handle is stale or the run has ended.
pub fn on_obstacle_spawn_tick(state: &mut RunState, handle: TimerHandle) -> Option<EntityId> {
    if !accepts(state, handle, TimerKind::Obstacle) {
        return None;
    }
    let kind = state.spawner.pick_obstacle(&mut state.rng);
    let id = spawn(state, kind);

    // Ramp difficulty: next obstacle arrives sooner
    let interval = obstacle_interval_ms(&state.tuning, state.elapsed_sec());
    state.timers.obstacle.interval_ms = interval;
    Some(id)
}

/// Power-up timer callback
pub fn on_powerup_spawn_tick(state: &mut RunState, handle: TimerHandle) -> Option<EntityId> {
    if !accepts(state, handle, TimerKind::PowerUp) {
        return None;
    }
    let kind = state.spawner.pick_power_up(&mut state.rng);
    Some(spawn(state, kind))
}

fn accepts(state: &RunState, handle: TimerHandle, expected: TimerKind) -> bool {
    if handle.kind != expected {
        log::warn!("{:?} handle passed to {:?} spawner", handle.kind, expected);
        return false;
    }
    if handle.run_id != state.run_id || !state.timers.accepts(handle) {
        log::debug!(
            "Ignoring stale {:?} timer (handle run {}, current run {})",
            handle.kind,
            handle.run_id,
            state.run_id
        );
        return false;
    }
    state.phase == RunPhase::Active
}

/// Create an entity of `kind` with its spawn-time kinematics
pub fn spawn(state: &mut RunState, kind: EntityKind) -> EntityId {
    let id = state.next_entity_id();
    let entity = build_entity(state, id, kind);
    log::debug!(
        "Spawned {:?} #{} at ({:.0}, {:.0}) vel ({:.0}, {:.0})",
        kind,
        id.0,
        entity.pos.x,
        entity.pos.y,
        entity.vel.x,
        entity.vel.y
    );
    match kind.category() {
        Category::Obstacle => state.obstacles.push(entity),
        Category::PowerUp => state.power_ups.push(entity),
    }
    state.push_event(GameEvent::Spawned { id, kind });
    id
}

fn build_entity(state: &mut RunState, id: EntityId, kind: EntityKind) -> Entity {
    let speed = current_speed(&state.tuning, state.elapsed_sec());
    let tuning = &state.tuning;
    let rng = &mut state.rng;
    let profile = kind.profile();
    let width = tuning.screen_width;

    let margin = match profile.category {
        Category::Obstacle => tuning.obstacle_margin,
        Category::PowerUp => tuning.powerup_margin,
    };
    let random_x = |rng: &mut rand_pcg::Pcg32| rng.random_range(margin..=width - margin);

    match profile.rule {
        SpawnRule::Fall => {
            let pos = Vec2::new(random_x(rng), tuning.spawn_y);
            Entity::new(id, kind, pos, Vec2::new(0.0, speed))
        }
        SpawnRule::Crossing => {
            let travel = if rng.random_bool(0.5) {
                Heading::Right
            } else {
                Heading::Left
            };
            let x = match travel {
                Heading::Right => -tuning.side_spawn_offset,
                Heading::Left => width + tuning.side_spawn_offset,
            };
            let drift = match kind {
                EntityKind::Geese => tuning.geese_speed,
                _ => tuning.kayaker_speed,
            };
            let vel = Vec2::new(travel.sign() * drift, speed);
            let mut entity = Entity::new(id, kind, Vec2::new(x, tuning.spawn_y), vel);
            entity.facing = profile.artwork.facing_for_travel(travel);
            entity
        }
        SpawnRule::Jetski => {
            let edge = match rng.random_range(0..3) {
                0 => JetskiEdge::Top,
                1 => JetskiEdge::Left,
                _ => JetskiEdge::Right,
            };
            let side_y = |rng: &mut rand_pcg::Pcg32| {
                rng.random_range(60.0..=(tuning.screen_height / 2.0).max(60.0))
            };
            let (pos, vel, travel) = match edge {
                JetskiEdge::Top => {
                    let drift = rng.random_range(-tuning.jetski_top_drift..=tuning.jetski_top_drift);
                    (
                        Vec2::new(random_x(rng), tuning.spawn_y),
                        Vec2::new(drift, speed + tuning.jetski_top_boost),
                        Heading::Right,
                    )
                }
                JetskiEdge::Left => (
                    Vec2::new(-tuning.side_spawn_offset, side_y(rng)),
                    Vec2::new(tuning.jetski_side_speed, speed * 0.5),
                    Heading::Right,
                ),
                JetskiEdge::Right => (
                    Vec2::new(width + tuning.side_spawn_offset, side_y(rng)),
                    Vec2::new(-tuning.jetski_side_speed, speed * 0.5),
                    Heading::Left,
                ),
            };
            let mut entity = Entity::new(id, kind, pos, vel);
            entity.facing = profile.artwork.facing_for_travel(travel);
            entity.spin_deg_per_sec =
                rng.random_range(-tuning.jetski_max_spin_deg..=tuning.jetski_max_spin_deg);
            entity
        }
    }
}
