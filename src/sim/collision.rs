//! Overlap detection and collision resolution
//!
//! Detection is a plain axis-aligned box test over display-sized bodies,
//! the same bodies an arcade physics host would report. Resolution is the
//! part that carries game rules:
//!
//! - power-up while active: collect it (bonus, maybe invincibility)
//! - obstacle while invincible: smash it
//! - obstacle otherwise: game over (once)

use glam::Vec2;

use super::kind::{Category, EntityKind};
use super::state::{EntityId, GameEvent, RunPhase, RunState};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Strict overlap: touching edges do not count
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Entities currently overlapping the player, power-ups first, each by id
pub fn find_overlaps(state: &RunState) -> Vec<EntityId> {
    let player = Aabb::from_center(state.player.pos, state.player.size);
    state
        .power_ups
        .iter()
        .chain(state.obstacles.iter())
        .filter(|e| player.overlaps(&Aabb::from_center(e.pos, e.size())))
        .map(|e| e.id)
        .collect()
}

/// What an overlap callback did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OverlapOutcome {
    /// Unknown ids, destroyed entity, or run already over
    Ignored,
    Collected { kind: EntityKind, bonus: f64 },
    Smashed { kind: EntityKind },
    GameOver { score: u64 },
}

/// Resolve one player/entity overlap
pub fn on_overlap(state: &mut RunState, player_id: EntityId, other_id: EntityId) -> OverlapOutcome {
    if player_id != state.player.id || state.phase == RunPhase::GameOver {
        return OverlapOutcome::Ignored;
    }
    let Some(kind) = state.entity(other_id).map(|e| e.kind) else {
        // Already destroyed earlier this frame
        return OverlapOutcome::Ignored;
    };

    match kind.category() {
        Category::PowerUp => collect_power_up(state, other_id, kind),
        Category::Obstacle if state.is_invincible() => {
            state.remove_entity(other_id);
            log::debug!("Smashed {:?} #{} while invincible", kind, other_id.0);
            state.push_event(GameEvent::Smashed { id: other_id, kind });
            OverlapOutcome::Smashed { kind }
        }
        Category::Obstacle => end_run(state, kind),
    }
}

fn collect_power_up(state: &mut RunState, id: EntityId, kind: EntityKind) -> OverlapOutcome {
    state.remove_entity(id);
    let profile = kind.profile();
    state.score += profile.bonus;
    state.push_event(GameEvent::Collected {
        id,
        kind,
        bonus: profile.bonus,
    });

    if profile.magic {
        state.oyster_count += 1;
        let now = state.elapsed_ms;
        let duration = state.tuning.invincibility_ms;
        state.invincibility.activate(now, duration);
        let ends_at_ms = state.invincibility.ends_at_ms;
        state.push_event(GameEvent::InvincibilityStarted { ends_at_ms });
        log::debug!(
            "Magic oyster #{} collected, invincible until {:.0}ms",
            state.oyster_count,
            ends_at_ms
        );
    }

    OverlapOutcome::Collected {
        kind,
        bonus: profile.bonus,
    }
}

fn end_run(state: &mut RunState, kind: EntityKind) -> OverlapOutcome {
    state.phase = RunPhase::GameOver;
    state.timers.remove_all();
    state.player.vel = Vec2::ZERO;
    let score = state.display_score();
    log::info!(
        "Run {} over: hit {:?} after {:.1}s, score {}",
        state.run_id,
        kind,
        state.elapsed_sec(),
        score
    );
    state.push_event(GameEvent::GameOver { score });
    OverlapOutcome::GameOver { score }
}
