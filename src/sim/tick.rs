//! Per-frame simulation tick
//!
//! Advances the run clock and score, moves the player and every entity,
//! culls what has left the river, and drops an expired shield. Movement
//! always happens before culling.

use serde::{Deserialize, Serialize};

use super::player::update_player;
use super::state::{Entity, GameEvent, RunPhase, RunState};

/// Input state for a single tick
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Pointer/touch world x while dragging
    pub pointer_x: Option<f32>,
    /// Space or pointer press this frame
    pub confirm: bool,
    /// Idle/demo mode - autopilot steers
    pub autopilot: bool,
}

/// Advance the run by `delta_ms` of wall time
pub fn tick(state: &mut RunState, input: &TickInput, delta_ms: f32) {
    // Physics halts once the run is over
    if state.phase == RunPhase::GameOver {
        return;
    }
    let delta_ms = delta_ms.max(0.0);
    let dt = delta_ms / 1000.0;

    state.elapsed_ms += delta_ms as f64;
    state.score += delta_ms as f64 * state.tuning.score_per_ms;
    state.timers.advance(delta_ms);

    let steered;
    let input = if input.autopilot {
        steered = autopilot_input(state, input);
        &steered
    } else {
        input
    };
    update_player(&mut state.player, input, &state.tuning, dt);

    for entity in state.obstacles.iter_mut().chain(state.power_ups.iter_mut()) {
        entity.advance(dt);
    }
    cull_offscreen(state);

    if state.invincibility.expire(state.elapsed_ms) {
        log::debug!("Invincibility ended at {:.0}ms", state.elapsed_ms);
        state.push_event(GameEvent::InvincibilityEnded);
    }

    state.normalize_order();
}

/// Remove every entity below `screen_height + cull_margin`
pub fn cull_offscreen(state: &mut RunState) -> usize {
    let limit = state.tuning.screen_height + state.tuning.cull_margin;
    let on_screen = |e: &Entity| e.pos.y <= limit;
    let before = state.entity_count();
    state.obstacles.retain(on_screen);
    state.power_ups.retain(on_screen);
    before - state.entity_count()
}

/// Lookahead (px above the player) for threats worth dodging
const AUTOPILOT_LOOKAHEAD: f32 = 320.0;

/// Demo steering: dodge the nearest obstacle heading into the boat's lane,
/// otherwise drift under the nearest reachable power-up
pub fn autopilot_input(state: &RunState, input: &TickInput) -> TickInput {
    let player = &state.player;
    let lane_half = player.half_size().x + 12.0;
    let top = player.pos.y - player.half_size().y;

    let threat = state
        .obstacles
        .iter()
        .filter(|e| e.pos.y < player.pos.y && top - e.pos.y < AUTOPILOT_LOOKAHEAD)
        .filter(|e| {
            // Where the obstacle will be horizontally when it reaches us
            let eta = if e.vel.y > 0.0 {
                (top - e.pos.y) / e.vel.y
            } else {
                0.0
            };
            let future_x = e.pos.x + e.vel.x * eta;
            (future_x - player.pos.x).abs() < lane_half + e.size().x / 2.0
        })
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

    let target_x = if let Some(threat) = threat {
        // Dodge toward the roomier side
        let room_left = threat.pos.x;
        let room_right = state.tuning.screen_width - threat.pos.x;
        if room_left > room_right {
            threat.pos.x - threat.size().x / 2.0 - lane_half
        } else {
            threat.pos.x + threat.size().x / 2.0 + lane_half
        }
    } else if let Some(pickup) = state
        .power_ups
        .iter()
        .filter(|p| p.pos.y < player.pos.y)
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
    {
        pickup.pos.x
    } else {
        player.pos.x
    };

    let dead_zone = 4.0;
    TickInput {
        left: target_x < player.pos.x - dead_zone,
        right: target_x > player.pos.x + dead_zone,
        up: false,
        down: false,
        pointer_x: None,
        confirm: input.confirm,
        autopilot: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::kind::EntityKind;
    use crate::sim::spawn::Spawner;
    use crate::sim::state::{EntityId, Vehicle};
    use crate::tuning::Tuning;
    use glam::Vec2;
    use proptest::prelude::*;

    fn new_state() -> RunState {
        let tuning = Tuning::default();
        let spawner = Spawner::from_tuning(&tuning).unwrap();
        RunState::new(1, 11, Vehicle::Powerboat, tuning, spawner)
    }

    fn push_still(state: &mut RunState, kind: EntityKind, y: f32) -> EntityId {
        let id = state.next_entity_id();
        state
            .obstacles
            .push(Entity::new(id, kind, Vec2::new(100.0, y), Vec2::ZERO));
        id
    }

    #[test]
    fn test_score_accrues_ten_per_second() {
        let mut state = new_state();
        for _ in 0..100 {
            tick(&mut state, &TickInput::default(), 10.0);
        }
        assert!((state.score - 10.0).abs() < 1e-9);
        assert!((state.elapsed_ms - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_cull_boundary() {
        let mut state = new_state();
        let gone = push_still(&mut state, EntityKind::Log, 800.0 + 101.0);
        let kept = push_still(&mut state, EntityKind::Log, 800.0 + 99.0);
        tick(&mut state, &TickInput::default(), 16.0);
        assert!(state.entity(gone).is_none());
        assert!(state.entity(kept).is_some());
    }

    #[test]
    fn test_cull_sees_post_move_position() {
        let mut state = new_state();
        let id = state.next_entity_id();
        // 899 + 200 px/s * 0.1s = 919: culled in the same tick
        state.obstacles.push(Entity::new(
            id,
            EntityKind::Buoy,
            Vec2::new(100.0, 899.0),
            Vec2::new(0.0, 200.0),
        ));
        tick(&mut state, &TickInput::default(), 100.0);
        assert!(state.entity(id).is_none());
    }

    #[test]
    fn test_cull_ignores_x() {
        let mut state = new_state();
        let id = state.next_entity_id();
        state.power_ups.push(Entity::new(
            id,
            EntityKind::MagicOyster,
            Vec2::new(-500.0, 300.0),
            Vec2::ZERO,
        ));
        assert_eq!(cull_offscreen(&mut state), 0);
        state.power_ups[0].pos.y = 950.0;
        assert_eq!(cull_offscreen(&mut state), 1);
        assert_eq!(cull_offscreen(&mut state), 0);
    }

    #[test]
    fn test_invincibility_expires_without_trigger() {
        let mut state = new_state();
        state.invincibility.activate(0.0, 5000.0);
        for _ in 0..49 {
            tick(&mut state, &TickInput::default(), 100.0);
        }
        assert!(state.is_invincible());
        tick(&mut state, &TickInput::default(), 100.0);
        assert!(!state.is_invincible());
        assert!(!state.invincibility.active);
        assert!(state.events().contains(&GameEvent::InvincibilityEnded));
    }

    #[test]
    fn test_game_over_freezes_everything() {
        let mut state = new_state();
        push_still(&mut state, EntityKind::Log, 100.0);
        state.obstacles[0].vel = Vec2::new(0.0, 200.0);
        state.score = 5.0;
        state.phase = RunPhase::GameOver;
        tick(&mut state, &TickInput::default(), 1000.0);
        assert_eq!(state.score, 5.0);
        assert_eq!(state.elapsed_ms, 0.0);
        assert_eq!(state.obstacles[0].pos.y, 100.0);
    }

    #[test]
    fn test_autopilot_dodges_incoming_obstacle() {
        let mut state = new_state();
        let id = state.next_entity_id();
        // Log dead ahead, slightly right of center: dodge left (more room)
        state.obstacles.push(Entity::new(
            id,
            EntityKind::Log,
            Vec2::new(250.0, 550.0),
            Vec2::new(0.0, 200.0),
        ));
        let steer = autopilot_input(&state, &TickInput::default());
        assert!(steer.left && !steer.right);
    }

    #[test]
    fn test_autopilot_chases_power_up() {
        let mut state = new_state();
        let id = state.next_entity_id();
        state.power_ups.push(Entity::new(
            id,
            EntityKind::MagicOyster,
            Vec2::new(400.0, 300.0),
            Vec2::new(0.0, 200.0),
        ));
        let steer = autopilot_input(&state, &TickInput::default());
        assert!(steer.right && !steer.left);
    }

    proptest! {
        #[test]
        fn prop_score_monotonic_while_active(deltas in proptest::collection::vec(0.0f32..100.0, 1..60)) {
            let mut state = new_state();
            let mut last = state.score;
            for delta in deltas {
                tick(&mut state, &TickInput::default(), delta);
                prop_assert!(state.score >= last);
                last = state.score;
            }
        }

        #[test]
        fn prop_shield_holds_for_full_window(start in 0.0f64..10_000.0, probe in 0.0f64..4_999.0) {
            let mut state = new_state();
            state.elapsed_ms = start;
            state.invincibility.activate(start, 5000.0);
            state.elapsed_ms = start + probe;
            prop_assert!(state.is_invincible());
            state.elapsed_ms = start + 5000.0;
            prop_assert!(!state.is_invincible());
        }
    }
}
