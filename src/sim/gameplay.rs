//! Engine-independent gameplay facade
//!
//! A host drives [`GameplayCore`] through four callbacks: a frame tick, the
//! two spawn timers, and player overlaps. [`GameplayCore::step`] bundles one
//! host frame for hosts without their own timer or overlap service.

use super::collision::{OverlapOutcome, find_overlaps, on_overlap};
use super::spawn::{Spawner, on_obstacle_spawn_tick, on_powerup_spawn_tick};
use super::state::{EntityId, GameEvent, RunPhase, RunState, Vehicle};
use super::tick::{TickInput, tick};
use super::timer::{TimerHandle, TimerKind};
use crate::tuning::{Tuning, TuningError};

/// Owns the state of the current run
#[derive(Debug, Clone)]
pub struct GameplayCore {
    state: RunState,
}

impl GameplayCore {
    /// Start run `run_id`
    pub fn new(run_id: u32, seed: u64, vehicle: Vehicle, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        let spawner = Spawner::from_tuning(&tuning)?;
        Ok(Self::with_spawner(run_id, seed, vehicle, tuning, spawner))
    }

    /// Start a run from already-validated tuning
    pub fn with_spawner(
        run_id: u32,
        seed: u64,
        vehicle: Vehicle,
        tuning: Tuning,
        spawner: Spawner,
    ) -> Self {
        log::info!("Run {} starting (seed {}, {:?})", run_id, seed, vehicle);
        Self {
            state: RunState::new(run_id, seed, vehicle, tuning, spawner),
        }
    }

    /// Replace the run with a fresh one. Handles from the old run go stale.
    pub fn restart(&mut self, seed: u64) {
        let run_id = self.state.run_id.wrapping_add(1);
        let vehicle = self.state.player.vehicle;
        let tuning = self.state.tuning.clone();
        let spawner = self.state.spawner.clone();
        log::info!("Run {} restarting as run {} (seed {})", self.state.run_id, run_id, seed);
        self.state = RunState::new(run_id, seed, vehicle, tuning, spawner);
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut RunState {
        &mut self.state
    }

    pub fn is_game_over(&self) -> bool {
        self.state.phase == RunPhase::GameOver
    }

    pub fn player_id(&self) -> EntityId {
        self.state.player.id
    }

    pub fn timer_handle(&self, kind: TimerKind) -> TimerHandle {
        self.state.timers.handle(kind)
    }

    pub fn on_tick(&mut self, input: &TickInput, delta_ms: f32) {
        tick(&mut self.state, input, delta_ms);
    }

    pub fn on_obstacle_spawn_tick(&mut self, handle: TimerHandle) -> Option<EntityId> {
        on_obstacle_spawn_tick(&mut self.state, handle)
    }

    pub fn on_powerup_spawn_tick(&mut self, handle: TimerHandle) -> Option<EntityId> {
        on_powerup_spawn_tick(&mut self.state, handle)
    }

    pub fn on_overlap(&mut self, player_id: EntityId, other_id: EntityId) -> OverlapOutcome {
        on_overlap(&mut self.state, player_id, other_id)
    }

    /// One full host frame: tick, fire due timers, resolve overlaps
    pub fn step(&mut self, input: &TickInput, delta_ms: f32) {
        self.on_tick(input, delta_ms);

        while let Some(handle) = self.state.timers.poll_due() {
            match handle.kind {
                TimerKind::Obstacle => self.on_obstacle_spawn_tick(handle),
                TimerKind::PowerUp => self.on_powerup_spawn_tick(handle),
            };
        }

        let player = self.player_id();
        for other in find_overlaps(&self.state) {
            self.on_overlap(player, other);
        }
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::kind::EntityKind;
    use crate::sim::spawn::spawn;
    use crate::sim::state::RunStatus;
    use crate::tuning::{KindWeight, ObstacleRoster};
    use glam::Vec2;

    const FRAME_MS: f32 = 1000.0 / 60.0;

    fn core() -> GameplayCore {
        GameplayCore::new(1, 1234, Vehicle::Powerboat, Tuning::default()).unwrap()
    }

    /// Spawn `kind` and drop it onto the player
    fn spawn_on_player(core: &mut GameplayCore, kind: EntityKind) -> EntityId {
        let state = core.state_mut();
        let id = spawn(state, kind);
        let pos = state.player.pos;
        let entity = state
            .obstacles
            .iter_mut()
            .chain(state.power_ups.iter_mut())
            .find(|e| e.id == id)
            .unwrap();
        entity.pos = pos;
        entity.vel = Vec2::ZERO;
        id
    }

    #[test]
    fn test_scenario_a_quiet_second() {
        let mut core = core();
        for _ in 0..60 {
            core.step(&TickInput::default(), FRAME_MS);
        }
        let state = core.state();
        assert!((state.score - 10.0).abs() < 0.01);
        assert_eq!(state.phase, RunPhase::Active);
        // First obstacle is due at 1200ms
        assert_eq!(state.entity_count(), 0);
    }

    #[test]
    fn test_scenario_b_magic_oyster() {
        let mut core = core();
        let id = spawn_on_player(&mut core, EntityKind::MagicOyster);
        let before = core.state().score;
        let outcome = core.on_overlap(core.player_id(), id);
        assert!(matches!(outcome, OverlapOutcome::Collected { .. }));

        let state = core.state();
        assert_eq!(state.score - before, 100.0);
        assert_eq!(state.oyster_count, 1);
        assert_eq!(state.phase, RunPhase::Active);
        assert_eq!(state.status(), RunStatus::Invincible);

        // Shield lasts 5000ms of run time, then drops on its own
        for _ in 0..49 {
            core.on_tick(&TickInput::default(), 100.0);
        }
        assert!(core.state().is_invincible());
        core.on_tick(&TickInput::default(), 100.0);
        assert!(!core.state().is_invincible());
    }

    #[test]
    fn test_scenario_c_smash_while_invincible() {
        let mut core = core();
        let oyster = spawn_on_player(&mut core, EntityKind::MagicOyster);
        core.on_overlap(core.player_id(), oyster);
        core.on_tick(&TickInput::default(), 1000.0);

        let log = spawn_on_player(&mut core, EntityKind::Log);
        let score = core.state().score;
        let outcome = core.on_overlap(core.player_id(), log);
        assert_eq!(outcome, OverlapOutcome::Smashed { kind: EntityKind::Log });
        assert!(core.state().entity(log).is_none());
        assert_eq!(core.state().phase, RunPhase::Active);
        assert_eq!(core.state().score, score);
    }

    #[test]
    fn test_scenario_d_game_over_stops_spawning() {
        let mut core = core();
        // Let a few spawns happen first
        for _ in 0..180 {
            core.on_tick(&TickInput::default(), FRAME_MS);
            while let Some(handle) = core.state_mut().timers.poll_due() {
                match handle.kind {
                    TimerKind::Obstacle => core.on_obstacle_spawn_tick(handle),
                    TimerKind::PowerUp => core.on_powerup_spawn_tick(handle),
                };
            }
        }
        let handle = core.timer_handle(TimerKind::Obstacle);

        let rock = spawn_on_player(&mut core, EntityKind::Buoy);
        let outcome = core.on_overlap(core.player_id(), rock);
        assert!(matches!(outcome, OverlapOutcome::GameOver { .. }));
        assert!(core.is_game_over());

        let frozen_score = core.state().score;
        let ids: Vec<_> = core
            .state()
            .obstacles
            .iter()
            .chain(core.state().power_ups.iter())
            .map(|e| e.id)
            .collect();
        for _ in 0..600 {
            core.step(&TickInput::default(), FRAME_MS);
        }
        assert!(core.on_obstacle_spawn_tick(handle).is_none());

        let after: Vec<_> = core
            .state()
            .obstacles
            .iter()
            .chain(core.state().power_ups.iter())
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, after);
        assert_eq!(core.state().score, frozen_score);
    }

    #[test]
    fn test_scenario_e_weighted_roster() {
        let tuning = Tuning {
            obstacle_roster: ObstacleRoster::Custom {
                weights: vec![
                    KindWeight {
                        kind: EntityKind::Kayaker,
                        weight: 20.0,
                    },
                    KindWeight {
                        kind: EntityKind::Branch,
                        weight: 80.0,
                    },
                ],
            },
            ..Tuning::default()
        };
        let mut core = GameplayCore::new(1, 77, Vehicle::Sailboat, tuning).unwrap();
        let handle = core.timer_handle(TimerKind::Obstacle);
        let mut kayakers = 0;
        for _ in 0..10_000 {
            let id = core.on_obstacle_spawn_tick(handle).unwrap();
            if core.state().entity(id).map(|e| e.kind) == Some(EntityKind::Kayaker) {
                kayakers += 1;
            }
            // Keep the collection small
            core.state_mut().obstacles.clear();
        }
        assert!((1_800..=2_200).contains(&kayakers), "got {kayakers}");
    }

    #[test]
    fn test_double_collision_single_game_over() {
        let mut core = core();
        let a = spawn_on_player(&mut core, EntityKind::Log);
        let b = spawn_on_player(&mut core, EntityKind::Geese);
        core.drain_events();
        core.step(&TickInput::default(), FRAME_MS);
        let game_overs = core
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(game_overs, 1);
        assert_eq!(core.on_overlap(core.player_id(), a), OverlapOutcome::Ignored);
        assert_eq!(core.on_overlap(core.player_id(), b), OverlapOutcome::Ignored);
    }

    #[test]
    fn test_same_frame_power_up_and_obstacle() {
        let mut core = core();
        spawn_on_player(&mut core, EntityKind::MagicOyster);
        let log = spawn_on_player(&mut core, EntityKind::Log);
        core.step(&TickInput::default(), FRAME_MS);
        // Power-ups resolve first, so the shield absorbs the log
        let state = core.state();
        assert_eq!(state.oyster_count, 1);
        assert_eq!(state.phase, RunPhase::Active);
        assert!(state.entity(log).is_none());
    }

    #[test]
    fn test_restart_invalidates_old_handles() {
        let mut core = core();
        let old = core.timer_handle(TimerKind::PowerUp);
        core.step(&TickInput::default(), 3000.0);
        core.restart(99);
        let state = core.state();
        assert_eq!(state.run_id, 2);
        assert_eq!(state.score, 0.0);
        assert_eq!(state.elapsed_ms, 0.0);
        assert_eq!(state.entity_count(), 0);
        assert!(core.on_powerup_spawn_tick(old).is_none());
        let fresh = core.timer_handle(TimerKind::PowerUp);
        assert!(core.on_powerup_spawn_tick(fresh).is_some());
    }

    #[test]
    fn test_same_seed_same_run() {
        let mut a = core();
        let mut b = core();
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        for _ in 0..900 {
            a.step(&input, FRAME_MS);
            b.step(&input, FRAME_MS);
        }
        assert_eq!(a.state().score, b.state().score);
        assert_eq!(a.state().phase, b.state().phase);
        assert_eq!(a.state().entity_count(), b.state().entity_count());
        assert_eq!(a.state().player.pos, b.state().player.pos);
    }

    #[test]
    fn test_rejects_invalid_tuning() {
        let tuning = Tuning {
            player_speed: -1.0,
            ..Tuning::default()
        };
        assert!(GameplayCore::new(1, 0, Vehicle::Powerboat, tuning).is_err());
    }
}
