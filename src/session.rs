//! Scene flow and session-scoped state
//!
//! Boot → Menu ⇄ About, Menu → Game → (game over, confirm) → Menu.
//! The [`Registry`] lives as long as the session and carries the chosen
//! boat across runs; it is never written to disk.

use std::collections::HashMap;

use crate::assets::{AssetCatalog, TextureSet, resolve_vehicle};
use crate::sim::{GameEvent, GameplayCore, Spawner, TickInput, Vehicle};
use crate::tuning::{Tuning, TuningError};

/// Registry key holding the selected vehicle's texture key
pub const BOAT_KEY: &str = "boatKey";

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Scene {
    Boot,
    Menu,
    Game,
    About,
}

/// Named values that survive run restarts within one session
#[derive(Debug, Clone, Default)]
pub struct Registry {
    values: HashMap<String, String>,
}

impl Registry {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }
}

/// One process lifetime of the game
pub struct Session<C: AssetCatalog = TextureSet> {
    scene: Scene,
    registry: Registry,
    catalog: C,
    tuning: Tuning,
    spawner: Spawner,
    /// Menu highlight
    selected: Vehicle,
    base_seed: u64,
    runs_started: u32,
    game: Option<GameplayCore>,
}

impl<C: AssetCatalog> Session<C> {
    pub fn new(tuning: Tuning, catalog: C, base_seed: u64) -> Result<Self, TuningError> {
        tuning.validate()?;
        let spawner = Spawner::from_tuning(&tuning)?;
        Ok(Self {
            scene: Scene::Boot,
            registry: Registry::default(),
            catalog,
            tuning,
            spawner,
            selected: Vehicle::default(),
            base_seed,
            runs_started: 0,
            game: None,
        })
    }

    pub fn scene(&self) -> Scene {
        self.scene
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn selected_vehicle(&self) -> Vehicle {
        self.selected
    }

    pub fn game(&self) -> Option<&GameplayCore> {
        self.game.as_ref()
    }

    pub fn game_mut(&mut self) -> Option<&mut GameplayCore> {
        self.game.as_mut()
    }

    /// Assets are ready: show the menu
    pub fn boot(&mut self) {
        if self.scene == Scene::Boot {
            self.enter_menu();
        }
    }

    /// Highlight a vehicle in the menu
    pub fn select_vehicle(&mut self, vehicle: Vehicle) -> bool {
        if self.scene != Scene::Menu {
            return false;
        }
        self.selected = vehicle;
        true
    }

    pub fn open_about(&mut self) {
        if self.scene == Scene::Menu {
            self.goto(Scene::About);
        }
    }

    pub fn back(&mut self) {
        if self.scene == Scene::About {
            self.enter_menu();
        }
    }

    /// Space or tap. Starts a run from the menu, or leaves a finished run.
    pub fn confirm(&mut self) {
        match self.scene {
            Scene::Boot => self.enter_menu(),
            Scene::Menu => self.start_game(),
            Scene::Game if self.game.as_ref().is_none_or(GameplayCore::is_game_over) => {
                self.enter_menu()
            }
            Scene::Game | Scene::About => {}
        }
    }

    /// Explicit restart from inside the game scene
    pub fn restart(&mut self) {
        if self.scene == Scene::Game {
            self.start_game();
        }
    }

    /// Forward one host frame to the running game
    pub fn frame(&mut self, input: &TickInput, delta_ms: f32) {
        if input.confirm {
            self.confirm();
        }
        if let Some(game) = self.game.as_mut() {
            game.step(input, delta_ms);
        }
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.game
            .as_mut()
            .map(GameplayCore::drain_events)
            .unwrap_or_default()
    }

    fn enter_menu(&mut self) {
        self.game = None;
        self.selected = self
            .registry
            .get(BOAT_KEY)
            .and_then(Vehicle::from_key)
            .unwrap_or_default();
        self.goto(Scene::Menu);
    }

    fn start_game(&mut self) {
        self.registry.set(BOAT_KEY, self.selected.texture_key());
        let vehicle = resolve_vehicle(&self.catalog, self.selected);

        self.runs_started += 1;
        let run_id = self.runs_started;
        let seed = self
            .base_seed
            .wrapping_add((run_id as u64).wrapping_mul(2654435761));
        self.game = Some(GameplayCore::with_spawner(
            run_id,
            seed,
            vehicle,
            self.tuning.clone(),
            self.spawner.clone(),
        ));
        self.goto(Scene::Game);
    }

    fn goto(&mut self, scene: Scene) {
        if self.scene != scene {
            log::info!("Scene {:?} -> {:?}", self.scene, scene);
        }
        self.scene = scene;
    }
}
