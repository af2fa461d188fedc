//! Render-ready view of a session
//!
//! Everything a host needs to draw one frame: scene, HUD values, the boat
//! and every live sprite with the texture key it should use.

use glam::Vec2;
use serde::Serialize;

use crate::assets::{AssetCatalog, texture_for, vehicle_texture};
use crate::session::{Scene, Session};
use crate::sim::{Category, EntityId, EntityKind, Facing, Flourish, RunState, RunStatus, Vehicle};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerView {
    pub vehicle: Vehicle,
    pub texture: &'static str,
    pub pos: Vec2,
    pub size: Vec2,
    pub tilt_deg: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpriteView {
    pub id: EntityId,
    pub kind: EntityKind,
    pub category: Category,
    pub texture: &'static str,
    pub pos: Vec2,
    pub size: Vec2,
    pub flip_x: bool,
    pub angle_deg: f32,
    /// Cosmetic animation the host layers on top
    pub flourish: Flourish,
}

/// HUD and world state of the running game
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunView {
    pub run_id: u32,
    /// Floored score
    pub score: u64,
    pub status: RunStatus,
    /// Whole seconds of shield left, 0 when unshielded
    pub invincible_secs: u32,
    pub oyster_count: u32,
    pub player: PlayerView,
    /// Obstacles then power-ups, each in id order
    pub sprites: Vec<SpriteView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub scene: Scene,
    /// Vehicle highlighted in the menu
    pub selected: Vehicle,
    pub run: Option<RunView>,
}

impl Snapshot {
    pub fn capture<C: AssetCatalog>(session: &Session<C>) -> Self {
        Self {
            scene: session.scene(),
            selected: session.selected_vehicle(),
            run: session
                .game()
                .map(|game| RunView::capture(game.state(), session.catalog())),
        }
    }
}

impl RunView {
    pub fn capture(state: &RunState, catalog: &dyn AssetCatalog) -> Self {
        let player = &state.player;
        let sprites = state
            .obstacles
            .iter()
            .chain(state.power_ups.iter())
            .map(|e| SpriteView {
                id: e.id,
                kind: e.kind,
                category: e.category(),
                texture: texture_for(catalog, e.kind),
                pos: e.pos,
                size: e.size(),
                flip_x: e.facing == Facing::Flipped,
                angle_deg: e.angle_deg,
                flourish: e.kind.profile().flourish,
            })
            .collect();

        Self {
            run_id: state.run_id,
            score: state.display_score(),
            status: state.status(),
            invincible_secs: (state.invincibility.remaining_ms(state.elapsed_ms) / 1000.0).ceil()
                as u32,
            oyster_count: state.oyster_count,
            player: PlayerView {
                vehicle: player.vehicle,
                texture: vehicle_texture(catalog, player.vehicle),
                pos: player.pos,
                size: player.size,
                tilt_deg: player.tilt_deg,
            },
            sprites,
        }
    }
}
