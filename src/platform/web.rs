//! Browser binding
//!
//! The page owns the canvas, the image loader and requestAnimationFrame.
//! It feeds held keys and pointer drags in, calls `frame` once per
//! animation frame, and draws whatever `snapshot_json` describes.

use wasm_bindgen::prelude::*;

use super::snapshot::Snapshot;
use crate::assets::TextureSet;
use crate::session::Session;
use crate::sim::{TickInput, Vehicle};
use crate::tuning::Tuning;

#[wasm_bindgen]
pub struct WebSession {
    session: Session<TextureSet>,
    input: TickInput,
    /// Time of the previous frame, from `performance.now()`
    last_time: Option<f64>,
}

#[wasm_bindgen]
impl WebSession {
    /// `textures_csv` lists every texture key the page managed to load.
    #[wasm_bindgen(constructor)]
    pub fn new(tuning_json: Option<String>, textures_csv: &str) -> Result<WebSession, JsValue> {
        let tuning = match tuning_json {
            Some(json) => Tuning::from_json(&json).map_err(to_js)?,
            None => Tuning::default(),
        };
        let mut catalog = TextureSet::placeholders();
        catalog.extend(
            textures_csv
                .split(',')
                .map(str::trim)
                .filter(|key| !key.is_empty()),
        );

        let seed = js_sys::Date::now() as u64;
        log::info!("Session seed: {}", seed);
        let mut session = Session::new(tuning, catalog, seed).map_err(to_js)?;
        session.boot();

        Ok(WebSession {
            session,
            input: TickInput::default(),
            last_time: None,
        })
    }

    pub fn set_keys(&mut self, left: bool, right: bool, up: bool, down: bool) {
        self.input.left = left;
        self.input.right = right;
        self.input.up = up;
        self.input.down = down;
    }

    /// Pointer drag in world coordinates
    pub fn pointer_move(&mut self, x: f32) {
        self.input.pointer_x = Some(x);
    }

    pub fn pointer_up(&mut self) {
        self.input.pointer_x = None;
    }

    /// Space or tap, consumed by the next frame
    pub fn confirm(&mut self) {
        self.input.confirm = true;
    }

    pub fn set_autopilot(&mut self, on: bool) {
        self.input.autopilot = on;
        log::info!("Autopilot: {}", on);
    }

    /// Returns false for an unknown key or outside the menu
    pub fn select_vehicle(&mut self, key: &str) -> bool {
        match Vehicle::from_key(key) {
            Some(vehicle) => self.session.select_vehicle(vehicle),
            None => {
                log::warn!("Unknown vehicle key `{}`", key);
                false
            }
        }
    }

    pub fn open_about(&mut self) {
        self.session.open_about();
    }

    pub fn back(&mut self) {
        self.session.back();
    }

    /// Advance by an explicit delta
    pub fn frame(&mut self, delta_ms: f32) {
        self.session.frame(&self.input, delta_ms);
        self.input.confirm = false;
    }

    /// Advance by the time since the previous call to this method
    pub fn frame_now(&mut self) {
        let now = now_ms();
        let delta_ms = self.last_time.map_or(0.0, |last| (now - last) as f32);
        self.last_time = Some(now);
        self.frame(delta_ms);
    }

    pub fn scene(&self) -> String {
        format!("{:?}", self.session.scene())
    }

    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&Snapshot::capture(&self.session)).map_err(to_js)
    }

    pub fn drain_events_json(&mut self) -> Result<String, JsValue> {
        serde_json::to_string(&self.session.drain_events()).map_err(to_js)
    }
}

fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map_or_else(js_sys::Date::now, |p| p.now())
}

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}
