//! Platform abstraction layer
//!
//! Host-facing surface of the game:
//! - Render snapshots (what to draw, with resolved texture keys)
//! - The browser binding (input in, frames and JSON out)

pub mod snapshot;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use snapshot::{PlayerView, RunView, Snapshot, SpriteView};
#[cfg(target_arch = "wasm32")]
pub use web::WebSession;
