//! Rivah Dash entry point
//!
//! On the web the page drives a `WebSession`; this only installs logging.
//! Natively it runs a headless autopilot demo and prints the final frame.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Rivah Dash starting...");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use rivah_dash::platform::Snapshot;
    use rivah_dash::sim::{GameEvent, TickInput};
    use rivah_dash::{Session, TextureSet, Tuning};

    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<u64>().ok())
        .unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });
    log::info!("Rivah Dash (native) demo, seed {}", seed);

    let mut session = match Session::new(Tuning::default(), TextureSet::everything(), seed) {
        Ok(session) => session,
        Err(err) => {
            log::error!("Bad tuning: {}", err);
            std::process::exit(1);
        }
    };
    session.boot();
    session.confirm();

    let input = TickInput {
        autopilot: true,
        ..Default::default()
    };
    let frame_ms = 1000.0 / 60.0;
    for _ in 0..(120 * 60) {
        session.frame(&input, frame_ms);
        for event in session.drain_events() {
            match event {
                GameEvent::Spawned { .. } => log::debug!("{:?}", event),
                _ => log::info!("{:?}", event),
            }
        }
        if session.game().is_some_and(|game| game.is_game_over()) {
            break;
        }
    }

    match serde_json::to_string_pretty(&Snapshot::capture(&session)) {
        Ok(json) => println!("{json}"),
        Err(err) => log::error!("Snapshot failed: {}", err),
    }
}
