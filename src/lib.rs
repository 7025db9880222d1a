//! Battery Flight core crate.
//!
//! A single-screen arcade game: steer a small craft up and down, dodge the
//! walls scrolling in from the right, and grab batteries before the power
//! meter drains to zero. The simulation (`flight`) is plain Rust and runs
//! natively under `cargo test`; the `web` module binds it to the page's canvas,
//! screens and keyboard.

use wasm_bindgen::prelude::*;

pub mod config;
pub mod controls;
pub mod flight;
pub mod hud;
mod web;

pub use config::{ConfigError, GameConfig};
pub use flight::{Ending, Flight, FlightInput, Screen, StepOutcome};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    // A second init (e.g. hot reload) only fails because a logger is already set.
    #[cfg(target_arch = "wasm32")]
    let _ = console_log::init_with_level(log::Level::Info);
}

// -----------------------------------------------------------------------------
// Entrypoints
// -----------------------------------------------------------------------------

/// Mount the game on the page with the default tuning.
#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    web::mount(GameConfig::default())
}

/// Mount the game with a JSON tuning override, e.g. `{"scroll_speed": 4}`.
#[wasm_bindgen]
pub fn start_game_with_config(config_json: &str) -> Result<(), JsValue> {
    let config =
        GameConfig::from_json(config_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    web::mount(config)
}

/// Same as pressing Escape: pause a running flight or resume a paused one.
#[wasm_bindgen]
pub fn toggle_pause() {
    web::pause_or_resume();
}

/// Milliseconds on the same clock `requestAnimationFrame` timestamps use.
pub(crate) fn performance_now() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}
