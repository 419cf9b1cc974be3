//! Browser bindings
//!
//! The presentation layer (scene graph, animations, audio) lives in JS and
//! only needs the engine: construct a game, issue `roll`/`reset`, read
//! wire-shaped snapshots plus the event list for the last command.

use wasm_bindgen::prelude::*;

use crate::session::{GameSession, Mode};
use crate::settings::Settings;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Engine handle for the browser UI
#[wasm_bindgen]
pub struct Game {
    session: GameSession,
}

#[wasm_bindgen]
impl Game {
    /// New session from persisted settings, seeded from the clock unless the
    /// settings pin a seed
    #[wasm_bindgen(constructor)]
    pub fn new() -> Game {
        let settings = Settings::load();
        let seed = settings
            .seed
            .unwrap_or_else(|| js_sys::Date::now() as u64);
        Game {
            session: GameSession::new(settings.mode, seed),
        }
    }

    /// Reproducible session with an explicit seed
    pub fn with_seed(seed: u64) -> Game {
        Game {
            session: GameSession::new(Mode::Local, seed),
        }
    }

    pub fn roll(&mut self) {
        self.session.roll();
    }

    pub fn reset(&mut self) {
        self.session.reset();
    }

    /// Full state in the backend wire shape, as a JSON string
    pub fn state_json(&self) -> String {
        serde_json::to_string(&self.session.snapshot()).unwrap_or_else(|err| {
            log::error!("state serialization failed: {err}");
            String::from("null")
        })
    }

    /// Events produced by the last command, as a JSON string; drains them
    pub fn take_events_json(&mut self) -> String {
        serde_json::to_string(&self.session.take_events()).unwrap_or_else(|err| {
            log::error!("event serialization failed: {err}");
            String::from("[]")
        })
    }

    pub fn balance(&self) -> f64 {
        self.session.balance() as f64
    }

    pub fn available_to_spin(&self) -> bool {
        self.session.available_to_spin()
    }

    pub fn bonus_mode(&self) -> bool {
        self.session.bonus_mode()
    }

    pub fn freespins(&self) -> u32 {
        self.session.freespins()
    }

    pub fn current_index(&self) -> u32 {
        self.session.current_index() as u32
    }

    pub fn out_of_credits(&self) -> bool {
        self.session.out_of_credits()
    }
}

/// Persist local mode for the next session
#[wasm_bindgen]
pub fn persist_local_mode() {
    Settings::default().save();
}

/// Persist remote mode against the given backend for the next session
#[wasm_bindgen]
pub fn persist_remote_mode(base_url: String) {
    Settings::remote(base_url).save();
}
