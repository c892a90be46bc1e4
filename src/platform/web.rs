//! Browser bindings
//!
//! `WebQuiz` wraps a `QuizSession` for a JavaScript host. The host owns the
//! animation loop and calls `tick` with elapsed milliseconds each frame.
//! Snapshots and HUD models cross the boundary as JSON strings.

use std::time::Duration;

use wasm_bindgen::prelude::*;

use crate::quiz::{QuizSession, SubscriptionId};
use crate::settings::SettingsPatch;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        // Already initialized by an earlier module instance
        return;
    }
    log::info!("Dot Count starting...");
}

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[wasm_bindgen]
pub struct WebQuiz {
    session: QuizSession,
    subscriptions: Vec<(u32, SubscriptionId)>,
    next_handle: u32,
}

impl Default for WebQuiz {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl WebQuiz {
    /// Idle session seeded from the current time
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebQuiz {
        Self::with_seed(super::clock_seed() as f64)
    }

    /// Idle session with an explicit seed (for replays)
    pub fn with_seed(seed: f64) -> WebQuiz {
        WebQuiz {
            session: QuizSession::with_defaults(seed as u64),
            subscriptions: Vec::new(),
            next_handle: 1,
        }
    }

    /// Start with the current settings
    pub fn start(&mut self) -> Result<(), JsValue> {
        let settings = self.session.settings().clone();
        self.session.start(settings).map_err(js_error)
    }

    pub fn retry(&mut self) -> Result<(), JsValue> {
        self.session.retry().map_err(js_error)
    }

    /// Advance the countdown; returns true if the current question timed out
    pub fn tick(&mut self, dt_ms: f64) -> bool {
        let dt = Duration::try_from_secs_f64(dt_ms / 1000.0).unwrap_or(Duration::ZERO);
        self.session.tick(dt).is_some()
    }

    /// Returns whether the choice was correct
    pub fn submit_answer(&mut self, choice: i32) -> Result<bool, JsValue> {
        self.session
            .submit_answer(choice)
            .map(|outcome| outcome.correct)
            .map_err(js_error)
    }

    pub fn open_settings(&mut self) -> Result<(), JsValue> {
        self.session.open_settings().map_err(js_error)
    }

    pub fn close_settings(&mut self) -> Result<(), JsValue> {
        self.session.close_settings().map_err(js_error)
    }

    /// Merge a JSON patch such as `{"num_choices": 4}`
    pub fn update_settings(&mut self, json: &str) -> Result<(), JsValue> {
        let patch = SettingsPatch::from_json(json).map_err(js_error)?;
        self.session.update_settings(&patch).map_err(js_error)
    }

    pub fn snapshot(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.session.snapshot()).map_err(js_error)
    }

    pub fn hud(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.session.hud()).map_err(js_error)
    }

    /// Call `callback(snapshotJson)` after every change; returns a handle for `off_change`
    pub fn on_change(&mut self, callback: js_sys::Function) -> u32 {
        let id = self.session.subscribe(move |snapshot| {
            match serde_json::to_string(snapshot) {
                Ok(json) => {
                    if let Err(e) = callback.call1(&JsValue::NULL, &JsValue::from_str(&json)) {
                        log::warn!("Change listener threw: {:?}", e);
                    }
                }
                Err(e) => log::error!("Snapshot serialization failed: {}", e),
            }
        });
        let handle = self.next_handle;
        self.next_handle += 1;
        self.subscriptions.push((handle, id));
        handle
    }

    pub fn off_change(&mut self, handle: u32) -> bool {
        match self.subscriptions.iter().position(|(h, _)| *h == handle) {
            Some(i) => {
                let (_, id) = self.subscriptions.remove(i);
                self.session.unsubscribe(id)
            }
            None => false,
        }
    }

    pub fn dispose(&mut self) {
        self.subscriptions.clear();
        self.session.dispose();
    }
}
