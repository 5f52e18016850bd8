//! Seesaw simulator entry point
//!
//! The browser host loads the wasm build, wires its controls to the
//! exported app handle, and drives `tick` from its animation loop. The
//! native build runs a short headless demo session instead.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use wasm_bindgen::prelude::*;

    use seesaw_sim::persistence::{self, LocalStore};
    use seesaw_sim::{Session, ShapeType, SpeedSetting};

    /// Handle exported to the page script. The page owns rendering and
    /// widgets; every operation here is a thin pass-through to the core,
    /// persisting the updated history after each state change.
    #[wasm_bindgen]
    pub struct SeesawApp {
        session: Session,
        store: LocalStore,
    }

    #[wasm_bindgen]
    impl SeesawApp {
        #[wasm_bindgen(constructor)]
        pub fn new() -> SeesawApp {
            let seed = js_sys::Date::now() as u64;
            let store = LocalStore;
            let session = match persistence::load(&store) {
                Some(history) => Session::from_history(seed, history),
                None => Session::new(seed),
            };
            SeesawApp { session, store }
        }

        /// Advance the angle spring one animation frame
        pub fn tick(&mut self) {
            self.session.tick();
        }

        /// Drop the queued weight at a signed offset from the pivot.
        /// Returns the placed weight in kg, or 0 when the drop was
        /// rejected (paused or mid-animation).
        pub fn place(&mut self, offset_x: f32) -> u8 {
            match self.session.place_next(offset_x) {
                Some(entity) => {
                    self.persist();
                    entity.weight
                }
                None => 0,
            }
        }

        pub fn set_shape(&mut self, shape: &str) {
            if let Some(shape) = ShapeType::from_str(shape) {
                self.session.set_shape(shape);
                self.persist();
            }
        }

        pub fn set_speed(&mut self, speed: &str) {
            self.session.set_speed(SpeedSetting::from_str(speed));
            self.persist();
        }

        pub fn set_beam_width(&mut self, width: f32) {
            self.session.set_beam_width(width);
            self.persist();
        }

        pub fn toggle_pause(&mut self) {
            self.session.toggle_pause();
            self.persist();
        }

        pub fn set_busy(&mut self, busy: bool) {
            self.session.set_busy(busy);
        }

        pub fn reset(&mut self) {
            self.session.reset();
            self.persist();
        }

        pub fn undo(&mut self) -> bool {
            let moved = self.session.undo();
            if moved {
                self.persist();
            }
            moved
        }

        pub fn redo(&mut self) -> bool {
            let moved = self.session.redo();
            if moved {
                self.persist();
            }
            moved
        }

        pub fn angle(&self) -> f32 {
            self.session.state().angle
        }

        /// Full state snapshot as JSON for the page's readouts
        pub fn state_json(&self) -> String {
            serde_json::to_string(self.session.state()).unwrap_or_default()
        }

        fn persist(&mut self) {
            persistence::save(&mut self.store, self.session.history());
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("failed to init logger");
        log::info!("seesaw core loaded");
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::time::{SystemTime, UNIX_EPOCH};

    use seesaw_sim::Session;
    use seesaw_sim::persistence::{self, MemoryStore};

    env_logger::init();

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let mut session = Session::new(seed);
    log::info!("headless demo session (seed {seed})");

    session.place_weight(5, -100.0);
    session.place_weight(3, 50.0);
    let totals = session.totals();
    println!(
        "torque L/R: {}/{}  weight L/R: {}kg/{}kg  target: {}°",
        totals.left_torque,
        totals.right_torque,
        totals.left_weight,
        totals.right_weight,
        session.state().target_angle
    );

    for _ in 0..600 {
        session.tick();
    }
    println!("angle after 600 ticks: {:.2}°", session.state().angle);

    session.undo();
    println!(
        "after undo: {} weight(s), target {}°",
        session.state().objects.len(),
        session.state().target_angle
    );

    let mut store = MemoryStore::new();
    persistence::save(&mut store, session.history());
    match persistence::load(&store) {
        Some(history) => println!("persistence round-trip: {} snapshot(s)", history.len()),
        None => println!("persistence round-trip failed"),
    }
}
