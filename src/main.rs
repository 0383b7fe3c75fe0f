//! Drop Catcher entry point
//!
//! On the web this wires the page controls to the game and drives it from
//! `requestAnimationFrame`. Natively it plays a few headless rounds.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlSelectElement, MouseEvent};

    use drop_catcher::audio::{AudioMix, WebAudio};
    use drop_catcher::consts::MAX_FRAME_MS;
    use drop_catcher::platform::web::{Confetti, DomRenderer, drop_id_from_target};
    use drop_catcher::random::GameRng;
    use drop_catcher::{Difficulty, Game, Settings};

    /// Game plus the host-side bits it does not own
    struct App {
        game: Game,
        settings: Settings,
        last_time: f64,
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Drop Catcher starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let settings = Settings::load();
        let renderer = DomRenderer::new(&document)?;
        let container = renderer.container().clone();
        let audio = WebAudio::new(AudioMix::from_settings(&settings));

        let seed = js_sys::Date::now() as u64;
        let game = Game::new(
            settings.difficulty,
            Box::new(GameRng::new(seed)),
            Box::new(renderer),
            Box::new(audio),
        )
        .with_celebration(Box::new(Confetti));
        log::info!("Game initialized with seed: {}", seed);

        if let Some(select) = difficulty_select(&document) {
            select.set_value(settings.difficulty.as_str());
        }

        let app = Rc::new(RefCell::new(App {
            game,
            settings,
            last_time: 0.0,
        }));

        setup_buttons(&document, app.clone());
        setup_difficulty(&document, app.clone());
        setup_drop_clicks(&container, app.clone());
        setup_logo(&document, app.clone());
        setup_mute(&document, app.clone());

        request_animation_frame(app)?;

        log::info!("Drop Catcher running!");
        Ok(())
    }

    fn difficulty_select(document: &Document) -> Option<HtmlSelectElement> {
        document
            .get_element_by_id("difficulty")?
            .dyn_into::<HtmlSelectElement>()
            .ok()
    }

    fn on_click(el: &Element, handler: impl FnMut(MouseEvent) + 'static) {
        let closure = Closure::<dyn FnMut(_)>::new(handler);
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(document: &Document, app: Rc<RefCell<App>>) {
        if let Some(btn) = document.get_element_by_id("startBtn") {
            let app = app.clone();
            on_click(&btn, move |_event| {
                app.borrow_mut().game.start();
            });
        }

        if let Some(btn) = document.get_element_by_id("resetBtn") {
            on_click(&btn, move |_event| {
                app.borrow_mut().game.reset();
            });
        }
    }

    fn setup_difficulty(document: &Document, app: Rc<RefCell<App>>) {
        let Some(select) = difficulty_select(document) else {
            log::warn!("No difficulty selector on page");
            return;
        };

        let select_clone = select.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let value = select_clone.value();
            let mut app = app.borrow_mut();
            match Difficulty::from_str(&value) {
                Some(difficulty) => {
                    app.game.select_difficulty(difficulty);
                    app.settings.difficulty = difficulty;
                    app.settings.save();
                }
                None => {
                    log::warn!("Unknown difficulty {:?}, keeping {}", value, app.game.difficulty().as_str());
                    select_clone.set_value(app.game.difficulty().as_str());
                }
            }
        });
        let _ = select.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// One delegated listener on the play field handles every drop
    fn setup_drop_clicks(container: &Element, app: Rc<RefCell<App>>) {
        on_click(container, move |event| {
            let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
                return;
            };
            let Some(id) = drop_id_from_target(&target) else {
                return;
            };
            event.stop_propagation();
            app.borrow_mut().game.click_drop(id);
        });
    }

    fn setup_logo(document: &Document, app: Rc<RefCell<App>>) {
        if let Some(logo) = document.get_element_by_id("waterLogo") {
            on_click(&logo, move |_event| {
                app.borrow_mut().game.logo_clicked();
            });
        }
    }

    fn mute_label(muted: bool) -> &'static str {
        if muted { "🔇" } else { "🔊" }
    }

    /// Mute toggle; the choice is saved with the other settings
    fn setup_mute(document: &Document, app: Rc<RefCell<App>>) {
        let Some(btn) = document.get_element_by_id("muteBtn") else {
            return;
        };
        btn.set_text_content(Some(mute_label(app.borrow().settings.muted)));

        let label = btn.clone();
        on_click(&btn, move |_event| {
            let mut app = app.borrow_mut();
            let muted = !app.settings.muted;
            app.settings.muted = muted;
            app.game.set_muted(muted);
            app.settings.save();
            label.set_text_content(Some(mute_label(muted)));
        });
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        window.request_animation_frame(closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut app = app.borrow_mut();

            let dt = if app.last_time > 0.0 {
                (time - app.last_time).clamp(0.0, MAX_FRAME_MS)
            } else {
                0.0
            };
            app.last_time = time;

            app.game.advance(dt);
        }

        if let Err(e) = request_animation_frame(app) {
            log::error!("Animation loop stopped: {:?}", e);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Drop Catcher (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    for difficulty in drop_catcher::Difficulty::ALL {
        autoplay(difficulty, 7);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Play one round headlessly, clicking every water drop once per second
#[cfg(not(target_arch = "wasm32"))]
fn autoplay(difficulty: drop_catcher::Difficulty, seed: u64) {
    use drop_catcher::Game;
    use drop_catcher::consts::COUNTDOWN_STEP_MS;
    use drop_catcher::platform::Recorder;
    use drop_catcher::random::GameRng;

    let recorder = Recorder::new(400.0);
    let mut game = Game::new(
        difficulty,
        Box::new(GameRng::new(seed)),
        Box::new(recorder.clone()),
        Box::new(recorder.clone()),
    )
    .with_celebration(Box::new(recorder.clone()));

    game.start();
    while game.is_running() {
        let water: Vec<_> = game
            .session()
            .drops()
            .iter()
            .filter(|d| !d.is_mud())
            .map(|d| d.id)
            .collect();
        for id in water {
            game.click_drop(id);
        }
        game.advance(COUNTDOWN_STEP_MS);
    }

    if let Some(outcome) = game.last_outcome() {
        println!(
            "{:>6}: score {:>2} / {:<2} {} - {}",
            difficulty.as_str(),
            outcome.score,
            difficulty.profile().win_score,
            if outcome.won { "WIN " } else { "LOSE" },
            outcome.message
        );
    }
}
