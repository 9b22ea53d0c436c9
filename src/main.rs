//! Snake Arcade entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::UVec2;
    use thiserror::Error;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent};

    use snake_arcade::audio::AudioManager;
    use snake_arcade::input::{action_for_key, is_game_key};
    use snake_arcade::persistence::LocalStore;
    use snake_arcade::renderer::vertex::colors;
    use snake_arcade::renderer::{RenderError, RenderState, scene};
    use snake_arcade::sim::{self, Action, Flow, GameEvent, GamePhase, GameState};
    use snake_arcade::{HighScore, Settings, SettingsField};

    /// Anything that stops the game from starting at all
    #[derive(Debug, Error)]
    pub enum StartupError {
        #[error("logger already initialized: {0}")]
        Logger(#[from] log::SetLoggerError),
        #[error("no browser window")]
        NoWindow,
        #[error("window has no document")]
        NoDocument,
        #[error("no <canvas id=\"canvas\"> element")]
        NoCanvas,
        #[error("failed to create WebGPU surface: {0}")]
        Surface(#[from] wgpu::CreateSurfaceError),
        #[error("no suitable GPU adapter: {0}")]
        Adapter(#[from] wgpu::RequestAdapterError),
        #[error(transparent)]
        Renderer(#[from] RenderError),
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: Option<RenderState>,
        canvas: HtmlCanvasElement,
        document: Document,
        audio: AudioManager,
        store: LocalStore,
        high_score: HighScore,
        /// Timestamp of the last simulated frame (ms)
        last_frame: f64,
        /// Set once the player quits; the loop stops rescheduling
        stopped: bool,
    }

    impl Game {
        /// Apply one action and handle its side effects
        fn dispatch(&mut self, action: Action) {
            if sim::handle_action(&mut self.state, action) == Flow::Exit {
                self.quit();
            }
            self.process_events();
        }

        fn quit(&mut self) {
            log::info!("Quitting");
            self.state.settings.save(&mut self.store);
            self.stopped = true;
            set_visible(&self.document, "goodbye", true);
        }

        /// Sound and persistence for everything the simulation reported
        fn process_events(&mut self) {
            for event in self.state.drain_events() {
                self.audio.play_event(&event);
                match event {
                    GameEvent::GameOver {
                        score,
                        new_high_score: true,
                        ..
                    } => {
                        if self.high_score.record(score) {
                            self.high_score.save(&mut self.store);
                        }
                    }
                    GameEvent::SettingsChanged => {
                        self.state.settings.save(&mut self.store);
                    }
                    GameEvent::CursorMoved => {
                        self.audio.set_muted(!self.state.settings.sound);
                    }
                    _ => {}
                }
            }
        }

        /// Run at most one simulation frame, paced by the current speed
        fn update(&mut self, time: f64) -> bool {
            if time - self.last_frame < self.state.frame_interval_ms() {
                return false;
            }
            self.last_frame = time;
            sim::tick(&mut self.state);
            self.process_events();
            true
        }

        /// Render the current frame
        fn render(&mut self, time: f64) {
            let vertices = scene::build(&self.state, time);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        let (w, h) = render_state.size;
                        render_state.resize(w, h, device_pixel_ratio());
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        fn resize(&mut self, width: u32, height: u32) {
            let size = sim::resize(&mut self.state, width, height);
            let dpr = device_pixel_ratio();
            fit_canvas(&self.canvas, size, dpr);
            if let Some(ref mut render_state) = self.render_state {
                render_state.resize(size.x, size.y, dpr);
            }
            // A resize may end the run
            self.process_events();
        }

        /// Update HUD and overlay elements in DOM
        fn update_hud(&self) {
            let doc = &self.document;
            let state = &self.state;
            let phase = state.phase;
            let on_board = matches!(
                phase,
                GamePhase::Playing | GamePhase::Paused | GamePhase::GameOver
            );

            set_visible(doc, "hud", on_board);
            set_text(doc, "hud-score", &format!("Score: {}", state.score));
            set_text(doc, "hud-best", &format!("Best: {}", state.high_score));
            set_text(doc, "hud-speed", &format!("Speed: {}", state.current_speed()));
            set_text(
                doc,
                "hud-size",
                &format!("Size: {}x{}", state.window.x, state.window.y),
            );
            set_visible(doc, "hud-demo", state.demo_mode);

            set_visible(doc, "menu", phase == GamePhase::Menu);
            set_visible(doc, "menu-best", state.high_score > 0);
            set_text(
                doc,
                "menu-best",
                &format!("High Score: {}", state.high_score),
            );

            set_visible(doc, "pause-menu", phase == GamePhase::Paused);

            set_visible(doc, "game-over", phase == GamePhase::GameOver);
            if phase == GamePhase::GameOver {
                let reason = state
                    .game_over_reason
                    .map(|r| r.message())
                    .unwrap_or_default();
                set_text(doc, "game-over-reason", reason);
                set_text(doc, "final-score", &format!("Final Score: {}", state.score));
                let record = state.is_new_high_score();
                set_visible(doc, "new-high-score", record);
                if let Some(el) = doc.get_element_by_id("final-score") {
                    let color = if record {
                        colors::SUCCESS
                    } else {
                        colors::TEXT_PRIMARY
                    };
                    let _ = el.set_attribute("style", &format!("color: {}", colors::css(color)));
                }
            }

            set_visible(doc, "settings", phase == GamePhase::Settings);
            if phase == GamePhase::Settings {
                if let Some(el) = doc.get_element_by_id("settings-list") {
                    el.set_inner_html(&settings_rows(&state.settings, state.settings_cursor));
                }
            }
        }
    }

    fn settings_rows(settings: &Settings, cursor: SettingsField) -> String {
        SettingsField::ALL
            .iter()
            .map(|field| {
                let class = if *field == cursor { "row selected" } else { "row" };
                format!(
                    "<div class=\"{}\"><span>{}</span><span>{}</span></div>",
                    class,
                    field.label(),
                    settings.value_text(*field)
                )
            })
            .collect()
    }

    fn set_text(doc: &Document, id: &str, text: &str) {
        if let Some(el) = doc.get_element_by_id(id) {
            if el.text_content().as_deref() != Some(text) {
                el.set_text_content(Some(text));
            }
        }
    }

    fn set_visible(doc: &Document, id: &str, visible: bool) {
        if let Some(el) = doc.get_element_by_id(id) {
            let _ = el.class_list().toggle_with_force("hidden", !visible);
        }
    }

    fn device_pixel_ratio() -> f64 {
        web_sys::window()
            .map(|w| w.device_pixel_ratio())
            .unwrap_or(1.0)
    }

    /// Browser viewport in CSS pixels
    fn viewport_size(window: &web_sys::Window) -> (u32, u32) {
        let read = |value: Result<JsValue, JsValue>, fallback: u32| {
            value
                .ok()
                .and_then(|v| v.as_f64())
                .map(|v| v.max(0.0) as u32)
                .unwrap_or(fallback)
        };
        (
            read(window.inner_width(), snake_arcade::consts::DEFAULT_WIDTH),
            read(window.inner_height(), snake_arcade::consts::DEFAULT_HEIGHT),
        )
    }

    /// Backing store in device pixels, CSS size in logical pixels
    fn fit_canvas(canvas: &HtmlCanvasElement, size: UVec2, dpr: f64) {
        canvas.set_width(((size.x as f64 * dpr).round() as u32).max(1));
        canvas.set_height(((size.y as f64 * dpr).round() as u32).max(1));
        let style = canvas.style();
        let _ = style.set_property("width", &format!("{}px", size.x));
        let _ = style.set_property("height", &format!("{}px", size.y));
    }

    pub async fn run() -> Result<(), StartupError> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)?;

        log::info!("Snake Arcade starting...");

        let window = web_sys::window().ok_or(StartupError::NoWindow)?;
        let document = window.document().ok_or(StartupError::NoDocument)?;

        set_visible(&document, "loading", false);

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into().ok())
            .ok_or(StartupError::NoCanvas)?;

        let store = LocalStore::new();
        let settings = Settings::load(&store);
        let high_score = HighScore::load(&store);

        let (vw, vh) = viewport_size(&window);
        let size = sim::snap_window(vw, vh);
        let dpr = window.device_pixel_ratio();
        fit_canvas(&canvas, size, dpr);

        let seed = js_sys::Date::now() as u64;
        let state = GameState::with_window(seed, settings, high_score.best, size.x, size.y);
        log::info!("Game initialized with seed: {}", seed);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, size.x, size.y, dpr).await?;

        let mut audio = AudioManager::new();
        audio.set_muted(!state.settings.sound);

        let game = Rc::new(RefCell::new(Game {
            state,
            render_state: Some(render_state),
            canvas,
            document,
            audio,
            store,
            high_score,
            last_frame: 0.0,
            stopped: false,
        }));

        setup_keyboard(&window, game.clone());
        setup_resize(&window, game.clone());
        setup_auto_pause(&window, game.clone());
        setup_save_on_unload(&window, game.clone());

        request_animation_frame(game);

        log::info!("Snake Arcade running!");
        Ok(())
    }

    fn setup_keyboard(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let key = event.key();
            if is_game_key(&key) {
                event.prevent_default();
            }
            let mut g = game.borrow_mut();
            if g.stopped {
                return;
            }
            g.audio.resume();
            if let Some(action) = action_for_key(g.state.phase, &key) {
                g.dispatch(action);
                // Overlays follow the key immediately, even at low speeds
                g.update_hud();
            }
        });
        let _ =
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_resize(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        let window_clone = window.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let (w, h) = viewport_size(&window_clone);
            game.borrow_mut().resize(w, h);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_auto_pause(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        let Some(document) = window.document() else {
            return;
        };

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    if g.state.phase == GamePhase::Playing {
                        g.dispatch(Action::PauseResume);
                        log::info!("Auto-paused (tab hidden)");
                    }
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.state.phase == GamePhase::Playing {
                    g.dispatch(Action::PauseResume);
                    log::info!("Auto-paused (window blur)");
                }
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_save_on_unload(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut g = game.borrow_mut();
            let g = &mut *g;
            g.state.settings.save(&mut g.store);
        });
        let _ = window
            .add_event_listener_with_callback("beforeunload", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            if g.stopped {
                return;
            }
            if g.update(time) {
                g.render(time);
                g.update_hud();
            }
        }

        request_animation_frame(game);
    }

    /// Show a startup failure in the page
    pub fn report_startup_error(err: &StartupError) {
        log::error!("Startup failed: {err}");
        let document = web_sys::window().and_then(|w| w.document());
        if let Some(el) = document.and_then(|d| d.get_element_by_id("loading")) {
            el.set_text_content(Some(&format!("Could not start: {err}")));
            let _ = el.class_list().add_1("error");
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(err) = wasm_game::run().await {
        wasm_game::report_startup_error(&err);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless demo: the autopilot plays a few runs and logs the results.
/// Settings are persisted in the working directory; autopilot scores never
/// replace the player's high score.
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::time::{SystemTime, UNIX_EPOCH};

    use snake_arcade::persistence::FileStore;
    use snake_arcade::sim::{self, GameEvent, GameState};
    use snake_arcade::{HighScore, Settings};

    /// Safety cap so a run that never ends can't spin forever
    const MAX_FRAMES: u64 = 200_000;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Snake Arcade (native) starting...");
    log::info!("The playable version runs in the browser - use `trunk serve`");

    let games: u32 = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(3);

    let mut store = FileStore::new(".");
    let settings = Settings::load(&store);
    let high_score = HighScore::load(&store);

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    let mut state = GameState::new(seed, settings, high_score.best);
    state.demo_mode = true;
    log::info!("Autopilot playing {} game(s), seed {}", games, seed);

    let mut finished = 0;
    let mut frames = 0;
    let mut best_demo = 0;
    while finished < games && frames < MAX_FRAMES {
        sim::tick(&mut state);
        frames += 1;

        for event in state.drain_events() {
            if let GameEvent::GameOver { reason, score, .. } = event {
                finished += 1;
                best_demo = best_demo.max(score);
                log::info!("Game {}: {} - score {}", finished, reason, score);
            }
        }
    }

    state.settings.save(&mut store);
    log::info!(
        "Done after {} frames, autopilot best {}, player record {} (settings in {})",
        frames,
        best_demo,
        high_score.best,
        store.dir().display()
    );
}
