//! Flappy Crab entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use flappy_crab::persistence::{KeyValueStore, LocalStorageStore, MemoryStore};
    use flappy_crab::platform::input::pointer_action;
    use flappy_crab::platform::{Action, FixedTicker, key_action};
    use flappy_crab::renderer::{RenderState, build_scene};
    use flappy_crab::sim::{self, GameEvent, GamePhase, GameState, TickInput, World};
    use flappy_crab::{ScoreStore, Settings, StoredBestScore, Tuning};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        scores: StoredBestScore<Box<dyn KeyValueStore>>,
        settings: Settings,
        render_state: Option<RenderState>,
        ticker: FixedTicker,
        autopilot: bool,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(seed: u64, store: Box<dyn KeyValueStore>, width: f32, height: f32) -> Self {
            let settings = Settings::load(&*store);
            let tuning = Tuning::load(&*store);
            let scores = StoredBestScore::new(store);

            let mut state = GameState::with_world(seed, World { width, height }, tuning);
            state.best_score = scores.get();
            log::info!("Best score so far: {}", state.best_score);

            Self {
                state,
                scores,
                settings,
                render_state: None,
                ticker: FixedTicker::default(),
                autopilot: false,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Apply an input action right away, between frames
        fn handle_action(&mut self, action: Action) {
            match action {
                Action::Jump => sim::jump(&mut self.state),
                Action::ToggleAutopilot => {
                    self.autopilot = !self.autopilot;
                    log::info!("Autopilot: {}", self.autopilot);
                }
                other => {
                    if self.settings.apply(other) {
                        self.settings.save(&mut **self.scores.store_mut());
                    }
                }
            }
            self.log_events();
        }

        /// Run simulation ticks
        fn update(&mut self, time: f64) {
            let steps = self.ticker.frame(time);
            let input = TickInput {
                jump: false,
                autopilot: self.autopilot,
            };
            for _ in 0..steps {
                sim::tick(&mut self.state, &input, &mut self.scores);
            }
            self.log_events();

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        fn log_events(&mut self) {
            for event in self.state.drain_events() {
                match event {
                    GameEvent::Scored { score } => log::debug!("Score: {}", score),
                    GameEvent::NewBest { score } => log::info!("New best: {}", score),
                    other => log::debug!("Event: {:?}", other),
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                let vertices = build_scene(&self.state, &self.settings);
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        let (w, h) = render_state.size;
                        let world = render_state.world_size;
                        render_state.resize(w, h, world);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self, document: &Document) {
            let phase = self.state.phase;
            let score = self.state.score.to_string();
            let best = self.state.best_score.to_string();

            set_text(document, "hud-score", &score);
            set_visible(document, "hud-score", phase != GamePhase::Idle);

            set_text(document, "start-best", &best);
            set_visible(document, "start-prompt", phase == GamePhase::Idle);

            set_visible(document, "game-over", phase == GamePhase::Ended);
            if phase == GamePhase::Ended {
                set_text(document, "final-score", &score);
                set_text(document, "final-best", &best);
            }
            set_visible(document, "new-best", self.state.is_new_best());

            set_visible(document, "hud-fps", self.settings.show_fps);
            if self.settings.show_fps {
                set_text(document, "hud-fps", &self.fps.to_string());
            }
        }

        /// Match the play field and surface to the canvas size
        fn resize(&mut self, canvas: &HtmlCanvasElement, dpr: f64) {
            let (world_w, world_h, px_w, px_h) = canvas_size(canvas, dpr);
            canvas.set_width(px_w);
            canvas.set_height(px_h);
            self.state.resize(world_w, world_h);
            if let Some(ref mut render_state) = self.render_state {
                render_state.resize(px_w, px_h, (world_w, world_h));
            }
            log::debug!("Resized to {}x{} ({}x{} px)", world_w, world_h, px_w, px_h);
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.class_list().toggle_with_force("hidden", !visible);
        }
    }

    /// (world width, world height, pixel width, pixel height)
    fn canvas_size(canvas: &HtmlCanvasElement, dpr: f64) -> (f32, f32, u32, u32) {
        let client_w = canvas.client_width().max(1);
        let client_h = canvas.client_height().max(1);
        (
            client_w as f32,
            client_h as f32,
            (client_w as f64 * dpr) as u32,
            (client_h as f64 * dpr) as u32,
        )
    }

    fn open_store() -> Box<dyn KeyValueStore> {
        match LocalStorageStore::open() {
            Some(store) => Box::new(store),
            None => {
                log::warn!("LocalStorage unavailable, best score will not persist");
                Box::new(MemoryStore::new())
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Logger init failed: {}", e).into());
        }

        log::info!("Flappy Crab starting...");

        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };

        let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #canvas element");
            return;
        };

        let dpr = window.device_pixel_ratio();
        let (world_w, world_h, width, height) = canvas_size(&canvas, dpr);
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, open_store(), world_w, world_h)));
        log::info!("Game initialized with seed: {}", game.borrow().state.seed);

        // Initialize WebGPU, falling back to WebGL
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => surface,
            Err(e) => {
                log::error!("Failed to create surface: {}", e);
                return;
            }
        };

        let adapter = match instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
        {
            Ok(adapter) => adapter,
            Err(e) => {
                log::error!("Failed to get adapter: {}", e);
                return;
            }
        };

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        match RenderState::new(surface, &adapter, width, height, (world_w, world_h)).await {
            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
            Err(e) => {
                log::error!("Failed to create device: {}", e);
                return;
            }
        }

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.class_list().add_1("hidden");
        }

        setup_input_handlers(&canvas, game.clone());
        setup_resize(&canvas, game.clone());
        setup_visibility(game.clone());

        request_animation_frame(game);

        log::info!("Flappy Crab running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().handle_action(pointer_action());
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch (suppress the emulated mouse event and scrolling)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().handle_action(pointer_action());
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let Some(window) = web_sys::window() else {
                return;
            };
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(action) = key_action(&event.code()) {
                    if action == Action::Jump {
                        // Space would otherwise scroll the page
                        event.prevent_default();
                    }
                    game.borrow_mut().handle_action(action);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let canvas = canvas.clone();
        let window_clone = window.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let dpr = window_clone.device_pixel_ratio();
            game.borrow_mut().resize(&canvas, dpr);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Hidden tabs get no animation frames; drop the stale time base on return
    fn setup_visibility(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let document_clone = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if document_clone.visibility_state() == web_sys::VisibilityState::Visible {
                game.borrow_mut().ticker.reset();
            }
        });
        let _ = document
            .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
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
            g.update(time);
            g.render();
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                g.update_hud(&document);
            }
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

/// Ticks allowed per demo run before it is called off (five minutes)
#[cfg(not(target_arch = "wasm32"))]
const DEMO_TICK_LIMIT: u32 = 60 * 60 * 5;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use flappy_crab::persistence::{FileStore, KeyValueStore, MemoryStore};
    use flappy_crab::sim::{self, GameEvent, GamePhase, GameState, TickInput, World};
    use flappy_crab::{ScoreStore, StoredBestScore, Tuning};

    env_logger::init();
    log::info!("Flappy Crab (native) starting...");
    log::info!("Native mode runs a headless autopilot demo - run with `trunk serve` to play");

    let store: Box<dyn KeyValueStore> = match FileStore::user_data() {
        Some(store) => {
            log::info!("Best score file: {}", store.path().display());
            Box::new(store)
        }
        None => {
            log::warn!("No user data directory, best score will not persist");
            Box::new(MemoryStore::new())
        }
    };
    let tuning = Tuning::load(&*store);
    let mut scores = StoredBestScore::new(store);

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let mut state = GameState::with_world(seed, World::default(), tuning);
    state.best_score = scores.get();
    log::info!("Best score so far: {}", state.best_score);

    let input = TickInput {
        jump: false,
        autopilot: true,
    };

    for run in 1..=3 {
        let mut ticks = 0;
        while state.phase != GamePhase::Ended && ticks < DEMO_TICK_LIMIT {
            sim::tick(&mut state, &input, &mut scores);
            ticks += 1;
            for event in state.drain_events() {
                if let GameEvent::Crashed(kind) = event {
                    log::info!("Run {} crashed: {:?}", run, kind);
                }
            }
        }

        let outcome = if state.phase == GamePhase::Ended {
            "crashed"
        } else {
            "still swimming"
        };
        println!(
            "Run {} (seed {}): score {} after {} ticks, {} (best {})",
            run, state.seed, state.score, ticks, outcome, state.best_score
        );

        // Back to the title screen; a run still going is simply abandoned
        if state.phase == GamePhase::Ended {
            sim::jump(&mut state);
        } else {
            state = GameState::with_world(seed.wrapping_add(run), World::default(), tuning);
            state.best_score = scores.get();
        }
        state.drain_events();
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
