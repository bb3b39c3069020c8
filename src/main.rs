//! Heart Drift entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use heart_drift::audio::AudioManager;
    use heart_drift::consts::*;
    use heart_drift::renderer::SdfRenderState;
    use heart_drift::settings::Settings;
    use heart_drift::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
    use heart_drift::ui;

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: Option<SdfRenderState>,
        audio: AudioManager,
        settings: Settings,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            let settings = Settings::default();
            let mut audio = AudioManager::new();
            audio.set_master_volume(settings.master_volume);
            audio.set_sfx_volume(settings.sfx_volume);
            audio.set_music_volume(settings.music_volume);
            Self {
                state: GameState::new(seed),
                render_state: None,
                audio,
                settings,
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.input.clone();
                let events = tick(&mut self.state, &input);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input.flap = false;
                self.input.release = false;
                self.input.pause = false;

                self.dispatch(&events);
            }
        }

        /// Route simulation events to the DOM, audio, and renderer layers
        fn dispatch(&mut self, events: &[GameEvent]) {
            for event in events {
                ui::apply_event(event);
                self.audio.on_event(event);
                if let GameEvent::HeartCollected { .. } = event {
                    if self.settings.effective_collect_flash() {
                        if let Some(ref mut render_state) = self.render_state {
                            render_state.flash();
                        }
                    }
                }
            }
        }

        fn start(&mut self) {
            let events = self.state.start();
            self.dispatch(&events);
        }

        fn restart(&mut self) {
            let events = self.state.restart();
            self.dispatch(&events);
        }

        /// Render the current frame
        fn render(&mut self, time: f64) {
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&self.state, &self.settings, time) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Heart Drift starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        // Initialize game
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));

        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = SdfRenderState::new(surface, &adapter, width, height).await;
        game.borrow_mut().render_state = Some(render_state);

        // Set up input handlers
        setup_input_handlers(&canvas, game.clone());

        // Set up menu buttons
        setup_buttons(game.clone());

        // Set up auto-pause on visibility change
        setup_auto_pause(game.clone());

        // Keep the surface in step with the window
        setup_resize(canvas.clone(), game.clone());

        // Paint the initial HUD values
        ui::sync_hud(&game.borrow().state);

        // Start game loop
        request_animation_frame(game);

        log::info!("Heart Drift running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Keyboard press
        {
            let game = game.clone();
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    " " => g.input.flap = true,
                    "Escape" | "p" | "P" => g.input.pause = true,
                    "m" | "M" => {
                        let muted = !g.audio.muted();
                        g.audio.set_muted(muted);
                        log::info!("Muted: {}", muted);
                    }
                    "g" | "G" => {
                        g.settings.quality = g.settings.quality.cycle();
                        log::info!("Quality: {}", g.settings.quality.as_str());
                    }
                    "d" | "D" => {
                        // Debug: dump the simulation state
                        if let Ok(json) = serde_json::to_string(&g.state) {
                            log::info!("State dump: {}", json);
                        }
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard release
        {
            let game = game.clone();
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.key() == " " {
                    game.borrow_mut().input.release = true;
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch press
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().input.flap = true;
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch release
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().input.release = true;
            });
            let _ = canvas
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        if let Some(btn) = document.get_element_by_id("start-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().start();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().restart();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("resume-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                // Toggle back to playing
                game.borrow_mut().input.pause = true;
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    // Auto-pause if playing
                    if g.state.phase == GamePhase::Playing {
                        g.input.pause = true;
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
                    g.input.pause = true;
                    log::info!("Auto-paused (window blur)");
                }
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(canvas: HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let window_clone = window.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let dpr = window_clone.device_pixel_ratio();
            let width = (canvas.client_width() as f64 * dpr) as u32;
            let height = (canvas.client_height() as f64 * dpr) as u32;
            canvas.set_width(width);
            canvas.set_height(height);
            if let Some(ref mut render_state) = game.borrow_mut().render_state {
                render_state.resize(width, height);
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.render(time);
            ui::sync_hud(&g.state);
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Heart Drift (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    // Run a scripted session to exercise the simulation
    println!("\nRunning scripted session...");
    smoke_run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn smoke_run() {
    use heart_drift::sim::{GamePhase, GameState, TickInput, tick};

    let mut state = GameState::new(42);
    for event in state.start() {
        println!("  {:?}", event);
    }

    // Flap on a fixed cadence, easing off shortly after each press
    let mut input = TickInput::default();
    for t in 0u64.. {
        input.flap = t % 30 == 0;
        input.release = t % 30 == 6;
        for event in tick(&mut state, &input) {
            println!("  tick {}: {:?}", t, event);
        }
        if state.phase == GamePhase::GameOver || t >= 3600 {
            break;
        }
    }

    assert!(state.time_ticks > 0, "session should have simulated");
    println!(
        "✓ Done: score {} best {} phase {:?} after {} ticks",
        state.score, state.best, state.phase, state.time_ticks
    );
}
