//! Entangled Dash entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::fmt::Write as _;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent};

    use entangled_dash::highscore::LocalStorage;
    use entangled_dash::platform::{Subscription, route_key};
    use entangled_dash::render::{Align, Label, RenderState, ShapeBatch, draw_scene, present_frame};
    use entangled_dash::sim::GameEvent;
    use entangled_dash::{Engine, Tuning};

    type FrameCallback = Closure<dyn FnMut(f64)>;
    type FrameSubscription = Subscription<Box<dyn FnMut(i32)>>;

    /// Game instance holding all state
    struct Game {
        engine: Engine<LocalStorage>,
        /// `None` until WebGPU is ready; frames are skipped meanwhile
        render_state: Option<RenderState>,
        batch: ShapeBatch,
        shown_labels: Vec<Label>,
    }

    impl Game {
        fn new(engine: Engine<LocalStorage>) -> Self {
            Self {
                engine,
                render_state: None,
                batch: ShapeBatch::new(),
                shown_labels: Vec::new(),
            }
        }

        /// Simulate, then draw, one display frame
        fn frame(&mut self, now: f64) {
            self.engine.advance(now);
            for event in self.engine.drain_events() {
                match event {
                    GameEvent::Spawned { .. } | GameEvent::Passed { .. } => {}
                    other => log::info!("{:?}", other),
                }
            }

            self.batch.clear();
            draw_scene(&mut self.batch, self.engine.state(), self.engine.tuning(), now);
            self.render();
            self.update_labels();
        }

        fn render(&mut self) {
            let outcome = present_frame(self.render_state.as_mut(), &self.batch);
            if !outcome.was_drawn() {
                log::trace!("Frame not drawn: {:?}", outcome);
            }
        }

        /// Text is laid out by the DOM on top of the canvas
        fn update_labels(&mut self) {
            if self.batch.labels == self.shown_labels {
                return;
            }
            let Some(container) = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.get_element_by_id("labels"))
            else {
                return;
            };

            let tuning = self.engine.tuning();
            container.set_inner_html(&labels_html(
                &self.batch.labels,
                tuning.canvas_width,
                tuning.canvas_height,
            ));
            self.shown_labels = self.batch.labels.clone();
        }
    }

    fn labels_html(labels: &[Label], width: f32, height: f32) -> String {
        let mut html = String::new();
        for label in labels {
            let shift = match label.style.align {
                Align::Left => "0%",
                Align::Center => "-50%",
                Align::Right => "-100%",
            };
            let [r, g, b, a] = label.style.color;
            let _ = write!(
                html,
                "<span style=\"position:absolute;left:{:.3}%;top:{:.3}%;\
                 transform:translate({},-80%);white-space:nowrap;\
                 font:{} {}px monospace;color:rgba({},{},{},{:.2})\">{}</span>",
                label.pos.x / width * 100.0,
                label.pos.y / height * 100.0,
                shift,
                if label.style.bold { "bold" } else { "normal" },
                label.style.size,
                (r * 255.0) as u8,
                (g * 255.0) as u8,
                (b * 255.0) as u8,
                a,
                escape_html(&label.text),
            );
        }
        html
    }

    fn escape_html(text: &str) -> String {
        text.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
    }

    fn performance_now() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or_default()
    }

    /// requestAnimationFrame loop that can be stopped exactly once
    #[derive(Clone)]
    struct FrameLoop {
        subscription: Rc<RefCell<Option<FrameSubscription>>>,
        callback: Rc<RefCell<Option<FrameCallback>>>,
    }

    impl FrameLoop {
        fn start(game: Rc<RefCell<Game>>) -> Result<Self, JsValue> {
            let window = web_sys::window().ok_or("no window")?;
            let frame_loop = FrameLoop {
                subscription: Rc::new(RefCell::new(None)),
                callback: Rc::new(RefCell::new(None)),
            };

            let this = frame_loop.clone();
            let tick_window = window.clone();
            *frame_loop.callback.borrow_mut() = Some(Closure::new(move |time: f64| {
                game.borrow_mut().frame(time);

                let mut subscription = this.subscription.borrow_mut();
                let Some(subscription) = subscription.as_mut().filter(|s| s.is_active()) else {
                    return;
                };
                if let Some(callback) = this.callback.borrow().as_ref() {
                    match tick_window.request_animation_frame(callback.as_ref().unchecked_ref()) {
                        Ok(handle) => {
                            subscription.rearm(handle);
                        }
                        Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
                    }
                }
            }));

            let handle = {
                let callback = frame_loop.callback.borrow();
                let callback = callback.as_ref().ok_or("frame callback missing")?;
                window.request_animation_frame(callback.as_ref().unchecked_ref())?
            };

            let cancel_window = window.clone();
            let cancel: Box<dyn FnMut(i32)> = Box::new(move |handle| {
                if let Err(e) = cancel_window.cancel_animation_frame(handle) {
                    log::warn!("cancelAnimationFrame failed: {:?}", e);
                }
            });
            *frame_loop.subscription.borrow_mut() = Some(Subscription::new(handle, cancel));

            Ok(frame_loop)
        }

        /// Unsubscribe and release the frame closure
        fn stop(&self) {
            if let Some(mut subscription) = self.subscription.borrow_mut().take() {
                subscription.cancel();
            }
            self.callback.borrow_mut().take();
            log::info!("Frame loop stopped");
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Entangled Dash starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let store = LocalStorage;
        let tuning = Tuning::load(&store);
        let playfield = (tuning.canvas_width, tuning.canvas_height);

        // Backing store at device resolution, playfield coordinates stay fixed
        let dpr = window.device_pixel_ratio();
        let width = (playfield.0 as f64 * dpr) as u32;
        let height = (playfield.1 as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(Engine::new(seed, tuning, store))));
        log::info!("Game initialized with seed: {}", seed);

        match init_renderer(canvas, width, height, playfield).await {
            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
            Err(e) => log::error!("WebGPU unavailable, frames will be skipped: {}", e),
        }

        setup_keyboard(game.clone())?;
        let frame_loop = FrameLoop::start(game)?;
        setup_teardown(frame_loop)?;

        log::info!("Entangled Dash running!");
        Ok(())
    }

    async fn init_renderer(
        canvas: HtmlCanvasElement,
        width: u32,
        height: u32,
        playfield: (f32, f32),
    ) -> Result<RenderState, String> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas))
            .map_err(|e| e.to_string())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| e.to_string())?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        RenderState::new(surface, &adapter, width, height, playfield)
            .await
            .map_err(|e| e.to_string())
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let mut g = game.borrow_mut();
            if route_key(&event.code(), g.engine.phase()).is_none() {
                return;
            }
            // Keep the page from scrolling
            event.prevent_default();
            if event.repeat() {
                return;
            }
            let command = g.engine.press(performance_now());
            log::debug!("{:?}", command);
        });
        window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_teardown(frame_loop: FrameLoop) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            frame_loop.stop();
        });
        window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().await
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use entangled_dash::{Engine, MemoryStore, Tuning};

    env_logger::init();
    log::info!("Entangled Dash (native) starting...");
    log::info!("The playable build targets the browser - run with `trunk serve`");

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(1);
    let mut engine = Engine::new(seed, Tuning::default(), MemoryStore::new());

    println!("\nRunning headless autopilot sessions (seed {})...", seed);
    for session in 1..=3 {
        let (score, seconds) = demo::run_session(&mut engine);
        println!(
            "  session {}: score {} after {:.1}s (best {})",
            session,
            score,
            seconds,
            engine.state().high_score
        );
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use entangled_dash::render::{ShapeBatch, draw_scene};
    use entangled_dash::sim::{GamePhase, Track};
    use entangled_dash::{Engine, ScoreStore};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Give up after two simulated minutes
    const MAX_FRAMES: u32 = 60 * 120;

    /// Play one session at 60 fps, jumping when a high obstacle closes in.
    /// Returns the final score and the simulated duration.
    pub fn run_session<S: ScoreStore>(engine: &mut Engine<S>) -> (u64, f64) {
        let mut now = 0.0;
        let mut batch = ShapeBatch::new();
        engine.start();

        for _ in 0..MAX_FRAMES {
            now += FRAME_MS;
            if should_jump(engine) {
                engine.activate(now);
            }
            engine.advance(now);

            batch.clear();
            draw_scene(&mut batch, engine.state(), engine.tuning(), now);

            if engine.phase() == GamePhase::GameOver {
                break;
            }
        }

        log::info!(
            "Final frame: {} vertices, {} labels",
            batch.vertices.len(),
            batch.labels.len()
        );
        engine.drain_events();
        (engine.state().score, now / 1000.0)
    }

    fn should_jump<S: ScoreStore>(engine: &Engine<S>) -> bool {
        let tuning = engine.tuning();
        let front = tuning.qubit_x + tuning.qubit_size;
        // Lead roughly a quarter of the jump so the peak meets the obstacle
        let lead = (engine.state().game_speed * 6.0) as f32;
        engine.state().obstacles.iter().any(|o| {
            o.kind.threatens(Track::A) && o.x >= front && o.x - front <= lead
        })
    }
}
