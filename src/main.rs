//! Pingu's Kitchen entry point
//!
//! Browser builds draw on a canvas and play Web Audio. Native builds run the
//! same loop headless with the demo player and log the outcome.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use pingu_kitchen::audio::web::WebAudio;
    use pingu_kitchen::input::{InputEvent, key_event};
    use pingu_kitchen::renderer::RenderSink;
    use pingu_kitchen::renderer::canvas::CanvasSink;
    use pingu_kitchen::{App, Catalog, Flow, Settings};

    /// Game instance holding all state
    struct Game {
        app: App,
        audio: WebAudio,
        sink: CanvasSink,
        /// Events gathered since the last frame
        pending: Vec<InputEvent>,
        last_time: f64,
        device_pixel_ratio: f64,
        running: bool,
    }

    impl Game {
        fn update(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                0.0
            };
            self.last_time = time;

            let events = std::mem::take(&mut self.pending);
            if self.app.frame(&events, dt, &mut self.audio, &mut self.sink) == Flow::Quit {
                self.running = false;
                log::info!("Stopped. Reload the page to play again.");
            }
        }

        fn resize(&mut self, canvas: &HtmlCanvasElement) {
            let width = (canvas.client_width() as f64 * self.device_pixel_ratio) as u32;
            let height = (canvas.client_height() as f64 * self.device_pixel_ratio) as u32;
            self.sink.resize(width, height);
            self.app.resize(width, height);
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Pingu's Kitchen starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| JsValue::from_str("no canvas"))?
            .dyn_into()?;

        let dpr = window.device_pixel_ratio();
        canvas.set_width((canvas.client_width() as f64 * dpr) as u32);
        canvas.set_height((canvas.client_height() as f64 * dpr) as u32);

        let catalog = Catalog::standard().map_err(|e| JsValue::from_str(&e.to_string()))?;
        let mut settings = Settings::load();
        settings.window_width = canvas.width();
        settings.window_height = canvas.height();
        let seed = settings.seed.unwrap_or(js_sys::Date::now() as u64);

        let audio = WebAudio::new(&settings);
        let sink = CanvasSink::new(canvas.clone())?;
        let mut app = App::new(settings, catalog, seed);
        app.resize(canvas.width(), canvas.height());

        let game = Rc::new(RefCell::new(Game {
            app,
            audio,
            sink,
            pending: Vec::new(),
            last_time: 0.0,
            device_pixel_ratio: dpr,
            running: true,
        }));
        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(&canvas, game.clone());
        request_animation_frame(game);

        log::info!("Pingu's Kitchen running!");
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Mouse down - click in canvas pixels
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                if event.button() != 0 {
                    return;
                }
                let mut g = game.borrow_mut();
                // Browsers only start audio after a user gesture
                g.audio.resume();
                let dpr = g.device_pixel_ratio;
                g.pending.push(InputEvent::Click {
                    x: (event.offset_x() as f64 * dpr) as f32,
                    y: (event.offset_y() as f64 * dpr) as f32,
                });
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(input) = key_event(&event.key()) {
                    event.prevent_default();
                    game.borrow_mut().pending.push(input);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window resize
        {
            let canvas = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().resize(&canvas);
            });
            let _ = window
                .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }
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
        let running = {
            let mut g = game.borrow_mut();
            g.update(time);
            g.running
        };
        if running {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use pingu_kitchen::audio::NullAudio;
    use pingu_kitchen::autoplay::Autoplay;
    use pingu_kitchen::consts::FRAME_DT;
    use pingu_kitchen::input::InputSource;
    use pingu_kitchen::renderer::NullSink;
    use pingu_kitchen::settings::parse_window_size;
    use pingu_kitchen::sim::GamePhase;
    use pingu_kitchen::{App, Catalog, Flow, QualityPreset, Settings, StartupError};

    /// Ten minutes of frames: enough for a full five-level run
    const DEFAULT_MAX_FRAMES: u64 = 60 * 60 * 10;

    /// Command-line options
    #[derive(Debug, Clone, PartialEq, Default)]
    pub struct Args {
        pub seed: Option<u64>,
        pub settings: Option<PathBuf>,
        pub size: Option<(u32, u32)>,
        pub quality: Option<QualityPreset>,
        pub max_frames: Option<u64>,
    }

    pub fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Args, StartupError> {
        let mut parsed = Args::default();
        let mut args = args.into_iter();
        while let Some(flag) = args.next() {
            let mut value = |name: &str| {
                args.next()
                    .ok_or_else(|| StartupError::Argument(format!("{name} needs a value")))
            };
            match flag.as_str() {
                "--seed" => {
                    let v = value("--seed")?;
                    parsed.seed = Some(
                        v.parse()
                            .map_err(|_| StartupError::Argument(format!("bad seed '{v}'")))?,
                    );
                }
                "--settings" => parsed.settings = Some(PathBuf::from(value("--settings")?)),
                "--size" => parsed.size = Some(parse_window_size(&value("--size")?)?),
                "--quality" => {
                    let v = value("--quality")?;
                    parsed.quality = Some(
                        QualityPreset::from_str(&v)
                            .ok_or_else(|| StartupError::Argument(format!("bad quality '{v}'")))?,
                    );
                }
                "--max-frames" => {
                    let v = value("--max-frames")?;
                    parsed.max_frames = Some(
                        v.parse()
                            .map_err(|_| StartupError::Argument(format!("bad frame count '{v}'")))?,
                    );
                }
                other => return Err(StartupError::Argument(format!("unknown flag '{other}'"))),
            }
        }
        Ok(parsed)
    }

    fn clock_seed() -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0x9e37_79b9)
    }

    /// Settings file (or defaults) with command-line overrides applied
    pub fn settings_for(args: &Args) -> Result<Settings, StartupError> {
        let mut settings = match &args.settings {
            Some(path) => Settings::load_from(path)?,
            None => Settings::default(),
        };
        if let Some((w, h)) = args.size {
            settings.window_width = w;
            settings.window_height = h;
        }
        if let Some(quality) = args.quality {
            settings.apply_preset(quality);
        }
        Ok(settings)
    }

    pub fn run(args: Args) -> Result<(), StartupError> {
        let catalog = Catalog::standard()?;
        log::info!(
            "Catalog: {} ingredients, {} recipes",
            catalog.ingredients().len(),
            catalog.recipes().len()
        );

        let settings = settings_for(&args)?;
        let seed = args.seed.or(settings.seed).unwrap_or_else(clock_seed);
        let max_frames = args.max_frames.unwrap_or(DEFAULT_MAX_FRAMES);

        let mut app = App::new(settings, catalog, seed);
        let mut player = Autoplay::new(seed, app.viewport);
        let mut audio = NullAudio::default();
        let mut sink = NullSink::default();

        log::info!("Headless demo run (seed {seed}, up to {max_frames} frames)");
        for _ in 0..max_frames {
            let events = player.poll(&app.state, FRAME_DT);
            if app.frame(&events, FRAME_DT, &mut audio, &mut sink) == Flow::Quit {
                break;
            }
        }

        let state = &app.state;
        let outcome = match state.phase {
            GamePhase::GameOver { win: true } => "won",
            GamePhase::GameOver { win: false } => "lost",
            _ => "unfinished",
        };
        log::info!(
            "Run {outcome}: level {}, score {}, stars {}, fails {} ({} frames, {} cues)",
            state.level,
            state.score,
            state.stars_earned,
            state.failed_count,
            sink.frames,
            audio.played
        );
        Ok(())
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Pingu's Kitchen (native) starting...");

    let result = native::parse_args(std::env::args().skip(1)).and_then(native::run);
    if let Err(e) = result {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
