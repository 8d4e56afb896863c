//! Flappy entry point
//!
//! Browser: WebGPU canvas driven by requestAnimationFrame.
//! Native: headless autopilot runs against a high score file.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use flappy::consts::SIM_DT;
    use flappy::persistence::LocalStorage;
    use flappy::platform::{FixedStep, FpsCounter};
    use flappy::renderer::{RenderState, build_scene};
    use flappy::sim::{GameCore, GameEvent, GamePhase, TickInput, tick};
    use flappy::ui::{DeathOverlay, game_over_lines, hud_lines, hud_visible};
    use flappy::{Assets, Settings, Tuning};

    /// Game instance holding all state
    struct Game {
        core: GameCore,
        overlay: DeathOverlay,
        settings: Settings,
        render_state: Option<RenderState>,
        clock: FixedStep,
        fps: FpsCounter,
        last_time: f64,
        input: TickInput,
        document: Document,
    }

    impl Game {
        fn new(seed: u64, document: Document) -> Self {
            let storage = LocalStorage::new(LocalStorage::HIGH_SCORE_KEY);
            Self {
                core: GameCore::new(Tuning::default(), &Assets::builtin(), Box::new(storage), seed),
                overlay: DeathOverlay::new(),
                settings: Settings::load(),
                render_state: None,
                clock: FixedStep::new(),
                fps: FpsCounter::default(),
                last_time: 0.0,
                input: TickInput::default(),
                document,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32, time: f64) {
            let steps = self.clock.advance(dt);
            for _ in 0..steps {
                // Restart/menu only act once the death screen is showing
                if !self.overlay.is_visible() {
                    self.input.restart = false;
                    self.input.menu = false;
                }

                let input = self.input.clone();
                tick(&mut self.core, &input);
                self.overlay.update(&self.core.snapshot());

                for event in &self.core.events {
                    if let GameEvent::Scored { score } = event {
                        log::debug!("Score {}", score);
                    }
                }

                // Clear one-shot inputs after processing
                self.input.jump = false;
                self.input.start = false;
                self.input.restart = false;
                self.input.menu = false;
            }

            self.fps.record(time);
        }

        /// Render the current frame
        fn render(&mut self) {
            let snapshot = self.core.snapshot();
            let vertices = build_scene(&snapshot, &self.settings, self.overlay.alpha());
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&vertices) {
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

        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }

        fn set_visible(&self, id: &str, visible: bool) {
            if let Some(el) = self.document.get_element_by_id(id) {
                let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let snapshot = self.core.snapshot();

            let hud = hud_lines(&snapshot);
            self.set_visible("hud", hud_visible(&snapshot, &self.overlay));
            if let [score, best] = hud.as_slice() {
                self.set_text("hud-score", score);
                self.set_text("hud-best", best);
            }

            self.set_visible("hud-fps", self.settings.show_fps);
            self.set_text("hud-fps", &format!("{} FPS", self.fps.fps()));

            self.set_visible("menu", snapshot.phase == GamePhase::Menu);

            let show_game_over = snapshot.phase == GamePhase::GameOver && self.overlay.is_visible();
            self.set_visible("game-over", show_game_over);
            if show_game_over {
                let lines = game_over_lines(&snapshot);
                self.set_text("final-score", &lines[1]);
                self.set_text("final-best", &lines[2]);
            }
        }

        /// Space, click and tap: start from the menu, flap otherwise
        fn press(&mut self) {
            if self.core.phase == GamePhase::Menu {
                self.input.start = true;
            } else {
                self.input.jump = true;
            }
        }

        fn toggle_autopilot(&mut self) {
            self.input.autopilot = !self.input.autopilot;
            log::info!("Autopilot: {}", self.input.autopilot);
        }

        fn cycle_quality(&mut self) {
            self.settings.quality = self.settings.quality.next();
            self.settings.save();
            log::info!("Quality: {}", self.settings.quality.as_str());
        }

        fn toggle_fps(&mut self) {
            self.settings.show_fps = !self.settings.show_fps;
            self.settings.save();
        }
    }

    fn js_error(e: impl std::fmt::Display) -> JsValue {
        JsValue::from_str(&e.to_string())
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).map_err(js_error)?;

        log::info!("Flappy starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, document.clone())));
        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(js_error)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(js_error)?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height)
            .await
            .map_err(js_error)?;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&window, &canvas, game.clone());
        setup_buttons(&document, game.clone());
        setup_auto_pause(&window, game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Flappy running!");
        Ok(())
    }

    fn setup_input_handlers(
        window: &web_sys::Window,
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) {
        // Mouse click - start or flap
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().press();
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start - start or flap
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().press();
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    " " => {
                        event.prevent_default();
                        g.press();
                    }
                    "Enter" => g.input.start = true,
                    "r" | "R" => g.input.restart = true,
                    "m" | "M" | "Escape" => g.input.menu = true,
                    "i" | "I" => g.toggle_autopilot(),
                    "p" | "P" => g.cycle_quality(),
                    "f" | "F" => g.toggle_fps(),
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        let bindings: [(&str, fn(&mut TickInput)); 3] = [
            ("start-btn", |input| input.start = true),
            ("restart-btn", |input| input.restart = true),
            ("menu-btn", |input| input.menu = true),
        ];

        for (id, press) in bindings {
            if let Some(btn) = document.get_element_by_id(id) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                    press(&mut game.borrow_mut().input);
                });
                let _ = btn
                    .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    fn setup_auto_pause(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        // Window blur: drop pending time so the bird doesn't jump ahead on return
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
            let mut g = game.borrow_mut();
            g.clock.reset();
            g.last_time = 0.0;
        });
        let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
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

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt, time);
            g.render();
            g.update_hud();
        }

        if game.borrow().core.quit_requested() {
            log::info!("Game loop stopped");
            return;
        }
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        web_sys::console::error_1(&e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;
    use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

    use flappy::consts::{SIM_DT, TICK_RATE_HZ};
    use flappy::persistence::FileStorage;
    use flappy::platform::FixedStep;
    use flappy::sim::{GameCore, GameEvent, GamePhase, TickInput, tick};
    use flappy::ui::{DeathOverlay, game_over_lines};
    use flappy::{Assets, Tuning};

    const USAGE: &str = "usage: flappy [--ticks N] [--rounds N] [--seed S] \
                         [--highscore PATH] [--tuning PATH] [--realtime]";

    /// Command line options for the headless driver
    #[derive(Debug)]
    struct Options {
        ticks: u64,
        rounds: u32,
        seed: u64,
        highscore: PathBuf,
        tuning: Option<PathBuf>,
        realtime: bool,
    }

    impl Options {
        fn parse(mut args: impl Iterator<Item = String>) -> Result<Self, String> {
            let mut options = Options {
                // Five minutes of game time
                ticks: TICK_RATE_HZ as u64 * 300,
                rounds: 1,
                seed: SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .map(|d| d.as_nanos() as u64)
                    .unwrap_or(0),
                highscore: PathBuf::from("highscore.txt"),
                tuning: None,
                realtime: false,
            };

            while let Some(arg) = args.next() {
                let mut value =
                    |name: &str| args.next().ok_or_else(|| format!("{} needs a value", name));
                match arg.as_str() {
                    "--ticks" => options.ticks = parse_number(&value("--ticks")?)?,
                    "--rounds" => options.rounds = parse_number(&value("--rounds")?)?,
                    "--seed" => options.seed = parse_number(&value("--seed")?)?,
                    "--highscore" => options.highscore = PathBuf::from(value("--highscore")?),
                    "--tuning" => options.tuning = Some(PathBuf::from(value("--tuning")?)),
                    "--realtime" => options.realtime = true,
                    "-h" | "--help" => return Err(USAGE.to_string()),
                    other => return Err(format!("unknown argument {:?}\n{}", other, USAGE)),
                }
            }
            Ok(options)
        }
    }

    fn parse_number<T: std::str::FromStr>(text: &str) -> Result<T, String> {
        text.parse().map_err(|_| format!("{:?} is not a valid number", text))
    }

    pub fn run() -> Result<(), String> {
        let options = Options::parse(std::env::args().skip(1))?;
        log::info!("Flappy (native) starting with seed {}", options.seed);

        let tuning = match &options.tuning {
            Some(path) => Tuning::load(path),
            None => Tuning::default(),
        };
        let storage = FileStorage::new(&options.highscore);
        let mut core = GameCore::new(tuning, &Assets::builtin(), Box::new(storage), options.seed);
        let mut overlay = DeathOverlay::new();
        let mut input = TickInput {
            autopilot: true,
            ..Default::default()
        };

        let mut clock = FixedStep::new();
        let mut last = Instant::now();
        let mut rounds_done = 0u32;
        let mut best_round = 0u64;

        'run: loop {
            let steps = if options.realtime {
                std::thread::sleep(Duration::from_secs_f32(SIM_DT / 2.0));
                let now = Instant::now();
                let dt = now.duration_since(last).as_secs_f32();
                last = now;
                clock.advance(dt)
            } else {
                1
            };

            for _ in 0..steps {
                if core.time_ticks >= options.ticks {
                    input.quit = true;
                }

                tick(&mut core, &input);
                if core.quit_requested() {
                    break 'run;
                }
                input.restart = false;
                overlay.update(&core.snapshot());

                for event in &core.events {
                    match event {
                        GameEvent::Scored { score } => log::debug!("Score {}", score),
                        GameEvent::GameOver { score, .. } => {
                            rounds_done += 1;
                            best_round = best_round.max(*score);
                        }
                        other => log::debug!("{:?}", other),
                    }
                }

                // Wait for the death screen like a player would
                if core.phase == GamePhase::GameOver && overlay.is_visible() {
                    for line in game_over_lines(&core.snapshot()) {
                        log::info!("{}", line);
                    }
                    if rounds_done >= options.rounds {
                        input.quit = true;
                    } else {
                        input.restart = true;
                    }
                }
            }
        }

        println!(
            "{} round(s) in {} ticks, best round {}, high score {}",
            rounds_done,
            core.time_ticks,
            best_round,
            core.high_score()
        );
        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn args(list: &[&str]) -> impl Iterator<Item = String> {
            list.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
        }

        #[test]
        fn test_parse_flags() {
            let options = Options::parse(args(&[
                "--ticks",
                "90",
                "--rounds",
                "3",
                "--seed",
                "7",
                "--highscore",
                "best.txt",
                "--realtime",
            ]))
            .unwrap();
            assert_eq!(options.ticks, 90);
            assert_eq!(options.rounds, 3);
            assert_eq!(options.seed, 7);
            assert_eq!(options.highscore, PathBuf::from("best.txt"));
            assert!(options.realtime);
            assert!(options.tuning.is_none());
        }

        #[test]
        fn test_parse_errors() {
            assert!(Options::parse(args(&["--ticks"])).is_err());
            assert!(Options::parse(args(&["--ticks", "lots"])).is_err());
            assert!(Options::parse(args(&["--bogus"])).is_err());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    if let Err(e) = native::run() {
        eprintln!("{}", e);
        std::process::exit(2);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
